//! Schedule generation parameters.

use chrono::Duration;

/// Configuration for generating a default timetable.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Average running speed between stations (km/h).
    pub speed_kmph: f64,

    /// Factor applied to straight-line running time to account for
    /// curvature, acceleration and braking.
    pub detour_factor: f64,

    /// Time spent at each intermediate station (seconds).
    pub dwell_secs: i64,

    /// Interval between departures on urban lines (minutes).
    pub urban_headway_mins: i64,

    /// Interval between departures on other lines (minutes).
    pub suburban_headway_mins: i64,

    /// Number of trains generated in each direction of every line.
    pub trips_per_direction: usize,

    /// How long after the first forward train the first return train leaves
    /// (seconds).
    pub reverse_offset_secs: i64,
}

impl GeneratorConfig {
    /// Returns the dwell time as a Duration.
    pub fn dwell(&self) -> Duration {
        Duration::seconds(self.dwell_secs)
    }

    /// Returns the urban headway as a Duration.
    pub fn urban_headway(&self) -> Duration {
        Duration::minutes(self.urban_headway_mins)
    }

    /// Returns the suburban headway as a Duration.
    pub fn suburban_headway(&self) -> Duration {
        Duration::minutes(self.suburban_headway_mins)
    }

    /// Returns the return-service offset as a Duration.
    pub fn reverse_offset(&self) -> Duration {
        Duration::seconds(self.reverse_offset_secs)
    }

    /// Running time for `metres` of straight-line distance.
    pub fn running_time(&self, metres: f64) -> Duration {
        let metres_per_sec = self.speed_kmph * 1000.0 / 3600.0;
        let ms = metres / metres_per_sec * 1000.0 * self.detour_factor;
        // At least a millisecond, so every generated leg ends after it starts
        Duration::milliseconds((ms.round() as i64).max(1))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            speed_kmph: 60.0,
            detour_factor: 1.5,
            dwell_secs: 30,
            urban_headway_mins: 3,
            suburban_headway_mins: 6,
            trips_per_direction: 15,
            reverse_offset_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GeneratorConfig::default();

        assert_eq!(config.speed_kmph, 60.0);
        assert_eq!(config.detour_factor, 1.5);
        assert_eq!(config.dwell_secs, 30);
        assert_eq!(config.urban_headway_mins, 3);
        assert_eq!(config.suburban_headway_mins, 6);
        assert_eq!(config.trips_per_direction, 15);
        assert_eq!(config.reverse_offset_secs, 120);
    }

    #[test]
    fn duration_methods() {
        let config = GeneratorConfig::default();

        assert_eq!(config.dwell(), Duration::seconds(30));
        assert_eq!(config.urban_headway(), Duration::minutes(3));
        assert_eq!(config.suburban_headway(), Duration::minutes(6));
        assert_eq!(config.reverse_offset(), Duration::minutes(2));
    }

    #[test]
    fn running_time() {
        let config = GeneratorConfig::default();

        // 1 km at 60 km/h is one minute, plus 50%
        assert_eq!(config.running_time(1000.0), Duration::seconds(90));

        // Coincident stations still take some time
        assert_eq!(config.running_time(0.0), Duration::milliseconds(1));
    }
}
