//! Metro network description used to generate the default dataset.
//!
//! A [`Network`] is just a list of lines, each an ordered list of stations
//! with raw (untransformed) coordinates. The generator turns every line
//! into one track plus forward and backward trips.

use std::collections::HashSet;

use tracing::debug;

use crate::geometry::Coordinate;

/// How often a line runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// High frequency city line.
    Urban,
    /// Everything else.
    Suburban,
}

impl LineKind {
    /// Line families that run at urban frequency.
    const URBAN_FAMILIES: [&'static str; 4] = ["ISL", "TWL", "KTL", "TKL"];

    /// Classify a line by the family prefix of its id (the part before the
    /// first `_`), so branches share their trunk's frequency.
    pub fn for_line_id(id: &str) -> Self {
        let family = id.split('_').next().unwrap_or(id);
        if Self::URBAN_FAMILIES.iter().any(|f| *f == family) {
            LineKind::Urban
        } else {
            LineKind::Suburban
        }
    }
}

/// A station on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub location: Coordinate,
}

/// A line: an ordered sequence of at least two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: String,
    pub name: String,
    pub color: String,
    pub kind: LineKind,
    pub stations: Vec<Station>,
}

/// A collection of lines.
#[derive(Debug, Clone, Default)]
pub struct Network {
    lines: Vec<Line>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn find_line(&self, id: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Builder for creating networks from literal station tables.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: Network,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line from `(station id, lng, lat)` triples.
    ///
    /// Lines with fewer than two stations, with a repeated station id, or
    /// whose id is already taken are skipped.
    pub fn line(mut self, id: &str, name: &str, color: &str, stations: &[(&str, f64, f64)]) -> Self {
        if stations.len() < 2 {
            debug!(line = id, "Skipping line with fewer than two stations");
            return self;
        }
        let mut seen = HashSet::new();
        if !stations.iter().all(|(s, _, _)| seen.insert(*s)) {
            debug!(line = id, "Skipping line with repeated station");
            return self;
        }
        if self.inner.find_line(id).is_some() {
            debug!(line = id, "Skipping duplicate line");
            return self;
        }

        self.inner.lines.push(Line {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            kind: LineKind::for_line_id(id),
            stations: stations
                .iter()
                .map(|&(sid, lng, lat)| Station {
                    id: sid.to_string(),
                    location: Coordinate::new(lng, lat),
                })
                .collect(),
        });
        self
    }

    pub fn build(self) -> Network {
        self.inner
    }
}

/// The Hong Kong metro, with WGS-84 station coordinates.
///
/// Interchanges appear once per line with a line-prefixed id, so each line's
/// track carries its own copy of the station.
pub fn hong_kong_metro() -> Network {
    NetworkBuilder::new()
        .line(
            "ISL",
            "Island Line",
            "#0071CE",
            &[
                ("ISL_KET", 114.1278, 22.2812),
                ("ISL_HKU", 114.1352, 22.2842),
                ("ISL_SYP", 114.1444, 22.2863),
                ("ISL_SHW", 114.1512, 22.2875),
                ("ISL_CEN", 114.1582, 22.2820),
                ("ISL_ADM", 114.1646, 22.2796),
                ("ISL_WAC", 114.1728, 22.2778),
                ("ISL_CAB", 114.1820, 22.2804),
                ("ISL_TIH", 114.1918, 22.2878),
                ("ISL_FOH", 114.1988, 22.2882),
                ("ISL_NOP", 114.2062, 22.2913),
                ("ISL_QUB", 114.2127, 22.2884),
                ("ISL_TAK", 114.2209, 22.2878),
                ("ISL_SWH", 114.2223, 22.2825),
                ("ISL_SKW", 114.2285, 22.2783),
                ("ISL_HFC", 114.2341, 22.2731),
                ("ISL_CHW", 114.2366, 22.2647),
            ],
        )
        .line(
            "TWL",
            "Tsuen Wan Line",
            "#E2231A",
            &[
                ("TWL_CEN", 114.1582, 22.2820),
                ("TWL_ADM", 114.1646, 22.2796),
                ("TWL_TST", 114.1717, 22.2965),
                ("TWL_JOR", 114.1691, 22.3048),
                ("TWL_YMT", 114.1706, 22.3126),
                ("TWL_MOK", 114.1693, 22.3204),
                ("TWL_PRE", 114.1685, 22.3313),
                ("TWL_SSP", 114.1614, 22.3308),
                ("TWL_CSW", 114.1558, 22.3364),
                ("TWL_LCK", 114.1485, 22.3385),
                ("TWL_MEI", 114.1382, 22.3418),
                ("TWL_LAK", 114.1293, 22.3387),
                ("TWL_KWF", 114.1274, 22.3556),
                ("TWL_KWH", 114.1302, 22.3637),
                ("TWL_TWH", 114.1210, 22.3705),
                ("TWL_TSW", 114.1147, 22.3739),
            ],
        )
        .line(
            "KTL",
            "Kwun Tong Line",
            "#00AF49",
            &[
                ("KTL_WHA", 114.1882, 22.3045),
                ("KTL_HOM", 114.1824, 22.3094),
                ("KTL_YMT", 114.1706, 22.3126),
                ("KTL_MOK", 114.1693, 22.3204),
                ("KTL_PRE", 114.1685, 22.3313),
                ("KTL_SKM", 114.1705, 22.3332),
                ("KTL_KOT", 114.1788, 22.3411),
                ("KTL_LOF", 114.1873, 22.3392),
                ("KTL_WTS", 114.1925, 22.3421),
                ("KTL_DIH", 114.2023, 22.3402),
                ("KTL_CHH", 114.2096, 22.3386),
                ("KTL_KOB", 114.2140, 22.3235),
                ("KTL_NTK", 114.2185, 22.3155),
                ("KTL_KWT", 114.2259, 22.3120),
                ("KTL_LAT", 114.2323, 22.3075),
                ("KTL_YAT", 114.2384, 22.2968),
                ("KTL_TIK", 114.2536, 22.3032),
            ],
        )
        // Po Lam branch
        .line(
            "TKL",
            "Tseung Kwan O Line",
            "#A35EB5",
            &[
                ("TKL_NOP", 114.2062, 22.2913),
                ("TKL_QUB", 114.2127, 22.2884),
                ("TKL_YAT", 114.2384, 22.2968),
                ("TKL_TIK", 114.2536, 22.3032),
                ("TKL_TKO", 114.2599, 22.3075),
                ("TKL_HAH", 114.2635, 22.3154),
                ("TKL_POA", 114.2562, 22.3228),
            ],
        )
        .line(
            "TKL_LHP",
            "Tseung Kwan O Line (LOHAS)",
            "#A35EB5",
            &[
                ("TKL_TIK", 114.2536, 22.3032),
                ("TKL_TKO", 114.2599, 22.3075),
                ("TKL_LHP", 114.2694, 22.2949),
            ],
        )
        .line(
            "EAL",
            "East Rail Line",
            "#53B7E8",
            &[
                ("EAL_ADM", 114.1646, 22.2796),
                ("EAL_EXC", 114.1782, 22.2818),
                ("EAL_HUH", 114.1818, 22.3031),
                ("EAL_MKK", 114.1723, 22.3243),
                ("EAL_KOT", 114.1788, 22.3411),
                ("EAL_TAW", 114.1793, 22.3731),
                ("EAL_SHT", 114.1878, 22.3846),
                ("EAL_FOT", 114.1970, 22.3950),
                ("EAL_RAC", 114.2016, 22.3980),
                ("EAL_UNI", 114.2100, 22.4132),
                ("EAL_TAP", 114.1706, 22.4452),
                ("EAL_TWO", 114.1565, 22.4510),
                ("EAL_FAN", 114.1388, 22.4920),
                ("EAL_SHS", 114.1287, 22.5020),
                ("EAL_LOW", 114.1130, 22.5284),
            ],
        )
        // Lok Ma Chau spur
        .line(
            "EAL_LMC",
            "East Rail Line (Lok Ma Chau)",
            "#53B7E8",
            &[
                ("EAL_SHS", 114.1287, 22.5020),
                ("EAL_LMC", 114.0660, 22.5152),
            ],
        )
        .line(
            "TML",
            "Tuen Ma Line",
            "#923011",
            &[
                ("TML_WKS", 114.2403, 22.4243),
                ("TML_MOS", 114.2309, 22.4230),
                ("TML_HEO", 114.2255, 22.4172),
                ("TML_TSH", 114.2185, 22.4103),
                ("TML_SHM", 114.2084, 22.3879),
                ("TML_CIO", 114.2045, 22.3828),
                ("TML_STW", 114.1965, 22.3768),
                ("TML_CKT", 114.1864, 22.3746),
                ("TML_TAW", 114.1793, 22.3731),
                ("TML_HIK", 114.1738, 22.3670),
                ("TML_DIH", 114.2023, 22.3402),
                ("TML_KAT", 114.1906, 22.3323),
                ("TML_SUW", 114.1884, 22.3242),
                ("TML_TKW", 114.1856, 22.3168),
                ("TML_HOM", 114.1824, 22.3094),
                ("TML_HUH", 114.1818, 22.3031),
                ("TML_ETS", 114.1760, 22.2960),
                ("TML_AUS", 114.1664, 22.3040),
                ("TML_NAC", 114.1610, 22.3260),
                ("TML_MEI", 114.1382, 22.3418),
                ("TML_TWW", 114.1130, 22.3718),
                ("TML_KSR", 114.0661, 22.4360),
                ("TML_YUL", 114.0347, 22.4457),
                ("TML_LOP", 114.0238, 22.4514),
                ("TML_TIS", 114.0036, 22.4495),
                ("TML_SIH", 113.9795, 22.4060),
                ("TML_TUM", 113.9736, 22.3952),
            ],
        )
        .line(
            "TCL",
            "Tung Chung Line",
            "#F38B00",
            &[
                ("TCL_HOK", 114.1582, 22.2820),
                ("TCL_KOW", 114.1618, 22.3052),
                ("TCL_OLY", 114.1594, 22.3188),
                ("TCL_NAC", 114.1610, 22.3260),
                ("TCL_LAK", 114.1293, 22.3387),
                ("TCL_TSY", 114.1068, 22.3592),
                ("TCL_SUN", 114.0246, 22.3155),
                ("TCL_TUC", 113.9388, 22.2891),
            ],
        )
        .line(
            "AEL",
            "Airport Express",
            "#007078",
            &[
                ("AEL_HOK", 114.1582, 22.2820),
                ("AEL_KOW", 114.1618, 22.3052),
                ("AEL_TSY", 114.1068, 22.3592),
                ("AEL_AIR", 113.9348, 22.3154),
                ("AEL_AWE", 113.9431, 22.3213),
            ],
        )
        .line(
            "DRL",
            "Disneyland Resort Line",
            "#E777CB",
            &[("DRL_SUN", 114.0246, 22.3155), ("DRL_DIS", 114.0454, 22.3152)],
        )
        .line(
            "SIL",
            "South Island Line",
            "#B6BD00",
            &[
                ("SIL_ADM", 114.1646, 22.2796),
                ("SIL_OCP", 114.1727, 22.2475),
                ("SIL_WCH", 114.1628, 22.2468),
                ("SIL_LET", 114.1566, 22.2427),
                ("SIL_SOH", 114.1530, 22.2401),
            ],
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_kind_by_family() {
        assert_eq!(LineKind::for_line_id("ISL"), LineKind::Urban);
        assert_eq!(LineKind::for_line_id("TKL_LHP"), LineKind::Urban);
        assert_eq!(LineKind::for_line_id("DRL"), LineKind::Suburban);
        assert_eq!(LineKind::for_line_id("ISLX"), LineKind::Suburban);
        assert_eq!(LineKind::for_line_id(""), LineKind::Suburban);
    }

    #[test]
    fn builder_adds_line() {
        let network = NetworkBuilder::new()
            .line("L1", "Line 1", "#fff", &[("A", 0.0, 0.0), ("B", 1.0, 0.0)])
            .build();

        assert_eq!(network.len(), 1);
        let line = network.find_line("L1").unwrap();
        assert_eq!(line.name, "Line 1");
        assert_eq!(line.kind, LineKind::Suburban);
        assert_eq!(line.stations[1].id, "B");
        assert_eq!(line.stations[1].location, Coordinate::new(1.0, 0.0));
    }

    #[test]
    fn builder_skips_invalid_lines() {
        let network = NetworkBuilder::new()
            .line("SHORT", "", "", &[("A", 0.0, 0.0)])
            .line("LOOP", "", "", &[("A", 0.0, 0.0), ("A", 1.0, 0.0)])
            .line("OK", "first", "", &[("A", 0.0, 0.0), ("B", 1.0, 0.0)])
            .line("OK", "second", "", &[("C", 0.0, 0.0), ("D", 1.0, 0.0)])
            .build();

        assert_eq!(network.len(), 1);
        assert_eq!(network.lines()[0].name, "first");
    }

    #[test]
    fn hong_kong_metro_lines() {
        let network = hong_kong_metro();

        assert_eq!(network.len(), 12);
        assert_eq!(network.find_line("ISL").unwrap().stations.len(), 17);
        assert_eq!(network.find_line("DRL").unwrap().kind, LineKind::Suburban);
        assert_eq!(network.find_line("EAL").unwrap().kind, LineKind::Suburban);
        assert_eq!(network.find_line("EAL_LMC").unwrap().color, "#53B7E8");
        assert_eq!(network.find_line("TML").unwrap().color, "#923011");
        assert_eq!(network.find_line("TML").unwrap().stations.len(), 27);
        assert_eq!(network.find_line("TKL_LHP").unwrap().kind, LineKind::Urban);

        let twl = network.find_line("TWL").unwrap();
        assert_eq!(twl.color, "#E2231A");
        assert_eq!(twl.stations.first().unwrap().id, "TWL_CEN");
        assert_eq!(twl.stations.last().unwrap().id, "TWL_TSW");
    }
}
