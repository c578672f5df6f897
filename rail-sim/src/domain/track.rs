//! Track geometry: one physical rail path and its named stations.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::DomainError;
use crate::geometry::Coordinate;

/// Identifier of a [`TrackGeometry`], e.g. `track_ISL`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Trim a label, treating empty and whitespace-only labels as no label.
fn normalize_label(name: Option<String>) -> Option<String> {
    name.and_then(|n| {
        let trimmed = n.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == n.len() {
            Some(n)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn deserialize_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<String>::deserialize(deserializer).map(normalize_label)
}

/// One point of a track. A labelled point is a station that legs can start
/// or end at; unlabelled points only shape the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub location: Coordinate,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_label"
    )]
    name: Option<String>,
}

impl TrackPoint {
    /// An unlabelled shape point.
    pub fn new(location: Coordinate) -> Self {
        Self {
            location,
            name: None,
        }
    }

    /// A labelled station point.
    pub fn station(location: Coordinate, name: impl Into<String>) -> Self {
        Self {
            location,
            name: normalize_label(Some(name.into())),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_station(&self) -> bool {
        self.name.is_some()
    }
}

/// A named, ordered sequence of points describing one physical rail path.
///
/// Point order is traversal order. A single geometry serves both directions
/// of a line; legs pick the direction through their endpoint labels.
///
/// # Invariants
///
/// - No two points share a label (labels are lookup keys)
///
/// Every mutator checks the invariant and leaves the track untouched when it
/// would be broken. Data deserialized from storage bypasses these checks;
/// see [`TrackGeometry::duplicate_labels`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    id: TrackId,
    path: Vec<TrackPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

impl TrackGeometry {
    /// Build a track, rejecting duplicate labels.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_sim::domain::{TrackGeometry, TrackPoint};
    /// use rail_sim::geometry::Coordinate;
    ///
    /// let track = TrackGeometry::new(
    ///     "track_A",
    ///     vec![
    ///         TrackPoint::station(Coordinate::new(0.0, 0.0), "A1"),
    ///         TrackPoint::new(Coordinate::new(5.0, 1.0)),
    ///         TrackPoint::station(Coordinate::new(10.0, 0.0), "A2"),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(track.find_point_index("A2"), Some(2));
    /// assert_eq!(track.find_point_index("A3"), None);
    /// ```
    pub fn new(id: impl Into<TrackId>, path: Vec<TrackPoint>) -> Result<Self, DomainError> {
        let track = Self {
            id: id.into(),
            path,
            color: None,
        };
        if let Some(label) = track.duplicate_labels().into_iter().next() {
            return Err(DomainError::DuplicateLabel {
                track: track.id,
                label,
            });
        }
        Ok(track)
    }

    /// Set the display color (e.g. `"#0075C2"`).
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn id(&self) -> &TrackId {
        &self.id
    }

    pub fn path(&self) -> &[TrackPoint] {
        &self.path
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color(&mut self, color: Option<String>) {
        self.color = color;
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The bare coordinates of the path, in traversal order.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.path.iter().map(|p| p.location).collect()
    }

    /// Index of the point carrying `label`, if any.
    pub fn find_point_index(&self, label: &str) -> Option<usize> {
        self.path.iter().position(|p| p.name() == Some(label))
    }

    /// Labelled points, in path order.
    pub fn stations(&self) -> impl Iterator<Item = (usize, &str)> {
        self.path
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.name().map(|n| (i, n)))
    }

    /// Labels that occur more than once, each reported once.
    pub fn duplicate_labels(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut dups: Vec<String> = Vec::new();
        for (_, label) in self.stations() {
            if !seen.insert(label) && !dups.iter().any(|d| d == label) {
                dups.push(label.to_string());
            }
        }
        dups
    }

    /// Check that `label` is free, ignoring the point at `except`.
    fn ensure_label_free(&self, label: Option<&str>, except: Option<usize>) -> Result<(), DomainError> {
        let Some(label) = label else {
            return Ok(());
        };
        match self.find_point_index(label) {
            Some(i) if Some(i) != except => Err(DomainError::DuplicateLabel {
                track: self.id.clone(),
                label: label.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), DomainError> {
        if index < self.path.len() {
            Ok(())
        } else {
            Err(DomainError::PointIndexOutOfRange {
                index,
                len: self.path.len(),
            })
        }
    }

    /// Append a point to the end of the path.
    pub fn push_point(&mut self, point: TrackPoint) -> Result<(), DomainError> {
        self.ensure_label_free(point.name(), None)?;
        self.path.push(point);
        Ok(())
    }

    /// Insert a point before `index` (`index == len` appends).
    pub fn insert_point(&mut self, index: usize, point: TrackPoint) -> Result<(), DomainError> {
        if index > self.path.len() {
            return Err(DomainError::PointIndexOutOfRange {
                index,
                len: self.path.len(),
            });
        }
        self.ensure_label_free(point.name(), None)?;
        self.path.insert(index, point);
        Ok(())
    }

    /// Remove and return the point at `index`.
    ///
    /// Legs that used its label become unresolvable.
    pub fn remove_point(&mut self, index: usize) -> Result<TrackPoint, DomainError> {
        self.check_index(index)?;
        Ok(self.path.remove(index))
    }

    /// Move the point at `index` to a new location, keeping its label.
    pub fn move_point(&mut self, index: usize, location: Coordinate) -> Result<(), DomainError> {
        self.check_index(index)?;
        self.path[index].location = location;
        Ok(())
    }

    /// Set or clear the label of the point at `index`.
    ///
    /// Empty or whitespace-only labels clear it.
    pub fn rename_point(&mut self, index: usize, name: Option<String>) -> Result<(), DomainError> {
        self.check_index(index)?;
        let name = normalize_label(name);
        self.ensure_label_free(name.as_deref(), Some(index))?;
        self.path[index].name = name;
        Ok(())
    }

    /// Replace the path with edited coordinates, keeping labels by index.
    ///
    /// This is how a polyline edited on the map is written back: points that
    /// still exist keep their label, new trailing points are unlabelled and
    /// labels of dropped trailing points are lost.
    pub fn replace_locations(&mut self, locations: impl IntoIterator<Item = Coordinate>) {
        let mut old = std::mem::take(&mut self.path).into_iter();
        self.path = locations
            .into_iter()
            .map(|location| TrackPoint {
                location,
                name: old.next().and_then(|p| p.name),
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn make_track() -> TrackGeometry {
        TrackGeometry::new(
            "track_T",
            vec![
                TrackPoint::station(c(0.0, 0.0), "A"),
                TrackPoint::new(c(5.0, 0.0)),
                TrackPoint::station(c(10.0, 0.0), "B"),
                TrackPoint::station(c(10.0, 10.0), "C"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn find_point_index_distinguishes_absent_from_zero() {
        let track = make_track();
        assert_eq!(track.find_point_index("A"), Some(0));
        assert_eq!(track.find_point_index("C"), Some(3));
        assert_eq!(track.find_point_index("Z"), None);
        assert_eq!(track.find_point_index(""), None);
    }

    #[test]
    fn new_rejects_duplicate_labels() {
        let result = TrackGeometry::new(
            "track_T",
            vec![
                TrackPoint::station(c(0.0, 0.0), "A"),
                TrackPoint::station(c(1.0, 0.0), "A"),
            ],
        );
        assert_eq!(
            result,
            Err(DomainError::DuplicateLabel {
                track: TrackId::new("track_T"),
                label: "A".into()
            })
        );
    }

    #[test]
    fn station_label_is_normalized() {
        assert_eq!(TrackPoint::station(c(0.0, 0.0), "  A ").name(), Some("A"));
        assert_eq!(TrackPoint::station(c(0.0, 0.0), "   ").name(), None);
        assert!(!TrackPoint::station(c(0.0, 0.0), "").is_station());
    }

    #[test]
    fn stations_lists_labelled_points() {
        let track = make_track();
        let stations: Vec<_> = track.stations().collect();
        assert_eq!(stations, vec![(0, "A"), (2, "B"), (3, "C")]);
    }

    #[test]
    fn push_and_insert() {
        let mut track = make_track();
        track.push_point(TrackPoint::station(c(0.0, 10.0), "D")).unwrap();
        assert_eq!(track.find_point_index("D"), Some(4));

        track.insert_point(1, TrackPoint::new(c(2.0, 0.0))).unwrap();
        assert_eq!(track.find_point_index("B"), Some(3));
        assert_eq!(track.len(), 6);

        track.insert_point(6, TrackPoint::new(c(0.0, 5.0))).unwrap();
        assert_eq!(track.len(), 7);
    }

    #[test]
    fn push_rejects_duplicate_label() {
        let mut track = make_track();
        let err = track
            .push_point(TrackPoint::station(c(0.0, 10.0), "B"))
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateLabel { .. }));
        assert_eq!(track.len(), 4);
    }

    #[test]
    fn insert_out_of_range() {
        let mut track = make_track();
        let err = track.insert_point(9, TrackPoint::new(c(0.0, 0.0))).unwrap_err();
        assert_eq!(err, DomainError::PointIndexOutOfRange { index: 9, len: 4 });
    }

    #[test]
    fn remove_point() {
        let mut track = make_track();
        let removed = track.remove_point(2).unwrap();
        assert_eq!(removed.name(), Some("B"));
        assert_eq!(track.find_point_index("B"), None);
        assert_eq!(track.find_point_index("C"), Some(2));

        assert!(matches!(
            track.remove_point(10),
            Err(DomainError::PointIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn move_point_keeps_label() {
        let mut track = make_track();
        track.move_point(2, c(12.0, 1.0)).unwrap();
        assert_eq!(track.path()[2].location, c(12.0, 1.0));
        assert_eq!(track.path()[2].name(), Some("B"));
    }

    #[test]
    fn rename_point() {
        let mut track = make_track();

        // Renaming a point to its own label is fine
        track.rename_point(0, Some("A".into())).unwrap();

        track.rename_point(1, Some("MID".into())).unwrap();
        assert_eq!(track.find_point_index("MID"), Some(1));

        let err = track.rename_point(1, Some("C".into())).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateLabel { .. }));
        assert_eq!(track.path()[1].name(), Some("MID"));

        track.rename_point(1, Some(String::new())).unwrap();
        assert_eq!(track.path()[1].name(), None);
    }

    #[test]
    fn replace_locations_keeps_labels_by_index() {
        let mut track = make_track();
        track.replace_locations(vec![c(0.0, 1.0), c(5.0, 1.0), c(10.0, 1.0)]);

        assert_eq!(track.len(), 3);
        assert_eq!(track.path()[0].name(), Some("A"));
        assert_eq!(track.path()[0].location, c(0.0, 1.0));
        assert_eq!(track.path()[2].name(), Some("B"));
        assert_eq!(track.find_point_index("C"), None);

        track.replace_locations(vec![c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)]);
        assert_eq!(track.path()[3].name(), None);
        assert!(track.duplicate_labels().is_empty());
    }

    #[test]
    fn duplicate_labels_from_deserialized_data() {
        let json = r#"{
            "id": "track_X",
            "path": [
                {"location": [0, 0], "name": "A"},
                {"location": [1, 0], "name": "A"},
                {"location": [2, 0], "name": "A"},
                {"location": [3, 0]}
            ]
        }"#;
        let track: TrackGeometry = serde_json::from_str(json).unwrap();
        assert_eq!(track.duplicate_labels(), vec!["A".to_string()]);
        assert_eq!(track.color(), None);
    }

    #[test]
    fn deserialized_labels_are_normalized() {
        let json = r#"{
            "id": "track_X",
            "path": [
                {"location": [0, 0], "name": ""},
                {"location": [1, 0], "name": "   "},
                {"location": [2, 0], "name": " B "},
                {"location": [3, 0], "name": null}
            ]
        }"#;
        let track: TrackGeometry = serde_json::from_str(json).unwrap();

        assert!(!track.path()[0].is_station());
        assert!(!track.path()[1].is_station());
        assert_eq!(track.path()[2].name(), Some("B"));
        assert!(!track.path()[3].is_station());
        assert_eq!(track.find_point_index(""), None);
        assert!(track.duplicate_labels().is_empty());
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let track = TrackGeometry::new("t", vec![TrackPoint::new(c(1.0, 2.0))]).unwrap();
        let json = serde_json::to_string(&track).unwrap();
        assert_eq!(json, r#"{"id":"t","path":[{"location":[1.0,2.0]}]}"#);

        let track = track.with_color("#0075C2");
        let json = serde_json::to_string(&track).unwrap();
        assert!(json.ends_with(r##""color":"#0075C2"}"##));
    }
}
