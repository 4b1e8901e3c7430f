//! Core data models for octant_atlas
//!
//! Star records are immutable catalog rows; region definitions are the mutable
//! documents the namer rewrites. Every optional column is an `Option`, never a
//! zero or empty-string sentinel.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::core::celestial::region_file::normalize_number;
use crate::core::error::{AtlasError, Result};

/// Default identifier of the origin star (Sol).
pub const ORIGIN_STAR_ID: i64 = 0;

// =============================================================================
// Star Records
// =============================================================================

/// A point in parsecs relative to the origin star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinates as an `[x, y, z]` triple.
    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// One row of a star catalog.
///
/// Columns other than the known ones are kept in `extra` so region files can
/// re-emit every original field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Apparent magnitude; lower is brighter
    #[serde(rename = "mag", default)]
    pub magnitude: Option<f64>,
    /// Distance in parsecs
    #[serde(rename = "dist", default)]
    pub distance: Option<f64>,
    #[serde(rename = "proper", default)]
    pub proper_name: Option<String>,
    /// Henry Draper catalog number
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub hd: Option<i64>,
    /// Hipparcos catalog number
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub hip: Option<i64>,
    /// Any further catalog columns, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StarRecord {
    /// Create a star with only the required columns set.
    pub fn new(id: i64, position: Position) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
            z: position.z,
            magnitude: None,
            distance: None,
            proper_name: None,
            hd: None,
            hip: None,
            extra: Map::new(),
        }
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_proper_name(mut self, name: impl Into<String>) -> Self {
        self.proper_name = Some(name.into());
        self
    }

    pub fn with_hd(mut self, hd: i64) -> Self {
        self.hd = Some(hd);
        self
    }

    pub fn with_hip(mut self, hip: i64) -> Self {
        self.hip = Some(hip);
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }

    /// Proper name, if present and not blank.
    pub fn proper(&self) -> Option<&str> {
        self.proper_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Human-readable label: proper name, then `HD n`, then `HIP n`, then `Star id`.
    ///
    /// This is the one labelling rule used by region naming, region files and
    /// star enrichment.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.proper() {
            name.to_string()
        } else if let Some(hd) = self.hd {
            format!("HD {}", hd)
        } else if let Some(hip) = self.hip {
            format!("HIP {}", hip)
        } else {
            format!("Star {}", self.id)
        }
    }
}

/// Convert a JSON cell into an integer identifier.
///
/// Tabular exports often store integer columns as floats (`86729.0`), so
/// integral floats are accepted.
fn value_to_id(value: &Value) -> std::result::Result<Option<i64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else if let Some(f) = n.as_f64() {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Ok(Some(f as i64))
                } else {
                    Err(format!("expected an integral identifier, found {}", f))
                }
            } else {
                Err(format!("identifier out of range: {}", n))
            }
        }
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("expected an integral identifier, found {:?}", s)),
        other => Err(format!("expected an integral identifier, found {}", other)),
    }
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    value_to_id(&value).map_err(de::Error::custom)
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_id(&value)
        .map_err(de::Error::custom)?
        .ok_or_else(|| de::Error::custom("star id must not be null"))
}

// =============================================================================
// Region Definitions
// =============================================================================

/// A closed interval `[min, max]`, stored on disk as a two-element array.
///
/// Bounds are written with the same number rule as star rows, so `[-20, 20]`
/// reads back and writes out unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

impl From<[f64; 2]> for Range {
    fn from(bounds: [f64; 2]) -> Self {
        Self::new(bounds[0], bounds[1])
    }
}

impl From<Range> for [f64; 2] {
    fn from(range: Range) -> Self {
        [range.min, range.max]
    }
}

impl Serialize for Range {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        [normalize_number(self.min), normalize_number(self.max)].serialize(serializer)
    }
}

/// One named axis-aligned region ("octant").
///
/// `name`, `short_name`, `description` and the `brightest_star*` fields are
/// rewritten by every naming pass. `original_name` is captured once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDefinition {
    pub octant_number: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub x_range: Range,
    pub y_range: Range,
    pub z_range: Range,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightest_star: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightest_star_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightest_star_magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_point: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<Value>,
    /// Fields this crate does not interpret, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegionDefinition {
    /// Create an unnamed region with the given bounds.
    pub fn new(octant_number: i64, x_range: Range, y_range: Range, z_range: Range) -> Self {
        Self {
            octant_number,
            name: String::new(),
            short_name: String::new(),
            description: String::new(),
            original_name: None,
            x_range,
            y_range,
            z_range,
            brightest_star: None,
            brightest_star_id: None,
            brightest_star_magnitude: None,
            center_point: None,
            diameter: None,
            extra: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether a position lies inside the box, bounds included.
    pub fn contains(&self, position: &Position) -> bool {
        self.x_range.contains(position.x)
            && self.y_range.contains(position.y)
            && self.z_range.contains(position.z)
    }

    /// Check that each axis is a finite `[min, max]` with `min <= max`.
    pub fn validate(&self) -> Result<()> {
        for (axis, range) in [('x', &self.x_range), ('y', &self.y_range), ('z', &self.z_range)] {
            if !range.is_valid() {
                return Err(AtlasError::InvalidRange {
                    octant_number: self.octant_number,
                    axis,
                });
            }
        }
        Ok(())
    }

    /// Label used for logs and reports when the region may still be unnamed.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("Octant {}", self.octant_number)
        } else {
            self.name.clone()
        }
    }
}

/// The persisted region document: `{ "regions": [ ... ] }` plus any other keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionDocument {
    pub regions: Vec<RegionDefinition>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegionDocument {
    pub fn new(regions: Vec<RegionDefinition>) -> Self {
        Self {
            regions,
            extra: Map::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.regions.iter().try_for_each(RegionDefinition::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_fallback_chain() {
        let named = StarRecord::new(1, Position::new(0.0, 0.0, 0.0))
            .with_proper_name("Sirius")
            .with_hd(48915)
            .with_hip(32349);
        assert_eq!(named.display_name(), "Sirius");

        let hd_only = StarRecord::new(2, Position::new(0.0, 0.0, 0.0)).with_hd(86729);
        assert_eq!(hd_only.display_name(), "HD 86729");

        let hip_only = StarRecord::new(3, Position::new(0.0, 0.0, 0.0)).with_hip(49081);
        assert_eq!(hip_only.display_name(), "HIP 49081");

        let bare = StarRecord::new(42, Position::new(0.0, 0.0, 0.0));
        assert_eq!(bare.display_name(), "Star 42");
    }

    #[test]
    fn test_blank_proper_name_falls_through() {
        let star = StarRecord::new(7, Position::new(0.0, 0.0, 0.0))
            .with_proper_name("  ")
            .with_hip(11);
        assert_eq!(star.display_name(), "HIP 11");
    }

    #[test]
    fn test_star_row_parsing_keeps_absent_values_absent() {
        let row = json!({
            "id": 5, "x": 1.5, "y": -2.0, "z": 0.0,
            "mag": 0.0, "dist": null, "proper": null,
            "hd": 86729.0, "hip": null, "spect": "G2V"
        });
        let star: StarRecord = serde_json::from_value(row).unwrap();
        assert_eq!(star.id, 5);
        assert_eq!(star.magnitude, Some(0.0));
        assert_eq!(star.distance, None);
        assert_eq!(star.proper_name, None);
        assert_eq!(star.hd, Some(86729));
        assert_eq!(star.hip, None);
        assert_eq!(star.extra.get("spect"), Some(&json!("G2V")));
    }

    #[test]
    fn test_star_row_missing_optional_columns() {
        let star: StarRecord =
            serde_json::from_value(json!({"id": 9, "x": 0, "y": 0, "z": 0})).unwrap();
        assert_eq!(star.magnitude, None);
        assert_eq!(star.hd, None);
        assert!(star.extra.is_empty());
    }

    #[test]
    fn test_fractional_identifier_rejected() {
        let result: std::result::Result<StarRecord, _> =
            serde_json::from_value(json!({"id": 1, "x": 0, "y": 0, "z": 0, "hip": 12.5}));
        assert!(result.is_err());
    }

    #[test]
    fn test_range_inclusive_bounds() {
        let range = Range::new(-20.0, 20.0);
        assert!(range.contains(20.0));
        assert!(range.contains(-20.0));
        assert!(!range.contains(20.000001));
    }

    #[test]
    fn test_region_round_trip_preserves_unknown_fields() {
        let doc = json!({
            "version": 2,
            "regions": [{
                "octant_number": 1,
                "name": "Alpha Octant",
                "x_range": [0, 50], "y_range": [0, 50], "z_range": [0, 50],
                "center_point": [25, 25, 25],
                "diameter": 86.6,
                "color": "#ff0000"
            }]
        });
        let parsed: RegionDocument = serde_json::from_value(doc).unwrap();
        let region = &parsed.regions[0];
        assert_eq!(region.original_name, None);
        assert_eq!(region.extra.get("color"), Some(&json!("#ff0000")));
        assert_eq!(parsed.extra.get("version"), Some(&json!(2)));

        let back = serde_json::to_value(&parsed).unwrap();
        assert_eq!(back["regions"][0]["color"], json!("#ff0000"));
        assert_eq!(back["regions"][0]["x_range"], json!([0, 50]));
        assert!(back["regions"][0].get("original_name").is_none());
    }

    #[test]
    fn test_range_written_like_input() {
        let range: Range = serde_json::from_value(json!([-20, 20])).unwrap();
        assert_eq!(serde_json::to_string(&range).unwrap(), "[-20,20]");

        let fractional: Range = serde_json::from_value(json!([-0.5, 12.25])).unwrap();
        assert_eq!(serde_json::to_value(fractional).unwrap(), json!([-0.5, 12.25]));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let region = RegionDefinition::new(
            4,
            Range::new(0.0, 1.0),
            Range::new(5.0, -5.0),
            Range::new(0.0, 1.0),
        );
        let err = region.validate().unwrap_err();
        assert!(matches!(err, AtlasError::InvalidRange { octant_number: 4, axis: 'y' }));
    }
}
