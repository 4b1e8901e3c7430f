//! Region File Builder
//!
//! Produces one self-contained document per region: metadata plus the region's
//! stars, brightest first. Each star row carries every catalog column and a
//! computed `display_name`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::core::models::{Range, RegionDefinition, StarRecord};

/// Provenance label used when none is configured.
pub const DEFAULT_PROVENANCE: &str = "octant-atlas";

// =============================================================================
// Numeric Normalization
// =============================================================================

/// Emit an integral float as an integer and anything else as a float.
/// Non-finite values have no JSON form and become `null`.
pub fn normalize_number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn normalize_optional(value: Option<f64>) -> Value {
    value.map(normalize_number).unwrap_or(Value::Null)
}

/// Apply [`normalize_number`] to every float inside a JSON value.
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => n.as_f64().map(normalize_number).unwrap_or(Value::Null),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_value(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Every catalog column of `star` with normalized numbers and explicit nulls.
pub fn star_columns(star: &StarRecord) -> Map<String, Value> {
    let mut row = Map::new();
    for (key, value) in &star.extra {
        row.insert(key.clone(), normalize_value(value.clone()));
    }
    row.insert("id".into(), Value::from(star.id));
    row.insert("x".into(), normalize_number(star.x));
    row.insert("y".into(), normalize_number(star.y));
    row.insert("z".into(), normalize_number(star.z));
    row.insert("mag".into(), normalize_optional(star.magnitude));
    row.insert("dist".into(), normalize_optional(star.distance));
    row.insert(
        "proper".into(),
        star.proper_name.clone().map(Value::String).unwrap_or(Value::Null),
    );
    row.insert("hd".into(), star.hd.map(Value::from).unwrap_or(Value::Null));
    row.insert("hip".into(), star.hip.map(Value::from).unwrap_or(Value::Null));
    row
}

/// A star row as written to a region file.
pub fn star_entry(star: &StarRecord) -> Map<String, Value> {
    let mut row = star_columns(star);
    row.insert("display_name".into(), Value::String(star.display_name()));
    row
}

/// Stable sort by magnitude, brightest first. Stars without a magnitude go last.
pub fn sort_by_magnitude(stars: &mut [&StarRecord]) {
    stars.sort_by(|a, b| match (a.magnitude, b.magnitude) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// File name for a region: lower-cased short name, whitespace runs and path
/// separators collapsed to `separator`, plus `.extension`.
pub fn region_file_name(short_name: &str, separator: char, extension: &str) -> String {
    let lowered = short_name.trim().to_lowercase();
    let mut stem = String::with_capacity(lowered.len());
    let mut pending_separator = false;
    for c in lowered.chars() {
        if c.is_whitespace() || c == '/' || c == '\\' {
            pending_separator = true;
            continue;
        }
        if pending_separator && !stem.is_empty() {
            stem.push(separator);
        }
        pending_separator = false;
        stem.push(c);
    }
    format!("{}.{}", stem, extension.trim_start_matches('.'))
}

fn file_label(region: &RegionDefinition) -> String {
    if region.short_name.trim().is_empty() {
        format!("octant {}", region.octant_number)
    } else {
        region.short_name.clone()
    }
}

// =============================================================================
// Region File Document
// =============================================================================

/// Summary of the representative star, taken from the region's derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrightestStarSummary {
    pub id: Option<i64>,
    pub name: String,
    pub magnitude: Option<f64>,
}

/// Region-level metadata heading a region file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMetadata {
    pub octant_number: i64,
    pub name: String,
    pub short_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub x_range: Range,
    pub y_range: Range,
    pub z_range: Range,
    pub center_point: Option<Value>,
    pub diameter: Option<Value>,
    pub brightest_star: Option<BrightestStarSummary>,
    pub generated_at: String,
    pub source: String,
    pub total_stars: usize,
}

/// One output document per region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionFile {
    pub metadata: RegionMetadata,
    pub stars: Vec<Map<String, Value>>,
}

/// Builds region files with a fixed timestamp and naming scheme for one run.
#[derive(Debug, Clone)]
pub struct RegionFileBuilder {
    provenance: String,
    generated_at: DateTime<Utc>,
    separator: char,
    extension: String,
}

impl Default for RegionFileBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PROVENANCE)
    }
}

impl RegionFileBuilder {
    /// A builder stamped with the current time.
    pub fn new(provenance: impl Into<String>) -> Self {
        Self {
            provenance: provenance.into(),
            generated_at: Utc::now(),
            separator: '_',
            extension: "json".to_string(),
        }
    }

    /// Fix the generation timestamp (for reproducible output).
    pub fn with_timestamp(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// File name for `region`. Regions that were never named fall back to
    /// `octant <n>`.
    pub fn file_name(&self, region: &RegionDefinition) -> String {
        region_file_name(&file_label(region), self.separator, &self.extension)
    }

    /// Alternative file name for `region` when [`file_name`](Self::file_name)
    /// is already taken: the label plus the octant number, then a counter
    /// from `attempt` 2 onwards.
    pub fn alternate_file_name(&self, region: &RegionDefinition, attempt: usize) -> String {
        let label = if attempt <= 1 {
            format!("{} {}", file_label(region), region.octant_number)
        } else {
            format!("{} {} {}", file_label(region), region.octant_number, attempt)
        };
        region_file_name(&label, self.separator, &self.extension)
    }

    /// Build the document for `region` from its classified stars.
    ///
    /// The origin star stays in the list if it was classified into the region.
    pub fn build(&self, region: &RegionDefinition, classified: &[&StarRecord]) -> RegionFile {
        let mut sorted: Vec<&StarRecord> = classified.to_vec();
        sort_by_magnitude(&mut sorted);

        let brightest_star = region.brightest_star.as_ref().map(|name| BrightestStarSummary {
            id: region.brightest_star_id,
            name: name.clone(),
            magnitude: region.brightest_star_magnitude,
        });

        let metadata = RegionMetadata {
            octant_number: region.octant_number,
            name: region.name.clone(),
            short_name: region.short_name.clone(),
            description: region.description.clone(),
            original_name: region.original_name.clone(),
            x_range: region.x_range,
            y_range: region.y_range,
            z_range: region.z_range,
            center_point: region.center_point.clone(),
            diameter: region.diameter.clone(),
            brightest_star,
            generated_at: self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            source: self.provenance.clone(),
            total_stars: sorted.len(),
        };

        RegionFile {
            metadata,
            stars: sorted.into_iter().map(star_entry).collect(),
        }
    }
}
