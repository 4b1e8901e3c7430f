//! Star Enrichment
//!
//! Builds the per-star view consumed by the map front end: display name,
//! owning nation, and the fictional name a real star carries in the overlay
//! catalog. Source records are never modified; enrichment produces new values.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::celestial::region_file::star_columns;
use crate::core::celestial::{CatalogNamespace, OverlapReport};
use crate::core::error::{InputRole, Result};
use crate::core::models::StarRecord;
use crate::core::store::load_json;

// =============================================================================
// Nations
// =============================================================================

/// A political entity claiming a set of stars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nation {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Star ids within this nation's territory
    #[serde(default)]
    pub star_ids: Vec<i64>,
}

/// The nation fields attached to an enriched star.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationRef {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl From<&Nation> for NationRef {
    fn from(nation: &Nation) -> Self {
        Self {
            id: nation.id.clone(),
            name: nation.name.clone(),
            color: nation.color.clone(),
        }
    }
}

/// Nation listing with a star-id lookup. A star claimed by several nations
/// belongs to the first one listed.
#[derive(Debug, Clone, Default)]
pub struct NationDirectory {
    nations: Vec<Nation>,
    by_star: HashMap<i64, usize>,
}

#[derive(Deserialize)]
struct NationFile {
    nations: Vec<Nation>,
}

impl NationDirectory {
    pub fn new(nations: Vec<Nation>) -> Self {
        let mut by_star = HashMap::new();
        for (index, nation) in nations.iter().enumerate() {
            for &star_id in &nation.star_ids {
                by_star.entry(star_id).or_insert(index);
            }
        }
        Self { nations, by_star }
    }

    /// Load `{"nations": [...]}` from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file: NationFile = load_json(path, InputRole::NationDirectory)?;
        Ok(Self::new(file.nations))
    }

    pub fn nations(&self) -> &[Nation] {
        &self.nations
    }

    pub fn nation_of(&self, star_id: i64) -> Option<&Nation> {
        self.by_star.get(&star_id).map(|&index| &self.nations[index])
    }
}

// =============================================================================
// Fictional Overlay
// =============================================================================

/// Fictional name and source for one real star.
#[derive(Debug, Clone, PartialEq)]
pub struct FictionalName {
    pub name: String,
    pub source: String,
}

/// Fictional names keyed by real star id, derived from catalog overlaps.
#[derive(Debug, Clone, Default)]
pub struct FictionalOverlay {
    names: HashMap<i64, FictionalName>,
}

impl FictionalOverlay {
    /// Every overlap whose fictional star has a proper name labels the real
    /// star. HIP matches are applied first and win over HD matches.
    pub fn from_overlaps(report: &OverlapReport, source: &str) -> Self {
        let mut names = HashMap::new();
        for namespace in CatalogNamespace::ALL {
            for record in report.records(namespace) {
                if record.fictional.name == "N/A" {
                    continue;
                }
                names.entry(record.real.id).or_insert_with(|| FictionalName {
                    name: record.fictional.name.clone(),
                    source: source.to_string(),
                });
            }
        }
        Self { names }
    }

    pub fn get(&self, star_id: i64) -> Option<&FictionalName> {
        self.names.get(&star_id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// =============================================================================
// Enriched Stars
// =============================================================================

/// A catalog star with its derived display, nation and fictional fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedStar {
    #[serde(flatten)]
    pub columns: Map<String, Value>,
    pub display_name: String,
    pub nation: Option<NationRef>,
    pub fictional_name: Option<String>,
    pub fictional_source: Option<String>,
}

impl EnrichedStar {
    fn matches(&self, needle: &str) -> bool {
        let proper = self.columns.get("proper").and_then(Value::as_str);
        [Some(self.display_name.as_str()), proper, self.fictional_name.as_deref()]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(needle))
    }
}

/// Enrich every star in catalog order.
pub fn enrich_stars(
    stars: &[StarRecord],
    nations: &NationDirectory,
    overlay: &FictionalOverlay,
) -> Vec<EnrichedStar> {
    stars
        .iter()
        .map(|star| {
            let fictional = overlay.get(star.id);
            EnrichedStar {
                columns: star_columns(star),
                display_name: star.display_name(),
                nation: nations.nation_of(star.id).map(NationRef::from),
                fictional_name: fictional.map(|f| f.name.clone()),
                fictional_source: fictional.map(|f| f.source.clone()),
            }
        })
        .collect()
}

/// Case-insensitive substring search over display, proper and fictional
/// names, in catalog order. A blank query matches nothing.
pub fn search_stars<'a>(stars: &'a [EnrichedStar], query: &str, limit: usize) -> Vec<&'a EnrichedStar> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    stars
        .iter()
        .filter(|star| star.matches(&needle))
        .take(limit)
        .collect()
}
