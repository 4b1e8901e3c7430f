//! Core module for octant_atlas
//!
//! # Architecture
//!
//! - `models`: Star records, region definitions, the region document
//! - `error`: Error types using thiserror
//! - `store`: StarStore / RegionStore traits and JSON implementations
//! - `config`: `octants.json` configuration
//! - `celestial`: Classification, brightest-star selection, naming, region files, overlaps
//! - `engine`: One-pass orchestration and the run summary
//! - `enrichment`: Nations, fictional names and search over enriched stars
//! - `directions`: Galactic direction markers

pub mod celestial;
pub mod config;
pub mod directions;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use config::{AtlasConfig, DEFAULT_CONFIG_FILE};
pub use directions::{galactic_directions, DirectionMarker, MarkerKind};
pub use engine::{build_region_files, name_document, AtlasEngine, RegionOutcome, RunSummary};
pub use enrichment::{
    enrich_stars, search_stars, EnrichedStar, FictionalOverlay, Nation, NationDirectory, NationRef,
};
pub use error::{AtlasError, InputRole, Result, ResultExt};
pub use models::{
    Position, Range, RegionDefinition, RegionDocument, StarRecord, ORIGIN_STAR_ID,
};
pub use store::{JsonRegionStore, JsonStarStore, RegionStore, StarStore};
