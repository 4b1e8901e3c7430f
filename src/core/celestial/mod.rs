//! Celestial Module - Octant Cartography
//!
//! Turns a star catalog and a list of region boxes into named octants.
//!
//! # Architecture
//!
//! ```text
//! StarRecord[] → classify → select_brightest → name_region → RegionFileBuilder
//!      ↓             ↓              ↓                ↓                ↓
//!   Catalog       Subsets     Representative    Derived names    Region files
//! ```
//!
//! The overlap detector stands apart: it compares a real catalog with a
//! fictional one and reports shared HIP/HD identifiers.

pub mod classifier;
pub mod namer;
pub mod overlap;
pub mod region_file;
pub mod selector;

pub use classifier::{classify, classify_all};
pub use namer::{
    apply_names, compose_description, derive_names, name_region, preserved_suffix,
    strip_generated_prefix, DerivedNames, PreservedSuffix, PriorDescription, GENERATED_PREFIX,
};
pub use overlap::{
    AmbiguousIdentifier, CatalogNamespace, OverlapDetector, OverlapRecord, OverlapReport,
    OverlapStar,
};
pub use region_file::{
    normalize_number, region_file_name, sort_by_magnitude, star_entry, BrightestStarSummary,
    RegionFile, RegionFileBuilder, RegionMetadata, DEFAULT_PROVENANCE,
};
pub use selector::{select_brightest, Representative};
