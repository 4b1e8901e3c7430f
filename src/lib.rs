//! octant_atlas - Brightest-star octant naming for a 3D star catalog
//!
//! Partitions a catalog of real and fictional stars into named regions
//! ("octants") around the origin star, names each region after its brightest
//! member, writes one self-contained file per region, and reports HIP/HD
//! identifiers that a fictional catalog reuses from the real one.
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/octants.rs**: Thin wrapper that calls the library
//!
//! Every pass is single-threaded and in-memory: inputs are read fully, the
//! transformation runs, outputs are written fully.

pub mod core;
pub mod logging;

pub use crate::core::celestial::{
    classify, select_brightest, CatalogNamespace, OverlapDetector, OverlapReport, RegionFile,
    RegionFileBuilder,
};
pub use crate::core::{
    AtlasConfig, AtlasEngine, AtlasError, JsonRegionStore, JsonStarStore, RegionDefinition,
    RegionDocument, Result, RunSummary, StarRecord,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
