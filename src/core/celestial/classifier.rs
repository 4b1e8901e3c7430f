//! Region Classifier
//!
//! Assigns stars to regions by position. Every region is a closed box, so a
//! star sitting exactly on a shared face belongs to both neighbours; nothing
//! here tries to make the regions a partition.

use crate::core::models::{RegionDefinition, StarRecord};

/// Stars whose position lies inside `region`, bounds included, in catalog order.
///
/// The origin star is not special here: it is listed if it is in range.
pub fn classify<'a>(stars: &'a [StarRecord], region: &RegionDefinition) -> Vec<&'a StarRecord> {
    stars
        .iter()
        .filter(|star| region.contains(&star.position()))
        .collect()
}

/// Classify every region in document order.
///
/// A full scan per region; the catalog is tens of thousands of rows and the
/// region list is short, so no spatial index is built.
pub fn classify_all<'a>(
    stars: &'a [StarRecord],
    regions: &[RegionDefinition],
) -> Vec<Vec<&'a StarRecord>> {
    regions.iter().map(|region| classify(stars, region)).collect()
}
