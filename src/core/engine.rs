//! Atlas Engine - one pass over the catalog
//!
//! Loads the star catalog and region document, then runs
//! classification → selection → naming per region, in document order, and
//! optionally writes one file per region.
//!
//! Inputs are always loaded in full before anything is written, so a missing
//! or broken input never leaves a partial set of outputs. A region without an
//! eligible star is recorded in the [`RunSummary`] and left untouched; the
//! remaining regions are still processed.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::core::celestial::{
    classify, name_region, preserved_suffix, select_brightest, PriorDescription, RegionFile,
    RegionFileBuilder,
};
use crate::core::error::{Result, ResultExt};
use crate::core::models::{RegionDocument, StarRecord};
use crate::core::store::{write_json_atomic, RegionStore, StarStore};

// =============================================================================
// Run Summary
// =============================================================================

/// What happened to one region during a naming pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionOutcome {
    /// A representative was found and the derived fields were rewritten
    Named {
        octant_number: i64,
        name: String,
        brightest_star_id: i64,
        magnitude: f64,
        star_count: usize,
        prior: PriorDescription,
    },
    /// No eligible star; the region was left as it was
    NoStars {
        octant_number: i64,
        label: String,
        star_count: usize,
    },
}

impl RegionOutcome {
    pub fn octant_number(&self) -> i64 {
        match self {
            RegionOutcome::Named { octant_number, .. } | RegionOutcome::NoStars { octant_number, .. } => {
                *octant_number
            }
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, RegionOutcome::Named { .. })
    }
}

/// Per-region outcomes of a naming pass, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub outcomes: Vec<RegionOutcome>,
}

impl RunSummary {
    pub fn named_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_named()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.outcomes.len() - self.named_count()
    }

    /// Human-readable end-of-run summary.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for outcome in &self.outcomes {
            match outcome {
                RegionOutcome::Named {
                    octant_number,
                    name,
                    brightest_star_id,
                    magnitude,
                    star_count,
                    ..
                } => {
                    let _ = writeln!(
                        out,
                        "  [{}] {} - star #{} (magnitude {:.2}), {} stars",
                        octant_number, name, brightest_star_id, magnitude, star_count
                    );
                }
                RegionOutcome::NoStars {
                    octant_number,
                    label,
                    star_count,
                } => {
                    let _ = writeln!(
                        out,
                        "  [{}] {} - no stars found ({} classified, none eligible)",
                        octant_number, label, star_count
                    );
                }
            }
        }
        let _ = writeln!(
            out,
            "{} regions: {} named, {} without stars",
            self.outcomes.len(),
            self.named_count(),
            self.empty_count()
        );
        out
    }
}

// =============================================================================
// Pure Passes
// =============================================================================

/// Name every region of `document` in place.
pub fn name_document(
    stars: &[StarRecord],
    document: &mut RegionDocument,
    origin_star_id: i64,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for region in document.regions.iter_mut() {
        let subset = classify(stars, region);
        let Some(representative) = select_brightest(&subset, origin_star_id) else {
            warn!("{}: no stars found", region.label());
            summary.outcomes.push(RegionOutcome::NoStars {
                octant_number: region.octant_number,
                label: region.label(),
                star_count: subset.len(),
            });
            continue;
        };

        let prior = preserved_suffix(&region.description).prior;
        let derived = name_region(region, &representative);
        info!(
            "{}: {} (magnitude {:.2}), {} stars",
            region.octant_number,
            derived.name,
            derived.brightest_star_magnitude,
            subset.len()
        );
        summary.outcomes.push(RegionOutcome::Named {
            octant_number: region.octant_number,
            name: derived.name,
            brightest_star_id: derived.brightest_star_id,
            magnitude: derived.brightest_star_magnitude,
            star_count: subset.len(),
            prior,
        });
    }

    summary
}

/// Build every region file, paired with its file name.
///
/// Every file name is unique: a region whose name is already taken gets its
/// octant number appended, then a counter if that is taken too.
pub fn build_region_files(
    stars: &[StarRecord],
    document: &RegionDocument,
    builder: &RegionFileBuilder,
) -> Vec<(String, RegionFile)> {
    let mut used: HashSet<String> = HashSet::new();
    let mut files = Vec::with_capacity(document.regions.len());

    for region in &document.regions {
        let subset = classify(stars, region);
        let mut file_name = builder.file_name(region);
        if used.contains(&file_name) {
            let taken = file_name;
            let mut attempt = 1;
            file_name = builder.alternate_file_name(region, attempt);
            while used.contains(&file_name) {
                attempt += 1;
                file_name = builder.alternate_file_name(region, attempt);
            }
            warn!(
                "{}: {} already taken, writing {} instead",
                region.label(),
                taken,
                file_name
            );
        }
        used.insert(file_name.clone());
        files.push((file_name, builder.build(region, &subset)));
    }

    files
}

// =============================================================================
// Atlas Engine
// =============================================================================

/// Runs naming and region-file passes against a star store and a region store.
pub struct AtlasEngine<S: StarStore, R: RegionStore> {
    stars: S,
    regions: R,
    origin_star_id: i64,
}

impl<S: StarStore, R: RegionStore> AtlasEngine<S, R> {
    pub fn new(stars: S, regions: R, origin_star_id: i64) -> Self {
        Self {
            stars,
            regions,
            origin_star_id,
        }
    }

    fn load(&self) -> Result<(Vec<StarRecord>, RegionDocument)> {
        let stars = self.stars.load_stars()?;
        let document = self.regions.load_regions()?;
        info!(
            "loaded {} stars and {} regions",
            stars.len(),
            document.regions.len()
        );
        Ok((stars, document))
    }

    /// Name all regions and persist the document.
    pub fn name_regions(&self) -> Result<RunSummary> {
        let (stars, mut document) = self.load()?;
        let summary = name_document(&stars, &mut document, self.origin_star_id);
        self.regions
            .save_regions(&document)
            .context("saving region document")?;
        Ok(summary)
    }

    /// Write one file per region into `output_dir`, using the document as it
    /// stands (no naming pass).
    pub fn write_region_files(
        &self,
        builder: &RegionFileBuilder,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let (stars, document) = self.load()?;
        write_files(&stars, &document, builder, output_dir)
    }

    /// Name all regions, persist the document, then write region files.
    pub fn run(
        &self,
        builder: &RegionFileBuilder,
        output_dir: &Path,
    ) -> Result<(RunSummary, Vec<PathBuf>)> {
        let (stars, mut document) = self.load()?;
        let summary = name_document(&stars, &mut document, self.origin_star_id);
        self.regions
            .save_regions(&document)
            .context("saving region document")?;
        let written = write_files(&stars, &document, builder, output_dir)?;
        Ok((summary, written))
    }
}

fn write_files(
    stars: &[StarRecord],
    document: &RegionDocument,
    builder: &RegionFileBuilder,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let files = build_region_files(stars, document, builder);
    let mut written = Vec::with_capacity(files.len());
    for (file_name, file) in files {
        let path = output_dir.join(&file_name);
        write_json_atomic(&path, &file).context(format!("writing {}", path.display()))?;
        info!("wrote {} ({} stars)", path.display(), file.metadata.total_stars);
        written.push(path);
    }
    Ok(written)
}
