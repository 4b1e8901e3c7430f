//! Pipeline tests for octant naming
//!
//! Exercise the library end to end through its public API:
//! - Classification bounds and shared faces
//! - Origin exclusion and first-minimum tie-break
//! - Re-entrant naming over a persisted document
//! - Region file ordering

use octant_atlas::core::celestial::{
    classify_all, preserved_suffix, select_brightest, PriorDescription, GENERATED_PREFIX,
};
use octant_atlas::core::store::{JsonRegionStore, JsonStarStore, RegionStore};
use octant_atlas::core::{
    build_region_files, name_document, AtlasEngine, Position, Range, RegionDefinition,
    RegionDocument, StarRecord, ORIGIN_STAR_ID,
};
use octant_atlas::RegionFileBuilder;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn star(id: i64, pos: (f64, f64, f64), mag: f64) -> StarRecord {
    StarRecord::new(id, Position::new(pos.0, pos.1, pos.2)).with_magnitude(mag)
}

/// Eight octants of a 100 pc cube around the origin, each sharing faces with
/// its neighbours.
fn eight_octants() -> RegionDocument {
    let mut regions = Vec::new();
    let mut n = 1;
    for x in [(0.0, 50.0), (-50.0, 0.0)] {
        for y in [(0.0, 50.0), (-50.0, 0.0)] {
            for z in [(0.0, 50.0), (-50.0, 0.0)] {
                regions.push(
                    RegionDefinition::new(
                        n,
                        Range::new(x.0, x.1),
                        Range::new(y.0, y.1),
                        Range::new(z.0, z.1),
                    )
                    .with_name(format!("Octant {}", n))
                    .with_description(format!(
                        "The {}ward octant of the survey.",
                        if x.0 >= 0.0 { "core" } else { "rim" }
                    )),
                );
                n += 1;
            }
        }
    }
    RegionDocument::new(regions)
}

fn catalog() -> Vec<StarRecord> {
    vec![
        star(0, (0.0, 0.0, 0.0), -26.7).with_proper_name("Sol"),
        star(1, (1.3, 0.5, 0.2), -0.01).with_proper_name("Rigil Kentaurus"),
        star(2, (-2.0, 1.0, -0.5), -1.46).with_proper_name("Sirius"),
        star(3, (10.0, 10.0, 10.0), 3.5).with_hd(1000),
        star(4, (30.0, -20.0, 5.0), 2.0).with_hip(49081),
        star(5, (-40.0, -40.0, -40.0), 6.0),
    ]
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_origin_lands_in_every_octant_but_represents_none() {
    let stars = catalog();
    let doc = eight_octants();
    let classified = classify_all(&stars, &doc.regions);

    // Sol sits on the shared corner of all eight boxes
    for subset in &classified {
        assert!(subset.iter().any(|s| s.id == 0));
        if let Some(rep) = select_brightest(subset, ORIGIN_STAR_ID) {
            assert_ne!(rep.star.id, 0);
        }
    }
}

#[test]
fn test_named_document_and_empty_octants() {
    let stars = catalog();
    let mut doc = eight_octants();
    let summary = name_document(&stars, &mut doc, ORIGIN_STAR_ID);

    // +x+y+z holds Rigil Kentaurus (and HD 1000)
    assert_eq!(doc.regions[0].short_name, "Rigil Kentaurus");
    // +x-y+z holds HIP 49081
    assert_eq!(doc.regions[2].short_name, "HIP 49081");
    // -x+y-z holds Sirius
    assert_eq!(doc.regions[5].short_name, "Sirius");
    // -x-y-z holds only star 5
    assert_eq!(doc.regions[7].short_name, "Star 5");

    assert_eq!(summary.named_count(), 4);
    assert_eq!(summary.empty_count(), 4);
    assert_eq!(doc.regions[1].name, "Octant 2");
    assert!(doc.regions[1].original_name.is_none());
}

#[test]
fn test_second_pass_reproduces_first() {
    let stars = catalog();
    let mut doc = eight_octants();
    name_document(&stars, &mut doc, ORIGIN_STAR_ID);
    let after_first = doc.clone();
    name_document(&stars, &mut doc, ORIGIN_STAR_ID);

    assert_eq!(doc, after_first);
    for region in doc.regions.iter().filter(|r| r.brightest_star.is_some()) {
        assert!(GENERATED_PREFIX.is_match(&region.description));
        assert_eq!(preserved_suffix(&region.description).prior, PriorDescription::Generated);
        assert_eq!(
            region.original_name.as_deref(),
            Some(format!("Octant {}", region.octant_number).as_str())
        );
    }
}

#[test]
fn test_region_file_is_sorted_and_includes_origin() {
    let stars = catalog();
    let mut doc = eight_octants();
    name_document(&stars, &mut doc, ORIGIN_STAR_ID);

    let files = build_region_files(&stars, &doc, &RegionFileBuilder::default());
    let (name, file) = &files[0];
    assert_eq!(name, "rigil_kentaurus.json");

    let mags: Vec<f64> = file.stars.iter().map(|s| s["mag"].as_f64().unwrap()).collect();
    assert!(mags.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(file.stars[0]["display_name"], "Sol");
    assert_eq!(file.metadata.total_stars, 3);
}

#[test]
fn test_engine_round_trip_on_disk() {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("stars.json");
    let regions_path = dir.path().join("regions.json");
    std::fs::write(&catalog_path, serde_json::to_string(&catalog()).unwrap()).unwrap();
    JsonRegionStore::new(&regions_path)
        .save_regions(&eight_octants())
        .unwrap();

    let engine = AtlasEngine::new(
        JsonStarStore::new(&catalog_path),
        JsonRegionStore::new(&regions_path),
        ORIGIN_STAR_ID,
    );
    let out = dir.path().join("out");
    let (summary, written) = engine.run(&RegionFileBuilder::new("test"), &out).unwrap();

    assert_eq!(summary.outcomes.len(), 8);
    assert_eq!(written.len(), 8);
    let reloaded = JsonRegionStore::new(&regions_path).load_regions().unwrap();
    assert_eq!(reloaded.regions[5].short_name, "Sirius");
}
