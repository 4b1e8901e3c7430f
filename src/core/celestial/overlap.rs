//! Catalog Overlap Detector
//!
//! Finds fictional stars that reuse a real star's HIP or HD number. Each
//! namespace is checked on its own, so one pair may show up in both lists.
//!
//! Only defined identifiers take part; an absent HIP never matches another
//! absent HIP. For a shared value the report pairs the first real star and the
//! first fictional star carrying it, in catalog order. Real stars that share
//! an identifier among themselves are listed separately as ambiguous.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use serde::Serialize;

use crate::core::models::StarRecord;

/// An external catalog identifier namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CatalogNamespace {
    #[serde(rename = "HIP")]
    Hip,
    #[serde(rename = "HD")]
    Hd,
}

impl CatalogNamespace {
    pub const ALL: [CatalogNamespace; 2] = [CatalogNamespace::Hip, CatalogNamespace::Hd];

    /// The star's identifier in this namespace, if defined.
    pub fn identifier(&self, star: &StarRecord) -> Option<i64> {
        match self {
            CatalogNamespace::Hip => star.hip,
            CatalogNamespace::Hd => star.hd,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CatalogNamespace::Hip => "HIP",
            CatalogNamespace::Hd => "HD",
        }
    }
}

impl std::fmt::Display for CatalogNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One side of a matched pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapStar {
    pub id: i64,
    /// Proper name, or `"N/A"`
    pub name: String,
    pub position: [f64; 3],
}

impl OverlapStar {
    fn from_star(star: &StarRecord) -> Self {
        Self {
            id: star.id,
            name: star.proper().unwrap_or("N/A").to_string(),
            position: star.position().as_array(),
        }
    }
}

/// A real and a fictional star sharing one identifier value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapRecord {
    pub namespace: CatalogNamespace,
    pub identifier: i64,
    pub real: OverlapStar,
    pub fictional: OverlapStar,
}

/// A matched identifier carried by more than one real star. Only the first
/// of them appears in the overlap list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmbiguousIdentifier {
    pub namespace: CatalogNamespace,
    pub identifier: i64,
    pub real_star_ids: Vec<i64>,
}

/// Overlaps for both namespaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverlapReport {
    pub hip: Vec<OverlapRecord>,
    pub hd: Vec<OverlapRecord>,
    pub ambiguous: Vec<AmbiguousIdentifier>,
}

impl OverlapReport {
    pub fn records(&self, namespace: CatalogNamespace) -> &[OverlapRecord] {
        match namespace {
            CatalogNamespace::Hip => &self.hip,
            CatalogNamespace::Hd => &self.hd,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hip.is_empty() && self.hd.is_empty()
    }

    /// Operator-facing text rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for namespace in CatalogNamespace::ALL {
            let records = self.records(namespace);
            let _ = writeln!(out, "{} overlaps: {}", namespace, records.len());
            for record in records {
                let _ = writeln!(
                    out,
                    "  {} {}: real #{} {} {} <-> fictional #{} {} {}",
                    namespace,
                    record.identifier,
                    record.real.id,
                    record.real.name,
                    format_position(&record.real.position),
                    record.fictional.id,
                    record.fictional.name,
                    format_position(&record.fictional.position),
                );
            }
        }
        if !self.ambiguous.is_empty() {
            let _ = writeln!(out, "Ambiguous real identifiers (first match reported):");
            for entry in &self.ambiguous {
                let ids: Vec<String> = entry.real_star_ids.iter().map(|id| id.to_string()).collect();
                let _ = writeln!(
                    out,
                    "  {} {}: real stars {}",
                    entry.namespace,
                    entry.identifier,
                    ids.join(", ")
                );
            }
        }
        out
    }
}

fn format_position(position: &[f64; 3]) -> String {
    format!("({:.2}, {:.2}, {:.2})", position[0], position[1], position[2])
}

// =============================================================================
// Detector
// =============================================================================

/// Compares a real catalog against a fictional one.
#[derive(Debug, Clone)]
pub struct OverlapDetector {
    origin_star_id: i64,
}

impl Default for OverlapDetector {
    fn default() -> Self {
        Self::new(crate::core::models::ORIGIN_STAR_ID)
    }
}

impl OverlapDetector {
    /// The origin star (by id) is left out of both catalogs.
    pub fn new(origin_star_id: i64) -> Self {
        Self { origin_star_id }
    }

    pub fn detect(&self, real: &[StarRecord], fictional: &[StarRecord]) -> OverlapReport {
        let mut report = OverlapReport::default();
        for namespace in CatalogNamespace::ALL {
            let (records, ambiguous) = self.detect_namespace(namespace, real, fictional);
            match namespace {
                CatalogNamespace::Hip => report.hip = records,
                CatalogNamespace::Hd => report.hd = records,
            }
            report.ambiguous.extend(ambiguous);
        }
        report
    }

    /// Overlaps within one namespace, in fictional-catalog order.
    pub fn detect_namespace(
        &self,
        namespace: CatalogNamespace,
        real: &[StarRecord],
        fictional: &[StarRecord],
    ) -> (Vec<OverlapRecord>, Vec<AmbiguousIdentifier>) {
        // Every real star per identifier, in catalog order; index 0 is the reported one.
        let mut real_by_id: HashMap<i64, Vec<&StarRecord>> = HashMap::new();
        for star in real.iter().filter(|s| s.id != self.origin_star_id) {
            if let Some(identifier) = namespace.identifier(star) {
                real_by_id.entry(identifier).or_default().push(star);
            }
        }

        let mut seen: HashSet<i64> = HashSet::new();
        let mut records = Vec::new();
        let mut ambiguous = Vec::new();

        for star in fictional.iter().filter(|s| s.id != self.origin_star_id) {
            let Some(identifier) = namespace.identifier(star) else {
                continue;
            };
            let Some(matches) = real_by_id.get(&identifier) else {
                continue;
            };
            if !seen.insert(identifier) {
                continue;
            }

            records.push(OverlapRecord {
                namespace,
                identifier,
                real: OverlapStar::from_star(matches[0]),
                fictional: OverlapStar::from_star(star),
            });
            if matches.len() > 1 {
                ambiguous.push(AmbiguousIdentifier {
                    namespace,
                    identifier,
                    real_star_ids: matches.iter().map(|s| s.id).collect(),
                });
            }
        }

        (records, ambiguous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Position;

    fn star(id: i64) -> StarRecord {
        StarRecord::new(id, Position::new(id as f64, 0.0, 0.0))
    }

    #[test]
    fn test_shared_hip_is_reported_once() {
        let real = vec![star(1).with_hip(11), star(2).with_hip(49081).with_proper_name("Regulus")];
        let fictional = vec![star(100).with_hip(49081).with_proper_name("New Leonis")];

        let report = OverlapDetector::default().detect(&real, &fictional);

        assert_eq!(report.hip.len(), 1);
        let record = &report.hip[0];
        assert_eq!(record.identifier, 49081);
        assert_eq!(record.real.id, 2);
        assert_eq!(record.real.name, "Regulus");
        assert_eq!(record.fictional.id, 100);
        assert_eq!(record.fictional.name, "New Leonis");
        assert!(report.hd.is_empty());
    }

    #[test]
    fn test_no_shared_hd_means_empty_list() {
        let real = vec![star(1).with_hd(1), star(2).with_hd(2)];
        let fictional = vec![star(10).with_hd(3), star(11)];
        let report = OverlapDetector::default().detect(&real, &fictional);
        assert!(report.hd.is_empty());
        assert!(report.is_empty());
    }

    #[test]
    fn test_absent_identifiers_never_match() {
        let real = vec![star(1), star(2)];
        let fictional = vec![star(10), star(11)];
        let report = OverlapDetector::default().detect(&real, &fictional);
        assert!(report.is_empty());
        assert!(report.ambiguous.is_empty());
    }

    #[test]
    fn test_pair_may_appear_in_both_namespaces() {
        let real = vec![star(1).with_hip(5).with_hd(6)];
        let fictional = vec![star(2).with_hip(5).with_hd(6)];
        let report = OverlapDetector::default().detect(&real, &fictional);
        assert_eq!(report.hip.len(), 1);
        assert_eq!(report.hd.len(), 1);
        assert_eq!(report.hip[0].fictional.id, report.hd[0].fictional.id);
    }

    #[test]
    fn test_first_real_and_first_fictional_win() {
        let real = vec![star(1).with_hip(7), star(2).with_hip(7)];
        let fictional = vec![star(20).with_hip(7), star(21).with_hip(7)];
        let report = OverlapDetector::default().detect(&real, &fictional);

        assert_eq!(report.hip.len(), 1);
        assert_eq!(report.hip[0].real.id, 1);
        assert_eq!(report.hip[0].fictional.id, 20);
        assert_eq!(report.ambiguous.len(), 1);
        assert_eq!(report.ambiguous[0].real_star_ids, vec![1, 2]);
    }

    #[test]
    fn test_origin_star_excluded() {
        let real = vec![star(0).with_hip(1)];
        let fictional = vec![star(50).with_hip(1)];
        assert!(OverlapDetector::default().detect(&real, &fictional).is_empty());
    }

    #[test]
    fn test_records_follow_fictional_order() {
        let real = vec![star(1).with_hd(100), star(2).with_hd(200)];
        let fictional = vec![star(10).with_hd(200), star(11).with_hd(100)];
        let report = OverlapDetector::default().detect(&real, &fictional);
        let ids: Vec<i64> = report.hd.iter().map(|r| r.identifier).collect();
        assert_eq!(ids, vec![200, 100]);
    }

    #[test]
    fn test_render_text_mentions_both_namespaces() {
        let real = vec![star(1).with_hip(5)];
        let fictional = vec![star(2).with_hip(5)];
        let text = OverlapDetector::default().detect(&real, &fictional).render_text();
        assert!(text.contains("HIP overlaps: 1"));
        assert!(text.contains("HD overlaps: 0"));
        assert!(text.contains("real #1 N/A (1.00, 0.00, 0.00)"));
    }
}
