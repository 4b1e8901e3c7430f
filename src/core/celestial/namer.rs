//! Region Namer
//!
//! Derives a region's names and description from its representative star.
//!
//! Naming is re-run over the same persisted document many times, so every
//! derived field must come out byte-identical on a second pass. The one piece
//! of state carried between passes is `original_name`, captured the first time
//! a region is named and never touched again.
//!
//! # Description layout
//!
//! ```text
//! Galactic region centered on <short_name> (magnitude <m.mm>), the brightest star in this octant. <suffix>
//! ```
//!
//! The suffix is carried over from the previous description: the generated
//! prefix is stripped (repeatedly, in case older runs stacked it), then the
//! first sentence mentioning both "ward" and "octant" is kept. Without such a
//! sentence the whole remaining text is kept.

use lazy_static::lazy_static;
use regex::Regex;

use super::selector::Representative;
use crate::core::models::RegionDefinition;

lazy_static! {
    /// The prefix written by [`compose_description`], anchored at the start.
    /// The text between the star label and "the brightest star" is left open,
    /// so older wordings of the magnitude clause are recognized too.
    pub static ref GENERATED_PREFIX: Regex = Regex::new(
        r"^Galactic region centered on .+? the brightest star in this octant\.(?:\s+|$)"
    )
    .unwrap();
}

const DIRECTION_MARKER: &str = "ward";
const OCTANT_MARKER: &str = "octant";

// =============================================================================
// Derived Fields
// =============================================================================

/// Everything a naming pass writes onto a region.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedNames {
    pub brightest_star: String,
    pub brightest_star_id: i64,
    pub brightest_star_magnitude: f64,
    pub short_name: String,
    pub name: String,
    pub description: String,
}

/// How the previous description was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorDescription {
    /// Nothing to carry over
    Empty,
    /// Began with a generated prefix, which was stripped
    Generated,
    /// No generated prefix found: first pass, or a hand-edited description
    Unrecognized,
}

/// The text carried over from a previous description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreservedSuffix {
    pub text: String,
    pub prior: PriorDescription,
    /// Whether `text` is a directional clause rather than the whole remainder
    pub directional: bool,
}

/// Remove every leading generated prefix. Returns the remainder and whether
/// anything was removed.
pub fn strip_generated_prefix(description: &str) -> (&str, bool) {
    let mut rest = description.trim_start();
    let mut stripped = false;
    while let Some(m) = GENERATED_PREFIX.find(rest) {
        rest = rest[m.end()..].trim_start();
        stripped = true;
    }
    (rest, stripped)
}

/// Split text into sentences ending in `.`, `!` or `?` followed by whitespace
/// or the end of the text. A trailing fragment without a terminator counts.
fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
            if at_boundary {
                let end = i + c.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    out.push(sentence);
                }
                start = end;
            }
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// The first sentence naming a direction ("...ward") and the octant, if any.
pub fn find_directional_clause(text: &str) -> Option<&str> {
    sentences(text).into_iter().find(|sentence| {
        let lower = sentence.to_lowercase();
        lower.contains(DIRECTION_MARKER) && lower.contains(OCTANT_MARKER)
    })
}

/// Work out what part of `previous` survives into the next description.
///
/// A hand-edited prefix that no longer matches is not an error: the text is
/// treated as authored and searched for a directional clause like any other.
pub fn preserved_suffix(previous: &str) -> PreservedSuffix {
    let (rest, stripped) = strip_generated_prefix(previous);
    let rest = rest.trim();
    let prior = if stripped {
        PriorDescription::Generated
    } else if rest.is_empty() {
        PriorDescription::Empty
    } else {
        PriorDescription::Unrecognized
    };

    match find_directional_clause(rest) {
        Some(clause) => PreservedSuffix {
            text: clause.to_string(),
            prior,
            directional: true,
        },
        None => PreservedSuffix {
            text: rest.to_string(),
            prior,
            directional: false,
        },
    }
}

/// Build a description from the star label, its magnitude and a suffix.
pub fn compose_description(short_name: &str, magnitude: f64, suffix: &str) -> String {
    let head = format!(
        "Galactic region centered on {} (magnitude {:.2}), the brightest star in this octant.",
        short_name, magnitude
    );
    if suffix.is_empty() {
        head
    } else {
        format!("{} {}", head, suffix)
    }
}

/// Derive every naming field for `region` from its representative.
///
/// Pure: reads the region's current description but changes nothing.
pub fn derive_names(region: &RegionDefinition, representative: &Representative<'_>) -> DerivedNames {
    let short_name = representative.star.display_name();
    let suffix = preserved_suffix(&region.description);
    let description = compose_description(&short_name, representative.magnitude, &suffix.text);

    DerivedNames {
        brightest_star: short_name.clone(),
        brightest_star_id: representative.star.id,
        brightest_star_magnitude: representative.magnitude,
        name: format!("{} Region", short_name),
        short_name,
        description,
    }
}

/// Write derived fields onto `region`, capturing `original_name` on first use.
pub fn apply_names(region: &mut RegionDefinition, derived: DerivedNames) {
    if region.original_name.is_none() {
        region.original_name = Some(region.name.clone());
    }
    region.name = derived.name;
    region.short_name = derived.short_name;
    region.description = derived.description;
    region.brightest_star = Some(derived.brightest_star);
    region.brightest_star_id = Some(derived.brightest_star_id);
    region.brightest_star_magnitude = Some(derived.brightest_star_magnitude);
}

/// Derive and apply in one step.
pub fn name_region(region: &mut RegionDefinition, representative: &Representative<'_>) -> DerivedNames {
    let derived = derive_names(region, representative);
    apply_names(region, derived.clone());
    derived
}
