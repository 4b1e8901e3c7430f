//! Brightest-Star Selector
//!
//! Picks a region's representative: the eligible star with the lowest
//! magnitude. The origin star and stars with no recorded magnitude are never
//! eligible. Ties go to the first minimum in catalog order.

use crate::core::models::StarRecord;

/// The star chosen to represent a region, with its magnitude unwrapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Representative<'a> {
    pub star: &'a StarRecord,
    pub magnitude: f64,
}

/// Select the brightest eligible star, or `None` if no star is eligible.
pub fn select_brightest<'a>(
    stars: &[&'a StarRecord],
    origin_star_id: i64,
) -> Option<Representative<'a>> {
    let mut best: Option<Representative<'a>> = None;
    for &star in stars {
        if star.id == origin_star_id {
            continue;
        }
        let Some(magnitude) = star.magnitude else {
            continue;
        };
        // Strictly lower only: an equal magnitude never displaces the earlier star.
        if best.map_or(true, |b| magnitude.total_cmp(&b.magnitude).is_lt()) {
            best = Some(Representative { star, magnitude });
        }
    }
    best
}
