//! Galactic direction markers
//!
//! Named markers placed around the origin for orienting a 3D map. The axes
//! follow the convention used in region descriptions: +x coreward, +y
//! spinward, +z galactic north.

use serde::Serialize;

/// Whether a marker sits on an axis or on an octant diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Axis,
    Grid,
}

/// A labelled point at a fixed distance from the origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionMarker {
    pub name: String,
    pub position: [f64; 3],
    pub kind: MarkerKind,
}

const AXES: [(&str, &str); 3] = [
    ("Coreward", "Rimward"),
    ("Spinward", "Trailing"),
    ("North", "South"),
];

fn axis_name(axis: usize, positive: bool) -> &'static str {
    let (pos, neg) = AXES[axis];
    if positive {
        pos
    } else {
        neg
    }
}

/// Six axis markers at `distance` parsecs; with `grid`, also the eight
/// octant diagonals at the same distance from the origin.
pub fn galactic_directions(distance: f64, grid: bool) -> Vec<DirectionMarker> {
    let mut markers = Vec::with_capacity(if grid { 14 } else { 6 });

    for axis in 0..3 {
        for positive in [true, false] {
            let mut position = [0.0; 3];
            position[axis] = if positive { distance } else { -distance };
            let name = match (axis, positive) {
                (2, true) => "Galactic North".to_string(),
                (2, false) => "Galactic South".to_string(),
                _ => axis_name(axis, positive).to_string(),
            };
            markers.push(DirectionMarker {
                name,
                position,
                kind: MarkerKind::Axis,
            });
        }
    }

    if grid {
        let offset = distance / 3f64.sqrt();
        for sx in [true, false] {
            for sy in [true, false] {
                for sz in [true, false] {
                    let sign = |s: bool| if s { offset } else { -offset };
                    markers.push(DirectionMarker {
                        name: format!(
                            "{}-{}-{}",
                            axis_name(0, sx),
                            axis_name(1, sy),
                            axis_name(2, sz)
                        ),
                        position: [sign(sx), sign(sy), sign(sz)],
                        kind: MarkerKind::Grid,
                    });
                }
            }
        }
    }

    markers
}
