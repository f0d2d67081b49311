//! Lattice search — combine ruling lines into the best candidate rectangle.
//!
//! Enumerates every pair of horizontal lines against every pair of vertical
//! lines and keeps the largest enclosed rectangle above an area floor. The
//! search is deterministic: line sets arrive sorted ascending, so the
//! first-encountered maximum wins ties.

use crate::geometry::PixelBox;
use crate::lines::RulingLines;

/// Configuration for the line-pair rectangle search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeSettings {
    /// Candidate rectangles must exceed this fraction of the buffer area.
    pub min_area_fraction: f64,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            min_area_fraction: 0.02,
        }
    }
}

/// Select the maximum-area rectangle enclosed by detected ruling lines.
///
/// Requires at least two lines in each axis; otherwise, or when every
/// candidate falls below the area floor, returns `None` and the caller
/// falls back to density inference.
pub fn largest_cell(
    lines: &RulingLines,
    width: usize,
    height: usize,
    settings: &LatticeSettings,
) -> Option<PixelBox> {
    if lines.horizontal.len() < 2 || lines.vertical.len() < 2 {
        return None;
    }

    let min_area = settings.min_area_fraction * (width * height) as f64;
    let mut best: Option<PixelBox> = None;

    for (i, &top) in lines.horizontal.iter().enumerate() {
        for &bottom in &lines.horizontal[i + 1..] {
            for (k, &left) in lines.vertical.iter().enumerate() {
                for &right in &lines.vertical[k + 1..] {
                    let Some(candidate) = PixelBox::new(left, top, right, bottom) else {
                        continue;
                    };
                    if (candidate.area() as f64) <= min_area {
                        continue;
                    }
                    // Strict comparison keeps the first-encountered maximum.
                    if best.is_none_or(|b| candidate.area() > b.area()) {
                        best = Some(candidate);
                    }
                }
            }
        }
    }

    best
}
