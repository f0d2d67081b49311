//! Boundary refinement — grow and constrain a raw candidate rectangle.
//!
//! A line-pair match cuts multi-segment tables off at internal double rules,
//! so the refiner extends the candidate bottom downward while row density
//! keeps up with a baseline measured just above it; sustained whitespace
//! signals the true end of the table. The anchor then locks the left edge
//! (the overlay must never drift left of its caption) and a sanity clamp
//! stops a spurious far-right line from inflating the box.

use crate::geometry::PixelBox;
use crate::pixels::PixelBuffer;

/// Configuration for boundary refinement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefineSettings {
    /// Brightness below which a pixel counts as dark.
    pub dark_threshold: u8,
    /// Rows immediately above the candidate bottom that establish the
    /// baseline density for the continuation test.
    pub baseline_rows: usize,
    /// Absolute row-density floor for continuation.
    pub min_row_fraction: f64,
    /// Continuation threshold as a ratio of the baseline density.
    pub continuation_ratio: f64,
    /// Consecutive below-threshold rows that terminate the extension.
    pub stop_after_rows: usize,
    /// Pixels kept clear of the page's right edge by the sanity clamp.
    pub page_right_margin: usize,
    /// Pixels allowed past the column end by the sanity clamp.
    pub column_slack: usize,
    /// Fraction of the detected right edge retained as a clamp bound.
    pub right_retention: f64,
}

impl Default for RefineSettings {
    fn default() -> Self {
        Self {
            dark_threshold: 180,
            baseline_rows: 12,
            min_row_fraction: 0.08,
            continuation_ratio: 0.35,
            stop_after_rows: 22,
            page_right_margin: 20,
            column_slack: 5,
            right_retention: 0.8,
        }
    }
}

/// Refine a raw candidate against the buffer it was detected in.
///
/// `anchor` is the label's box in the same pixel space as `candidate`;
/// `column_end` is the pixel x of the anchor's column boundary when one was
/// detected. Degenerate geometry after all adjustments yields `None`.
pub fn refine(
    candidate: PixelBox,
    buffer: &PixelBuffer<'_>,
    anchor: Option<PixelBox>,
    column_end: Option<usize>,
    settings: &RefineSettings,
) -> Option<PixelBox> {
    let bottom = extend_bottom(candidate, buffer, settings);

    let mut left = candidate.left;
    let mut right = candidate.right;
    if let Some(anchor) = anchor {
        left = anchor.left;

        let lower = anchor.right;
        let column_bound = column_end.unwrap_or(candidate.right) + settings.column_slack;
        let retained = (settings.right_retention * candidate.right as f64) as usize;
        let upper = buffer
            .width()
            .saturating_sub(settings.page_right_margin)
            .min(column_bound.max(retained));
        right = if lower <= upper {
            right.clamp(lower, upper)
        } else {
            // Inverted sanity range: snap to the nearest of the two bounds.
            if right.abs_diff(upper) <= right.abs_diff(lower) {
                upper
            } else {
                lower
            }
        };
    }

    PixelBox::new(left, candidate.top, right, bottom)
}

/// Extend the candidate bottom while row density continues the baseline.
///
/// Never decreases the bottom. The baseline is the mean dark fraction of the
/// `baseline_rows` rows above the candidate bottom, measured inside the
/// candidate's horizontal span.
pub fn extend_bottom(
    candidate: PixelBox,
    buffer: &PixelBuffer<'_>,
    settings: &RefineSettings,
) -> usize {
    let (left, right) = (candidate.left, candidate.right);

    let base_top = candidate.bottom.saturating_sub(settings.baseline_rows);
    let baseline = if candidate.bottom > base_top {
        (base_top..candidate.bottom)
            .map(|y| buffer.row_dark_fraction(y, left, right, settings.dark_threshold))
            .sum::<f64>()
            / (candidate.bottom - base_top) as f64
    } else {
        0.0
    };
    let threshold = settings
        .min_row_fraction
        .max(settings.continuation_ratio * baseline);

    let mut bottom = candidate.bottom;
    let mut misses = 0;
    for y in candidate.bottom..buffer.height() {
        if buffer.row_dark_fraction(y, left, right, settings.dark_threshold) >= threshold {
            bottom = y + 1;
            misses = 0;
        } else {
            misses += 1;
            if misses >= settings.stop_after_rows {
                break;
            }
        }
    }

    bottom.min(buffer.height())
}
