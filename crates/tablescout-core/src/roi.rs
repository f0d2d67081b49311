//! ROI selection — restrict analysis to the anchor's text column.
//!
//! The search window is biased toward "below and above the anchor, in the
//! same text column": tables are assumed left-aligned with their caption, so
//! the left edge locks to the anchor, and the right edge stops at the column
//! boundary when the page is multi-column. Vertically the window is
//! deliberately generous — over-scanning is cheap, a missed match is not.

use crate::geometry::RectBounds;
use crate::text::TextNode;

/// Configuration for ROI selection and column analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoiSettings {
    /// Minimum horizontal gap (layer units) between text-node left edges
    /// that counts as a column boundary.
    pub column_gap_threshold: f64,
    /// Margin added past the column boundary on the window's right edge.
    pub column_gutter: f64,
    /// How far above the anchor the window reaches, to catch content whose
    /// caption follows rather than precedes it.
    pub above_anchor_reach: f64,
}

impl Default for RoiSettings {
    fn default() -> Self {
        Self {
            column_gap_threshold: 30.0,
            column_gutter: 10.0,
            above_anchor_reach: 320.0,
        }
    }
}

/// Find the page's column boundary from text-node positions.
///
/// Looks for the single largest horizontal gap among the left edges of all
/// text nodes; when it exceeds `column_gap_threshold` the gap midpoint is the
/// boundary. `None` means the page reads as single-column.
pub fn column_split(nodes: &[TextNode], settings: &RoiSettings) -> Option<f64> {
    if nodes.len() < 2 {
        return None;
    }

    let mut xs: Vec<f64> = nodes.iter().map(|n| n.bounds.left).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let mut best_gap = 0.0;
    let mut best_mid = None;
    for pair in xs.windows(2) {
        let gap = pair[1] - pair[0];
        if gap > best_gap {
            best_gap = gap;
            best_mid = Some((pair[0] + pair[1]) / 2.0);
        }
    }

    if best_gap > settings.column_gap_threshold {
        best_mid
    } else {
        None
    }
}

/// Horizontal `[start, end]` of the column containing `anchor_left`.
pub fn column_span(anchor_left: f64, split: Option<f64>, layer: &RectBounds) -> (f64, f64) {
    match split {
        Some(s) if anchor_left < s => (layer.left, s),
        Some(s) => (s, layer.right()),
        None => (layer.left, layer.right()),
    }
}

/// Compute the layer-space window the pixel pipeline will analyze.
///
/// `active_span` is an optional vertical `(top, bottom)` clamp supplied by
/// callers that know the currently relevant page range; it narrows the
/// window without changing any other behavior.
pub fn search_window(
    anchor: &RectBounds,
    layer: &RectBounds,
    split: Option<f64>,
    active_span: Option<(f64, f64)>,
    settings: &RoiSettings,
) -> RectBounds {
    let left = anchor.left;
    let right = match split {
        Some(s) if anchor.left < s => (s + settings.column_gutter).min(layer.right()),
        _ => layer.right(),
    };

    let mut top = (anchor.top - settings.above_anchor_reach).max(layer.top);
    let mut bottom = layer.bottom();
    if let Some((span_top, span_bottom)) = active_span {
        top = top.max(span_top);
        bottom = bottom.min(span_bottom);
    }

    RectBounds::new(left, top, right - left, bottom - top)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f64, y: f64) -> TextNode {
        TextNode::new("x", RectBounds::new(x, y, 40.0, 12.0))
    }

    // --- column_split tests ---

    #[test]
    fn single_column_when_gaps_are_small() {
        let nodes: Vec<TextNode> = (0..6).map(|i| node(i as f64 * 20.0, 0.0)).collect();
        assert!(column_split(&nodes, &RoiSettings::default()).is_none());
    }

    #[test]
    fn finds_largest_gap_midpoint() {
        // Left edges cluster at 0..40 and 300..340: gap 260, midpoint 170.
        let nodes = vec![
            node(0.0, 0.0),
            node(20.0, 20.0),
            node(40.0, 40.0),
            node(300.0, 0.0),
            node(320.0, 20.0),
            node(340.0, 40.0),
        ];
        let split = column_split(&nodes, &RoiSettings::default()).unwrap();
        assert!((split - 170.0).abs() < 1e-9);
    }

    #[test]
    fn too_few_nodes() {
        assert!(column_split(&[], &RoiSettings::default()).is_none());
        assert!(column_split(&[node(0.0, 0.0)], &RoiSettings::default()).is_none());
    }

    // --- column_span tests ---

    #[test]
    fn span_left_and_right_of_split() {
        let layer = RectBounds::new(0.0, 0.0, 600.0, 800.0);
        assert_eq!(column_span(50.0, Some(300.0), &layer), (0.0, 300.0));
        assert_eq!(column_span(400.0, Some(300.0), &layer), (300.0, 600.0));
        assert_eq!(column_span(400.0, None, &layer), (0.0, 600.0));
    }

    // --- search_window tests ---

    #[test]
    fn window_locks_left_to_anchor() {
        let layer = RectBounds::new(0.0, 0.0, 600.0, 800.0);
        let anchor = RectBounds::new(60.0, 400.0, 80.0, 14.0);
        let w = search_window(&anchor, &layer, None, None, &RoiSettings::default());
        assert_eq!(w.left, 60.0);
        assert_eq!(w.right(), 600.0);
        assert_eq!(w.top, 80.0); // 400 - 320
        assert_eq!(w.bottom(), 800.0);
    }

    #[test]
    fn window_stops_at_column_boundary() {
        let layer = RectBounds::new(0.0, 0.0, 600.0, 800.0);
        let anchor = RectBounds::new(60.0, 100.0, 80.0, 14.0);
        let w = search_window(&anchor, &layer, Some(290.0), None, &RoiSettings::default());
        assert_eq!(w.right(), 300.0); // split + gutter
        assert_eq!(w.top, 0.0); // clamped to the layer top
    }

    #[test]
    fn anchor_in_right_column_spans_to_page_edge() {
        let layer = RectBounds::new(0.0, 0.0, 600.0, 800.0);
        let anchor = RectBounds::new(350.0, 100.0, 80.0, 14.0);
        let w = search_window(&anchor, &layer, Some(290.0), None, &RoiSettings::default());
        assert_eq!(w.left, 350.0);
        assert_eq!(w.right(), 600.0);
    }

    #[test]
    fn active_span_clamps_vertically() {
        let layer = RectBounds::new(0.0, 0.0, 600.0, 800.0);
        let anchor = RectBounds::new(60.0, 400.0, 80.0, 14.0);
        let w = search_window(
            &anchor,
            &layer,
            None,
            Some((200.0, 650.0)),
            &RoiSettings::default(),
        );
        assert_eq!(w.top, 200.0);
        assert_eq!(w.bottom(), 650.0);
    }
}
