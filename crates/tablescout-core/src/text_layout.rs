//! Text-layout estimation — infer bounds from sibling text nodes, no pixels.
//!
//! The alternate pipeline for when pixel capture is unavailable or the
//! target is a figure. Tables betray themselves through short, numeric,
//! cell-like nodes below the caption; figures have no reliable textual cue,
//! so their heuristic simply widens its net around the anchor.

use crate::geometry::RectBounds;
use crate::roi::{RoiSettings, column_span, column_split};
use crate::text::TextNode;

/// What kind of region the anchor label refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionKind {
    /// A table: content is short, numeric, cell-like text.
    #[default]
    Table,
    /// A figure: no textual cue, widest search radius.
    Figure,
    /// Anything else referenced by a label.
    Generic,
}

/// Configuration for the text-layout estimator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextLayoutSettings {
    /// Horizontal distance (layer units) from the anchor's left edge within
    /// which a node can qualify as table content.
    pub horizontal_reach: f64,
    /// Maximum character length of a cell-like node.
    pub max_cell_text_len: usize,
    /// Maximum word count of a cell-like node (unless it reads numeric).
    pub max_cell_words: usize,
    /// Minimum fraction of digit characters for a node to read numeric.
    pub min_digit_fraction: f64,
    /// Padding added above the first and below the last table content node.
    pub vertical_pad: f64,
    /// Height of the conservative fallback box when no table content
    /// qualifies below the anchor.
    pub fallback_height: f64,
    /// Vertical search radius around the anchor for figures.
    pub figure_vertical_reach: f64,
    /// Vertical search radius around the anchor for generic regions.
    pub generic_vertical_reach: f64,
    /// Horizontal radius as a fraction of the vertical radius.
    pub horizontal_reach_ratio: f64,
    /// Column-analysis settings used to clamp the result horizontally.
    pub roi: RoiSettings,
}

impl Default for TextLayoutSettings {
    fn default() -> Self {
        Self {
            horizontal_reach: 100.0,
            max_cell_text_len: 48,
            max_cell_words: 4,
            min_digit_fraction: 0.25,
            vertical_pad: 20.0,
            fallback_height: 300.0,
            figure_vertical_reach: 300.0,
            generic_vertical_reach: 200.0,
            horizontal_reach_ratio: 0.6,
            roi: RoiSettings::default(),
        }
    }
}

/// Estimate region bounds from the positions of sibling text nodes.
///
/// The result always includes the anchor's own box and is clamped to the
/// anchor's column. `None` when no candidate node qualifies (figures and
/// generic regions) — for tables a conservative fixed-height box below the
/// anchor stands in instead, since a caption strongly implies content.
pub fn estimate_from_text_layout(
    anchor: &RectBounds,
    nodes: &[TextNode],
    kind: RegionKind,
    layer: &RectBounds,
    settings: &TextLayoutSettings,
) -> Option<RectBounds> {
    let content = match kind {
        RegionKind::Table => table_content_bounds(anchor, nodes, settings),
        RegionKind::Figure => {
            radial_content_bounds(anchor, nodes, settings.figure_vertical_reach, settings)?
        }
        RegionKind::Generic => {
            radial_content_bounds(anchor, nodes, settings.generic_vertical_reach, settings)?
        }
    };

    let bounds = content.union(anchor);

    // Clamp to the anchor's column so a wide net never crosses into the
    // neighbouring column.
    let split = column_split(nodes, &settings.roi);
    let (start, end) = column_span(anchor.left, split, layer);
    let left = bounds.left.max(start);
    let right = bounds.right().min(end);
    Some(RectBounds::new(left, bounds.top, right - left, bounds.height))
}

/// Vertical span of cell-like nodes below the anchor, or the fallback box.
fn table_content_bounds(
    anchor: &RectBounds,
    nodes: &[TextNode],
    settings: &TextLayoutSettings,
) -> RectBounds {
    let candidates: Vec<&TextNode> = nodes
        .iter()
        .filter(|n| {
            n.bounds.top > anchor.bottom()
                && (n.bounds.left - anchor.left).abs() <= settings.horizontal_reach
                && is_cell_like(&n.text, settings)
        })
        .collect();

    if candidates.is_empty() {
        return RectBounds::new(
            anchor.left,
            anchor.bottom(),
            anchor.width,
            settings.fallback_height,
        );
    }

    let mut bounds = candidates[0].bounds;
    for node in &candidates[1..] {
        bounds = bounds.union(&node.bounds);
    }
    RectBounds::new(
        bounds.left,
        bounds.top - settings.vertical_pad,
        bounds.width,
        bounds.height + 2.0 * settings.vertical_pad,
    )
}

/// Union of nodes within a radial reach of the anchor center; `None` when
/// nothing falls inside the net.
fn radial_content_bounds(
    anchor: &RectBounds,
    nodes: &[TextNode],
    vertical_reach: f64,
    settings: &TextLayoutSettings,
) -> Option<RectBounds> {
    let horizontal_reach = vertical_reach * settings.horizontal_reach_ratio;
    let (cx, cy) = (anchor.center_x(), anchor.center_y());

    let mut bounds: Option<RectBounds> = None;
    for node in nodes {
        let dx = (node.bounds.center_x() - cx).abs();
        let dy = (node.bounds.center_y() - cy).abs();
        if dx <= horizontal_reach && dy <= vertical_reach {
            bounds = Some(match bounds {
                Some(b) => b.union(&node.bounds),
                None => node.bounds,
            });
        }
    }
    bounds
}

/// Heuristic for table cell content as opposed to prose: short, and either
/// numeric-leaning or very few words.
fn is_cell_like(text: &str, settings: &TextLayoutSettings) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().count() > settings.max_cell_text_len {
        return false;
    }
    let words = trimmed.split_whitespace().count();
    if words <= settings.max_cell_words {
        return true;
    }
    let total = trimmed.chars().filter(|c| !c.is_whitespace()).count();
    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    total > 0 && digits as f64 / total as f64 >= settings.min_digit_fraction
}
