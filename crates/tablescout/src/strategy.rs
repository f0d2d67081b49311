//! The ordered strategy chain.
//!
//! Fallback is explicit: the detector runs each strategy in the configured
//! order and the first confident result wins, `or_else`-style. The default
//! chain tries the pixel pipeline first and the text-layout estimator when
//! pixels miss (or were never captured).

/// One entry in the detection chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectionStrategy {
    /// Pixel pipeline: ROI → ruling lines → lattice/density → refinement.
    Raster,
    /// Text-layout estimation over sibling node positions; no pixels.
    TextLayout,
}

impl DetectionStrategy {
    /// The default chain: raster first, text layout as the recovery path.
    pub fn default_chain() -> Vec<DetectionStrategy> {
        vec![DetectionStrategy::Raster, DetectionStrategy::TextLayout]
    }
}
