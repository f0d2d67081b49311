//! Per-page input bundle and query parameters.
//!
//! [`PageSnapshot`] gathers what the collaborators supply for one page: the
//! rasterized pixels (optional — capture can be unavailable), the layer's
//! on-screen rectangle, and the positions of every text node. [`RegionQuery`]
//! carries the per-request state explicitly: the anchor, the region kind,
//! and an optional active vertical span — no ambient lookups.

use tablescout_core::{PixelBuffer, RectBounds, RegionKind, TextNode};

use crate::error::DetectorError;

/// Everything the detector consumes for a single page.
#[derive(Debug, Clone, Copy)]
pub struct PageSnapshot<'a> {
    pixels: Option<PixelBuffer<'a>>,
    layer: RectBounds,
    text_nodes: &'a [TextNode],
}

impl<'a> PageSnapshot<'a> {
    /// Bundle the page inputs, validating the layer rectangle.
    pub fn new(
        pixels: Option<PixelBuffer<'a>>,
        layer: RectBounds,
        text_nodes: &'a [TextNode],
    ) -> Result<Self, DetectorError> {
        if layer.width <= 0.0 || layer.height <= 0.0 {
            return Err(DetectorError::DegenerateLayer {
                width: layer.width,
                height: layer.height,
            });
        }
        Ok(Self {
            pixels,
            layer,
            text_nodes,
        })
    }

    /// The page's pixel buffer, when one was captured.
    pub fn pixels(&self) -> Option<&PixelBuffer<'a>> {
        self.pixels.as_ref()
    }

    /// The layer's on-screen rectangle.
    pub fn layer(&self) -> &RectBounds {
        &self.layer
    }

    /// All positioned text nodes on the page.
    pub fn text_nodes(&self) -> &'a [TextNode] {
        self.text_nodes
    }
}

/// Per-request parameters, threaded explicitly into the detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionQuery {
    /// The label's on-screen box, when a label was located.
    pub anchor: Option<RectBounds>,
    /// What kind of region the label refers to.
    pub kind: RegionKind,
    /// Optional vertical `(top, bottom)` layer-space clamp when the caller
    /// knows the currently active page range.
    pub active_span: Option<(f64, f64)>,
}

impl RegionQuery {
    /// Query for a table anchored at `anchor`.
    pub fn table(anchor: RectBounds) -> Self {
        Self {
            anchor: Some(anchor),
            kind: RegionKind::Table,
            active_span: None,
        }
    }

    /// Query for a figure anchored at `anchor`.
    pub fn figure(anchor: RectBounds) -> Self {
        Self {
            anchor: Some(anchor),
            kind: RegionKind::Figure,
            active_span: None,
        }
    }
}
