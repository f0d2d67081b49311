//! Geometry primitives shared across the detection pipeline.
//!
//! Two coordinate spaces coexist: **pixel space** (integer coordinates inside
//! a rasterized buffer) and **layer space** (the f64 coordinates of the page
//! layer the caller renders overlays into). [`ScaleMap`] converts between them.

/// Axis-aligned rectangle in pixel-buffer coordinates.
///
/// Every constructor in this crate upholds `right > left && bottom > top`;
/// a candidate that cannot satisfy the invariant is dropped (the caller
/// observes `None`) rather than returned in a degenerate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelBox {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl PixelBox {
    /// Build a box, returning `None` when the edges are degenerate or inverted.
    pub fn new(left: usize, top: usize, right: usize, bottom: usize) -> Option<Self> {
        if right > left && bottom > top {
            Some(Self {
                left,
                top,
                right,
                bottom,
            })
        } else {
            None
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.right - self.left
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    /// Area in pixels.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Translate by an offset (e.g. ROI-local coordinates back to buffer coordinates).
    pub fn offset(&self, dx: usize, dy: usize) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

/// Rectangle in page-layer coordinates: `{left, top, width, height}`.
///
/// Serves both as the detector's output type and as the anchor input
/// (the known on-screen box of the label that seeded the search).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl RectBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Right edge (`left + width`).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &RectBounds) -> RectBounds {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        RectBounds::new(left, top, right - left, bottom - top)
    }

    /// Expand every edge outward by `amount` (clamped to non-negative size).
    pub fn pad(&self, amount: f64) -> RectBounds {
        RectBounds::new(
            self.left - amount,
            self.top - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// Whether the point `(x, y)` lies inside (edges inclusive).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Independent x/y scale factors between layer units and pixel units.
///
/// The factors are `buffer_dim / layer_dim`, applied forward when building
/// the pixel-space search window and in reverse when translating the final
/// detected box back into layer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMap {
    sx: f64,
    sy: f64,
    layer_left: f64,
    layer_top: f64,
    buffer_width: usize,
    buffer_height: usize,
}

impl ScaleMap {
    /// Derive the mapping from the layer's on-screen rectangle and the
    /// pixel buffer's dimensions. The layer rectangle must be non-degenerate;
    /// the facade validates that before constructing a map.
    pub fn new(layer: &RectBounds, buffer_width: usize, buffer_height: usize) -> Self {
        Self {
            sx: buffer_width as f64 / layer.width,
            sy: buffer_height as f64 / layer.height,
            layer_left: layer.left,
            layer_top: layer.top,
            buffer_width,
            buffer_height,
        }
    }

    /// Layer rectangle → pixel box, clamped to the buffer. `None` when the
    /// rectangle falls entirely outside the buffer or rounds to zero size.
    pub fn layer_to_pixel(&self, rect: &RectBounds) -> Option<PixelBox> {
        let left = ((rect.left - self.layer_left) * self.sx).floor().max(0.0) as usize;
        let top = ((rect.top - self.layer_top) * self.sy).floor().max(0.0) as usize;
        let right = (((rect.right() - self.layer_left) * self.sx).ceil().max(0.0) as usize)
            .min(self.buffer_width);
        let bottom = (((rect.bottom() - self.layer_top) * self.sy).ceil().max(0.0) as usize)
            .min(self.buffer_height);
        PixelBox::new(left, top, right, bottom)
    }

    /// Pixel box → layer rectangle (the reverse mapping).
    pub fn pixel_to_layer(&self, region: &PixelBox) -> RectBounds {
        let left = self.layer_left + region.left as f64 / self.sx;
        let top = self.layer_top + region.top as f64 / self.sy;
        RectBounds::new(
            left,
            top,
            region.width() as f64 / self.sx,
            region.height() as f64 / self.sy,
        )
    }

    /// Layer-space x distance expressed in pixels.
    pub fn x_to_pixels(&self, dx: f64) -> usize {
        (dx * self.sx).round().max(0.0) as usize
    }
}
