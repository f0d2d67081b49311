//! Borrowed view over a rasterized page.
//!
//! [`PixelBuffer`] wraps interleaved RGBA8 samples without copying them.
//! Brightness is the mean of the R, G, B channels (alpha ignored); a pixel is
//! "dark" when its brightness falls below the configured threshold. All
//! detection stages consume darkness through this view, so the definition
//! lives in one place.

use crate::error::BufferError;
use crate::geometry::PixelBox;

/// Immutable view over a page's interleaved RGBA8 samples.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap a raw RGBA slice, validating the declared geometry.
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroDimension { width, height });
        }
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(BufferError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Brightness of the pixel at `(x, y)`: mean of R, G, B.
    pub fn brightness(&self, x: usize, y: usize) -> u8 {
        let i = (y * self.width + x) * 4;
        let sum = self.data[i] as u16 + self.data[i + 1] as u16 + self.data[i + 2] as u16;
        (sum / 3) as u8
    }

    /// Whether the pixel at `(x, y)` is dark under `threshold`.
    pub fn is_dark(&self, x: usize, y: usize, threshold: u8) -> bool {
        self.brightness(x, y) < threshold
    }

    /// Count of dark pixels in row `y` restricted to columns `[left, right)`.
    pub fn row_dark_count(&self, y: usize, left: usize, right: usize, threshold: u8) -> usize {
        (left..right.min(self.width))
            .filter(|&x| self.is_dark(x, y, threshold))
            .count()
    }

    /// Count of dark pixels in column `x` restricted to rows `[top, bottom)`.
    pub fn column_dark_count(&self, x: usize, top: usize, bottom: usize, threshold: u8) -> usize {
        (top..bottom.min(self.height))
            .filter(|&y| self.is_dark(x, y, threshold))
            .count()
    }

    /// Fraction of dark pixels in row `y` within `[left, right)`.
    pub fn row_dark_fraction(&self, y: usize, left: usize, right: usize, threshold: u8) -> f64 {
        let right = right.min(self.width);
        if right <= left {
            return 0.0;
        }
        self.row_dark_count(y, left, right, threshold) as f64 / (right - left) as f64
    }

    /// Copy the samples of `region` into a tightly packed RGBA vector.
    ///
    /// Rows in a borrowed view are not contiguous for a sub-rectangle, so the
    /// facade materializes the ROI once and re-wraps it with [`PixelBuffer::new`].
    /// The region is clamped to the buffer; `None` when nothing remains.
    pub fn extract(&self, region: &PixelBox) -> Option<(Vec<u8>, usize, usize)> {
        let left = region.left.min(self.width);
        let right = region.right.min(self.width);
        let top = region.top.min(self.height);
        let bottom = region.bottom.min(self.height);
        if right <= left || bottom <= top {
            return None;
        }
        let w = right - left;
        let h = bottom - top;
        let mut out = Vec::with_capacity(w * h * 4);
        for y in top..bottom {
            let start = (y * self.width + left) * 4;
            out.extend_from_slice(&self.data[start..start + w * 4]);
        }
        Some((out, w, h))
    }
}
