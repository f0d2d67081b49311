//! Positioned text nodes from the page's rendered text layer.

use crate::geometry::RectBounds;

/// A single text node with its on-screen bounds in layer coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextNode {
    /// The node's text content.
    pub text: String,
    /// The node's bounding box in layer coordinates.
    pub bounds: RectBounds,
}

impl TextNode {
    pub fn new(text: impl Into<String>, bounds: RectBounds) -> Self {
        Self {
            text: text.into(),
            bounds,
        }
    }
}
