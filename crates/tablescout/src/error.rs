//! Error types for the facade layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Detection outcomes are
//! never errors — `None` means "not confident". [`DetectorError`] covers
//! caller contract violations only.

use tablescout_core::BufferError;
use thiserror::Error;

/// Fatal errors from assembling a detection run.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// The supplied pixel data contradicts its declared geometry.
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// The layer's on-screen rectangle has no usable area, so no coordinate
    /// mapping between layer and pixel space exists.
    #[error("degenerate layer rectangle: {width}x{height}")]
    DegenerateLayer {
        /// Declared layer width.
        width: f64,
        /// Declared layer height.
        height: f64,
    },
}
