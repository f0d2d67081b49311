//! Error types for tablescout-core.
//!
//! Detection never fails: "nothing found" is encoded as `None` everywhere.
//! [`BufferError`] covers the one fatal class — a pixel buffer handed in with
//! a declared geometry that does not match its sample count, which is a caller
//! contract violation rather than a detection outcome.

use std::fmt;

/// Fatal errors raised while validating a pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// `data.len()` does not equal `width * height * 4` (RGBA).
    SizeMismatch {
        /// Expected sample count for the declared dimensions.
        expected: usize,
        /// Actual length of the supplied data slice.
        actual: usize,
    },
    /// A declared dimension is zero.
    ZeroDimension {
        /// Declared width in pixels.
        width: usize,
        /// Declared height in pixels.
        height: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::SizeMismatch { expected, actual } => write!(
                f,
                "pixel buffer size mismatch: expected {expected} bytes, got {actual}"
            ),
            BufferError::ZeroDimension { width, height } => {
                write!(f, "pixel buffer has zero dimension: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for BufferError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mismatch_display() {
        let err = BufferError::SizeMismatch {
            expected: 400,
            actual: 399,
        };
        assert_eq!(
            err.to_string(),
            "pixel buffer size mismatch: expected 400 bytes, got 399"
        );
    }

    #[test]
    fn zero_dimension_display() {
        let err = BufferError::ZeroDimension {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "pixel buffer has zero dimension: 0x10");
    }
}
