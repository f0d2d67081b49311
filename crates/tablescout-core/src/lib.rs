//! tablescout-core: Backend-independent data types and algorithms.
//!
//! This crate provides the geometry primitives (PixelBox, RectBounds,
//! ScaleMap), the pixel-buffer view, and the pure detection algorithms
//! (ruling-line scan, lattice search, density inference, ROI selection,
//! boundary refinement, text-layout estimation, label search) used by
//! tablescout-rs. Every function here is deterministic and side-effect
//! free; "nothing found" is `None`, never an error.

pub mod density;
pub mod error;
pub mod geometry;
pub mod labels;
pub mod lattice;
pub mod lines;
pub mod pixels;
pub mod refine;
pub mod roi;
pub mod text;
pub mod text_layout;

pub use density::{DensityRun, DensitySettings, infer_box};
pub use error::BufferError;
pub use geometry::{PixelBox, RectBounds, ScaleMap};
pub use labels::{LabelMatch, LabelSearchOptions, find_all_labels, find_label};
pub use lattice::{LatticeSettings, largest_cell};
pub use lines::{LineSettings, RulingLines, detect_lines};
pub use pixels::PixelBuffer;
pub use refine::{RefineSettings, extend_bottom, refine};
pub use roi::{RoiSettings, column_split, column_span, search_window};
pub use text::TextNode;
pub use text_layout::{RegionKind, TextLayoutSettings, estimate_from_text_layout};
