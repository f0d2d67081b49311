//! tablescout: Detect table and figure boundaries in rendered document pages.
//!
//! This is the public API facade crate for tablescout-rs. It bundles page
//! inputs into a [`PageSnapshot`], runs an explicit strategy chain
//! (pixel-based detection first, text-layout estimation as the recovery
//! path), and returns `Option<RectBounds>` in the caller's layer
//! coordinates — `None` means "not confident, draw nothing".
//!
//! # Architecture
//!
//! - **tablescout-core**: backend-independent geometry and the pure
//!   detection algorithms
//! - **tablescout** (this crate): orchestration, typed detection events,
//!   and the coordinate mapping between layer and pixel space
//!
//! # Example
//!
//! ```
//! use tablescout::{PageSnapshot, RegionDetector, RegionQuery};
//! use tablescout::core::{RectBounds, TextNode};
//!
//! let nodes = vec![TextNode::new(
//!     "Table 1",
//!     RectBounds::new(40.0, 50.0, 80.0, 14.0),
//! )];
//! let layer = RectBounds::new(0.0, 0.0, 600.0, 800.0);
//! let page = PageSnapshot::new(None, layer, &nodes)?;
//!
//! let query = RegionQuery::table(nodes[0].bounds);
//! let bounds = RegionDetector::default().detect(&page, &query);
//! assert!(bounds.is_some());
//! # Ok::<(), tablescout::DetectorError>(())
//! ```

pub mod detector;
pub mod error;
pub mod events;
pub mod snapshot;
pub mod strategy;

pub use detector::{DetectorSettings, RegionDetector};
pub use error::DetectorError;
pub use events::{ChannelSink, DetectionEvent, EventSink, NullSink};
pub use snapshot::{PageSnapshot, RegionQuery};
pub use strategy::DetectionStrategy;

/// Re-export of the core crate for direct access to types and algorithms.
pub use tablescout_core as core;
