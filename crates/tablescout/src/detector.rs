//! The detection orchestrator.
//!
//! [`RegionDetector`] runs the configured strategy chain over a page
//! snapshot. The raster strategy is the full pixel pipeline: ROI selection,
//! ruling-line scan, lattice search with density fallback, boundary
//! refinement, and the mapping back into layer coordinates. The text-layout
//! strategy delegates to the estimator in tablescout-core.

use log::{debug, trace};

use tablescout_core::{
    DensitySettings, LatticeSettings, LineSettings, PixelBox, PixelBuffer, RectBounds,
    RefineSettings, RoiSettings, ScaleMap, TextLayoutSettings, column_split, detect_lines,
    estimate_from_text_layout, infer_box, largest_cell, refine, search_window,
};

use crate::events::{DetectionEvent, EventSink, NullSink};
use crate::snapshot::{PageSnapshot, RegionQuery};
use crate::strategy::DetectionStrategy;

/// Aggregated configuration for every pipeline stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorSettings {
    /// Ruling-line detection thresholds.
    pub lines: LineSettings,
    /// Lattice (line-pair) search thresholds.
    pub lattice: LatticeSettings,
    /// Density-fallback thresholds.
    pub density: DensitySettings,
    /// ROI and column-analysis thresholds.
    pub roi: RoiSettings,
    /// Boundary-refinement thresholds.
    pub refine: RefineSettings,
    /// Text-layout estimator thresholds.
    pub text_layout: TextLayoutSettings,
    /// Ordered strategy chain; the first confident result wins.
    pub strategies: Vec<DetectionStrategy>,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            lines: LineSettings::default(),
            lattice: LatticeSettings::default(),
            density: DensitySettings::default(),
            roi: RoiSettings::default(),
            refine: RefineSettings::default(),
            text_layout: TextLayoutSettings::default(),
            strategies: DetectionStrategy::default_chain(),
        }
    }
}

/// Region-boundary detector over rendered document pages.
///
/// Stateless apart from its settings: every call is a pure function of the
/// snapshot and query, safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct RegionDetector {
    settings: DetectorSettings,
}

impl RegionDetector {
    pub fn new(settings: DetectorSettings) -> Self {
        Self { settings }
    }

    /// Current settings.
    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    /// Run the strategy chain; `None` means "not confident, draw nothing".
    pub fn detect(&self, page: &PageSnapshot<'_>, query: &RegionQuery) -> Option<RectBounds> {
        self.detect_with_sink(page, query, &NullSink)
    }

    /// Like [`detect`](Self::detect), emitting typed progress events.
    pub fn detect_with_sink(
        &self,
        page: &PageSnapshot<'_>,
        query: &RegionQuery,
        sink: &dyn EventSink,
    ) -> Option<RectBounds> {
        sink.emit(DetectionEvent::Started);

        for &strategy in &self.settings.strategies {
            sink.emit(DetectionEvent::StrategyAttempted(strategy));
            let result = match strategy {
                DetectionStrategy::Raster => self.detect_raster(page, query),
                DetectionStrategy::TextLayout => self.detect_text_layout(page, query),
            };
            match result {
                Some(bounds) => {
                    debug!("RegionDetector::detect resolved via {strategy:?}: {bounds:?}");
                    sink.emit(DetectionEvent::Resolved(bounds));
                    return Some(bounds);
                }
                None => {
                    debug!("RegionDetector::detect {strategy:?} missed");
                    sink.emit(DetectionEvent::StrategyMissed(strategy));
                }
            }
        }

        sink.emit(DetectionEvent::Unresolved);
        None
    }

    /// Detect independent page/query pairs in parallel.
    #[cfg(feature = "parallel")]
    pub fn detect_batch(
        &self,
        jobs: &[(PageSnapshot<'_>, RegionQuery)],
    ) -> Vec<Option<RectBounds>> {
        use rayon::prelude::*;
        jobs.par_iter()
            .map(|(page, query)| self.detect(page, query))
            .collect()
    }

    /// Pixel pipeline: ROI → lines → lattice/density → refine → layer space.
    fn detect_raster(&self, page: &PageSnapshot<'_>, query: &RegionQuery) -> Option<RectBounds> {
        let pixels = page.pixels()?;
        let layer = page.layer();
        let map = ScaleMap::new(layer, pixels.width(), pixels.height());

        let split = column_split(page.text_nodes(), &self.settings.roi);
        let window_layer = match &query.anchor {
            Some(anchor) => {
                search_window(anchor, layer, split, query.active_span, &self.settings.roi)
            }
            None => full_page_window(layer, query.active_span),
        };
        let window_px = map.layer_to_pixel(&window_layer)?;
        trace!("raster: window {window_layer:?} -> {window_px:?}");

        let (roi_data, roi_width, roi_height) = pixels.extract(&window_px)?;
        let roi = PixelBuffer::new(&roi_data, roi_width, roi_height).ok()?;

        let lines = detect_lines(&roi, &self.settings.lines);
        debug!(
            "raster: {} horizontal / {} vertical ruling lines in {}x{} window",
            lines.horizontal.len(),
            lines.vertical.len(),
            roi_width,
            roi_height
        );

        let candidate = largest_cell(&lines, roi_width, roi_height, &self.settings.lattice)
            .or_else(|| {
                debug!("raster: lattice missed, trying density inference");
                infer_box(&roi, &lines, &self.settings.density)
            })?;
        trace!("raster: candidate {candidate:?}");

        let anchor_px = query
            .anchor
            .as_ref()
            .and_then(|a| roi_local_box(&map, a, &window_px, roi_width, roi_height));
        let column_end = match (split, &query.anchor) {
            (Some(s), Some(anchor)) if anchor.left < s => {
                Some(map.x_to_pixels(s - window_layer.left).min(roi_width))
            }
            _ => None,
        };

        let refined = refine(candidate, &roi, anchor_px, column_end, &self.settings.refine)?;
        trace!("raster: refined {refined:?}");

        let absolute = refined.offset(window_px.left, window_px.top);
        let bounds = map.pixel_to_layer(&absolute);

        // The pixel grid quantizes the anchor's left edge downward, which
        // would put the overlay left of the caption under non-unit scales.
        // Re-lock the left edge in layer space, where it can be exact.
        match &query.anchor {
            Some(anchor) => {
                let right = bounds.right();
                if right <= anchor.left {
                    return None;
                }
                Some(RectBounds::new(
                    anchor.left,
                    bounds.top,
                    right - anchor.left,
                    bounds.height,
                ))
            }
            None => Some(bounds),
        }
    }

    /// Text-layout strategy; requires an anchor to reason from.
    fn detect_text_layout(
        &self,
        page: &PageSnapshot<'_>,
        query: &RegionQuery,
    ) -> Option<RectBounds> {
        let anchor = query.anchor.as_ref()?;
        estimate_from_text_layout(
            anchor,
            page.text_nodes(),
            query.kind,
            page.layer(),
            &self.settings.text_layout,
        )
    }
}

/// Anchor-less window: the whole layer, clamped by the active span.
fn full_page_window(layer: &RectBounds, active_span: Option<(f64, f64)>) -> RectBounds {
    let mut top = layer.top;
    let mut bottom = layer.bottom();
    if let Some((span_top, span_bottom)) = active_span {
        top = top.max(span_top);
        bottom = bottom.min(span_bottom);
    }
    RectBounds::new(layer.left, top, layer.width, bottom - top)
}

/// Translate a layer rectangle into ROI-local pixel coordinates.
fn roi_local_box(
    map: &ScaleMap,
    rect: &RectBounds,
    window: &PixelBox,
    roi_width: usize,
    roi_height: usize,
) -> Option<PixelBox> {
    let px = map.layer_to_pixel(rect)?;
    PixelBox::new(
        px.left.saturating_sub(window.left),
        px.top.saturating_sub(window.top),
        px.right.saturating_sub(window.left).min(roi_width),
        px.bottom.saturating_sub(window.top).min(roi_height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DetectionEvent;
    use std::cell::RefCell;
    use tablescout_core::TextNode;

    struct RecordingSink(RefCell<Vec<DetectionEvent>>);

    impl EventSink for RecordingSink {
        fn emit(&self, event: DetectionEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    fn layer() -> RectBounds {
        RectBounds::new(0.0, 0.0, 400.0, 300.0)
    }

    #[test]
    fn default_settings_carry_default_chain() {
        let detector = RegionDetector::default();
        assert_eq!(
            detector.settings().strategies,
            DetectionStrategy::default_chain()
        );
    }

    #[test]
    fn no_pixels_falls_through_to_text_layout() {
        // With no buffer the raster strategy misses; the table estimator's
        // fallback box still resolves the query.
        let page = PageSnapshot::new(None, layer(), &[]).unwrap();
        let query = RegionQuery::table(RectBounds::new(40.0, 50.0, 80.0, 14.0));

        let sink = RecordingSink(RefCell::new(Vec::new()));
        let result = RegionDetector::default().detect_with_sink(&page, &query, &sink);
        assert!(result.is_some());

        let events = sink.0.into_inner();
        assert_eq!(events[0], DetectionEvent::Started);
        assert_eq!(
            events[1],
            DetectionEvent::StrategyAttempted(DetectionStrategy::Raster)
        );
        assert_eq!(
            events[2],
            DetectionEvent::StrategyMissed(DetectionStrategy::Raster)
        );
        assert_eq!(
            events[3],
            DetectionEvent::StrategyAttempted(DetectionStrategy::TextLayout)
        );
        assert!(matches!(events[4], DetectionEvent::Resolved(_)));
    }

    #[test]
    fn unresolved_when_every_strategy_misses() {
        // No pixels and no anchor: neither strategy can produce anything.
        let nodes: Vec<TextNode> = Vec::new();
        let page = PageSnapshot::new(None, layer(), &nodes).unwrap();
        let query = RegionQuery::default();

        let sink = RecordingSink(RefCell::new(Vec::new()));
        let result = RegionDetector::default().detect_with_sink(&page, &query, &sink);
        assert!(result.is_none());
        assert_eq!(
            sink.0.into_inner().last(),
            Some(&DetectionEvent::Unresolved)
        );
    }

    #[test]
    fn empty_chain_is_unresolved() {
        let settings = DetectorSettings {
            strategies: Vec::new(),
            ..DetectorSettings::default()
        };
        let page = PageSnapshot::new(None, layer(), &[]).unwrap();
        let query = RegionQuery::table(RectBounds::new(40.0, 50.0, 80.0, 14.0));
        assert!(RegionDetector::new(settings).detect(&page, &query).is_none());
    }
}
