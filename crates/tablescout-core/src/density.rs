//! Density inference — recover borderless tables from aggregate darkness.
//!
//! Many documents separate columns with whitespace rather than drawn rules,
//! so the lattice search misses them entirely. This fallback counts dark
//! pixels per column and per row, smooths the counts with a sliding mean,
//! and merges contiguous "active" columns into runs; the box spans the
//! outermost runs and whatever vertical extent the signal supports.

use crate::geometry::PixelBox;
use crate::lines::RulingLines;
use crate::pixels::PixelBuffer;

/// Configuration for density-based box inference.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensitySettings {
    /// Brightness below which a pixel counts as dark.
    pub dark_threshold: u8,
    /// Window size for the centered sliding-mean smoothing pass.
    pub smoothing_window: usize,
    /// A column is active when its smoothed dark fraction (of the buffer
    /// height) reaches this value.
    pub active_fraction: f64,
    /// Row-density threshold (fraction of the buffer width) used to infer
    /// the vertical span when fewer than two horizontal lines exist.
    pub row_active_fraction: f64,
    /// Minimum column-run width in pixels.
    pub min_run_px: usize,
    /// Minimum column-run width as a fraction of the buffer width.
    pub min_run_fraction: f64,
    /// The final box must exceed this fraction of the buffer area.
    pub min_box_area_fraction: f64,
    /// Minimum final box width in pixels.
    pub min_box_width_px: usize,
    /// Minimum final box width as a fraction of the buffer width.
    pub min_box_width_fraction: f64,
}

impl Default for DensitySettings {
    fn default() -> Self {
        Self {
            dark_threshold: 180,
            smoothing_window: 9,
            active_fraction: 0.08,
            row_active_fraction: 0.08,
            min_run_px: 8,
            min_run_fraction: 0.02,
            min_box_area_fraction: 0.01,
            min_box_width_px: 15,
            min_box_width_fraction: 0.06,
        }
    }
}

/// A contiguous run of active columns (or rows) with its smoothed mean density.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensityRun {
    /// First index of the run (inclusive).
    pub start: usize,
    /// One past the last index of the run.
    pub end: usize,
    /// Mean smoothed dark fraction over the run.
    pub density: f64,
}

impl DensityRun {
    /// Width of the run.
    pub fn width(&self) -> usize {
        self.end - self.start
    }
}

/// Infer a table box from column/row darkness when the lattice search failed.
///
/// The vertical span comes from detected horizontal lines when at least two
/// exist; otherwise from the first and last row whose dark fraction clears
/// `row_active_fraction`. Returns `None` when the surviving runs are too
/// narrow or the resulting box too small to be a table.
pub fn infer_box(
    buffer: &PixelBuffer<'_>,
    lines: &RulingLines,
    settings: &DensitySettings,
) -> Option<PixelBox> {
    let width = buffer.width();
    let height = buffer.height();

    let column_counts: Vec<usize> = (0..width)
        .map(|x| buffer.column_dark_count(x, 0, height, settings.dark_threshold))
        .collect();
    let smoothed = sliding_mean(&column_counts, settings.smoothing_window);

    let min_active = settings.active_fraction * height as f64;
    let runs = merge_runs(&smoothed, min_active, height as f64);

    let min_run_width = settings
        .min_run_px
        .max((settings.min_run_fraction * width as f64) as usize);
    let runs: Vec<DensityRun> = runs
        .into_iter()
        .filter(|r| r.width() >= min_run_width)
        .collect();

    let first = runs.first()?;
    let last = runs.last()?;

    let (top, bottom) = vertical_span(buffer, lines, settings)?;

    let candidate = PixelBox::new(first.start, top, last.end, bottom)?;

    let min_area = settings.min_box_area_fraction * (width * height) as f64;
    let min_width = settings
        .min_box_width_px
        .max((settings.min_box_width_fraction * width as f64) as usize);
    if candidate.area() as f64 <= min_area || candidate.width() <= min_width {
        return None;
    }
    Some(candidate)
}

/// Vertical extent: horizontal lines when available, row-density scan otherwise.
fn vertical_span(
    buffer: &PixelBuffer<'_>,
    lines: &RulingLines,
    settings: &DensitySettings,
) -> Option<(usize, usize)> {
    if lines.horizontal.len() >= 2 {
        let top = *lines.horizontal.first()?;
        let bottom = *lines.horizontal.last()?;
        return Some((top, bottom));
    }

    let width = buffer.width();
    let min_row = settings.row_active_fraction * width as f64;
    let mut top = None;
    let mut bottom = None;
    for y in 0..buffer.height() {
        let count = buffer.row_dark_count(y, 0, width, settings.dark_threshold);
        if count as f64 >= min_row {
            if top.is_none() {
                top = Some(y);
            }
            bottom = Some(y + 1);
        }
    }
    Some((top?, bottom?))
}

/// Centered sliding mean over `values`, clamping the window at both ends.
fn sliding_mean(values: &[usize], window: usize) -> Vec<f64> {
    let half = window / 2;
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(values.len());
            let sum: usize = values[lo..hi].iter().sum();
            sum as f64 / (hi - lo) as f64
        })
        .collect()
}

/// Merge consecutive indices whose smoothed count reaches `min_active`.
fn merge_runs(smoothed: &[f64], min_active: f64, extent: f64) -> Vec<DensityRun> {
    let mut runs = Vec::new();
    let mut current: Option<(usize, f64)> = None;

    for (i, &value) in smoothed.iter().enumerate() {
        if value >= min_active {
            match current.as_mut() {
                Some((_, sum)) => *sum += value,
                None => current = Some((i, value)),
            }
        } else if let Some((start, sum)) = current.take() {
            runs.push(DensityRun {
                start,
                end: i,
                density: sum / (i - start) as f64 / extent,
            });
        }
    }
    if let Some((start, sum)) = current {
        runs.push(DensityRun {
            start,
            end: smoothed.len(),
            density: sum / (smoothed.len() - start) as f64 / extent,
        });
    }

    runs
}
