//! Ruling-line detection — scan the buffer for long dark runs.
//!
//! A ruling line is a long, continuous run of dark pixels: a drawn table
//! border or column separator. Rows and columns are scanned independently;
//! the run-length thresholds are deliberately asymmetric because horizontal
//! rules in real documents are more reliably continuous than vertical
//! separators (which are often implicit whitespace, not drawn lines).

use crate::pixels::PixelBuffer;

/// Configuration for ruling-line detection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSettings {
    /// Brightness below which a pixel counts as dark (0–255 scale).
    pub dark_threshold: u8,
    /// A row is a horizontal line when its longest dark run exceeds
    /// this fraction of the buffer width.
    pub horizontal_run_fraction: f64,
    /// A column is a vertical line when its longest dark run exceeds
    /// this fraction of the buffer height.
    pub vertical_run_fraction: f64,
}

impl Default for LineSettings {
    fn default() -> Self {
        Self {
            dark_threshold: 180,
            horizontal_run_fraction: 0.20,
            vertical_run_fraction: 0.15,
        }
    }
}

/// Detected ruling lines, ascending in each axis.
///
/// Duplicates collapse naturally because detection samples at integer
/// resolution: each row/column index appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RulingLines {
    /// Y coordinates of horizontal lines.
    pub horizontal: Vec<usize>,
    /// X coordinates of vertical lines.
    pub vertical: Vec<usize>,
}

/// Scan every row and column of `buffer` for ruling lines.
///
/// Pure and total: a buffer with no dark runs yields empty sets.
pub fn detect_lines(buffer: &PixelBuffer<'_>, settings: &LineSettings) -> RulingLines {
    let width = buffer.width();
    let height = buffer.height();
    let h_min_run = settings.horizontal_run_fraction * width as f64;
    let v_min_run = settings.vertical_run_fraction * height as f64;

    let mut lines = RulingLines::default();

    for y in 0..height {
        let run = longest_run((0..width).map(|x| buffer.is_dark(x, y, settings.dark_threshold)));
        if run as f64 > h_min_run {
            lines.horizontal.push(y);
        }
    }

    for x in 0..width {
        let run = longest_run((0..height).map(|y| buffer.is_dark(x, y, settings.dark_threshold)));
        if run as f64 > v_min_run {
            lines.vertical.push(x);
        }
    }

    lines
}

/// Length of the longest consecutive `true` run.
fn longest_run(samples: impl Iterator<Item = bool>) -> usize {
    let mut best = 0;
    let mut current = 0;
    for dark in samples {
        if dark {
            current += 1;
            if current > best {
                best = current;
            }
        } else {
            current = 0;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(width: usize, height: usize) -> Vec<u8> {
        vec![255; width * height * 4]
    }

    fn paint(data: &mut [u8], width: usize, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..y1 {
            for x in x0..x1 {
                let i = (y * width + x) * 4;
                data[i] = 0;
                data[i + 1] = 0;
                data[i + 2] = 0;
            }
        }
    }

    #[test]
    fn default_settings() {
        let s = LineSettings::default();
        assert_eq!(s.dark_threshold, 180);
        assert_eq!(s.horizontal_run_fraction, 0.20);
        assert_eq!(s.vertical_run_fraction, 0.15);
    }

    #[test]
    fn blank_buffer_yields_empty_sets() {
        let data = white(50, 40);
        let buf = PixelBuffer::new(&data, 50, 40).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        assert!(lines.horizontal.is_empty());
        assert!(lines.vertical.is_empty());
    }

    #[test]
    fn full_width_rule_is_horizontal_line() {
        let mut data = white(100, 50);
        paint(&mut data, 100, 0, 10, 100, 11);
        let buf = PixelBuffer::new(&data, 100, 50).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        assert_eq!(lines.horizontal, vec![10]);
        assert!(lines.vertical.is_empty());
    }

    #[test]
    fn tall_rule_is_vertical_line() {
        let mut data = white(100, 50);
        paint(&mut data, 100, 30, 0, 31, 50);
        let buf = PixelBuffer::new(&data, 100, 50).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        assert_eq!(lines.vertical, vec![30]);
        assert!(lines.horizontal.is_empty());
    }

    #[test]
    fn run_must_be_consecutive() {
        // Two 15px dashes in a 100px row: each run is below 0.20 * 100 = 20.
        let mut data = white(100, 50);
        paint(&mut data, 100, 0, 5, 15, 6);
        paint(&mut data, 100, 50, 5, 65, 6);
        let buf = PixelBuffer::new(&data, 100, 50).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        assert!(lines.horizontal.is_empty());
    }

    #[test]
    fn threshold_is_strict() {
        // Run of exactly 0.20 * width must NOT qualify.
        let mut data = white(100, 50);
        paint(&mut data, 100, 0, 20, 20, 21);
        let buf = PixelBuffer::new(&data, 100, 50).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        assert!(lines.horizontal.is_empty());

        // One pixel more does.
        paint(&mut data, 100, 0, 30, 21, 31);
        let buf = PixelBuffer::new(&data, 100, 50).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        assert_eq!(lines.horizontal, vec![30]);
    }

    #[test]
    fn lines_are_ascending() {
        let mut data = white(100, 60);
        paint(&mut data, 100, 0, 40, 100, 41);
        paint(&mut data, 100, 0, 10, 100, 11);
        let buf = PixelBuffer::new(&data, 100, 60).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        assert_eq!(lines.horizontal, vec![10, 40]);
    }

    #[test]
    fn asymmetric_thresholds() {
        // A 17px run in an 80px tall buffer: 17 > 0.15 * 80 = 12 -> vertical
        // line, but the same proportion horizontally (17 of 80 = 0.21 needs
        // > 16) also passes, so check a run that only passes vertically.
        let mut data = white(80, 80);
        paint(&mut data, 80, 5, 10, 6, 24); // 14 tall: > 12, <= 16
        let buf = PixelBuffer::new(&data, 80, 80).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        assert_eq!(lines.vertical, vec![5]);

        let mut data = white(80, 80);
        paint(&mut data, 80, 10, 5, 24, 6); // 14 wide: <= 16 -> no h line
        let buf = PixelBuffer::new(&data, 80, 80).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        assert!(lines.horizontal.is_empty());
    }
}
