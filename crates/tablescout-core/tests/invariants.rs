//! Property tests: every box the pipeline produces satisfies its invariant,
//! no matter what pixels it is fed.

use proptest::prelude::*;

use tablescout_core::{
    DensitySettings, LatticeSettings, LineSettings, PixelBuffer, RefineSettings, detect_lines,
    infer_box, largest_cell, refine,
};

fn buffer_strategy() -> impl Strategy<Value = (Vec<u8>, usize, usize)> {
    (4usize..40, 4usize..40).prop_flat_map(|(w, h)| {
        (
            proptest::collection::vec(any::<u8>(), w * h * 4),
            Just(w),
            Just(h),
        )
    })
}

proptest! {
    #[test]
    fn detected_lines_are_in_bounds_and_ascending((data, w, h) in buffer_strategy()) {
        let buf = PixelBuffer::new(&data, w, h).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        prop_assert!(lines.horizontal.windows(2).all(|p| p[0] < p[1]));
        prop_assert!(lines.vertical.windows(2).all(|p| p[0] < p[1]));
        prop_assert!(lines.horizontal.iter().all(|&y| y < h));
        prop_assert!(lines.vertical.iter().all(|&x| x < w));
    }

    #[test]
    fn lattice_box_satisfies_invariant((data, w, h) in buffer_strategy()) {
        let buf = PixelBuffer::new(&data, w, h).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        if let Some(b) = largest_cell(&lines, w, h, &LatticeSettings::default()) {
            prop_assert!(b.right > b.left);
            prop_assert!(b.bottom > b.top);
            prop_assert!(b.right <= w && b.bottom <= h);
        }
    }

    #[test]
    fn density_box_satisfies_invariant((data, w, h) in buffer_strategy()) {
        let buf = PixelBuffer::new(&data, w, h).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        if let Some(b) = infer_box(&buf, &lines, &DensitySettings::default()) {
            prop_assert!(b.right > b.left);
            prop_assert!(b.bottom > b.top);
            prop_assert!(b.right <= w && b.bottom <= h);
        }
    }

    #[test]
    fn refined_box_satisfies_invariant((data, w, h) in buffer_strategy()) {
        let buf = PixelBuffer::new(&data, w, h).unwrap();
        let lines = detect_lines(&buf, &LineSettings::default());
        let candidate = largest_cell(&lines, w, h, &LatticeSettings::default())
            .or_else(|| infer_box(&buf, &lines, &DensitySettings::default()));
        if let Some(candidate) = candidate {
            if let Some(b) = refine(candidate, &buf, None, None, &RefineSettings::default()) {
                prop_assert!(b.right > b.left);
                prop_assert!(b.bottom > b.top);
                prop_assert!(b.bottom >= candidate.bottom);
            }
        }
    }
}
