// src/motion/mask.rs
//
// Exclusion mask handed to the motion estimator alongside each frame.
//
// Players and the ball move independently of the camera; feature points on
// them drag the estimate toward their motion. Broadcast graphics (scoreboard,
// logo) are glued to the screen and look perfectly static, which pulls the
// estimate toward "camera did not move". Both are zeroed out.
//
// Layout matches the frame: shape (height, width), 1 = keep, 0 = exclude.

use crate::detection::{DenseMask, Detection};
use crate::error::{Result, SceneError};
use crate::types::{Frame, MotionConfig, OverlayRegion};
use ndarray::{s, Array2, Axis};
use tracing::debug;

pub const KEEP: u8 = 1;
pub const EXCLUDE: u8 = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct ExclusionMask {
    data: Array2<u8>,
}

impl ExclusionMask {
    pub fn all_keep(height: usize, width: usize) -> Self {
        Self {
            data: Array2::from_elem((height, width), KEEP),
        }
    }

    /// (height, width)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn as_array(&self) -> &Array2<u8> {
        &self.data
    }

    pub fn is_kept(&self, x: usize, y: usize) -> bool {
        self.data.get((y, x)).map_or(false, |&v| v == KEEP)
    }

    pub fn excluded_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == EXCLUDE).count()
    }

    /// Zero out `[x0, x1) × [y0, y1)`, clipped to the mask
    fn exclude_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        let (h, w) = self.shape();
        let (x1, y1) = (x1.min(w), y1.min(h));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        self.data.slice_mut(s![y0..y1, x0..x1]).fill(EXCLUDE);
    }

    fn exclude_where(&mut self, footprint: &DenseMask) {
        ndarray::Zip::from(&mut self.data)
            .and(footprint)
            .for_each(|m, &hit| {
                if hit {
                    *m = EXCLUDE;
                }
            });
    }

    /// Copy of `frame` with every excluded pixel blacked out
    pub fn apply(&self, frame: &Frame) -> Result<Frame> {
        let expected_len = frame.width * frame.height * frame.channels;
        if frame.shape() != self.shape() || frame.data.len() != expected_len {
            return Err(SceneError::ShapeMismatch {
                expected: self.shape(),
                got: frame.shape(),
            });
        }

        let mut masked = frame.clone();
        let row_bytes = frame.width * frame.channels;
        for ((y, x), &v) in self.data.indexed_iter() {
            if v == EXCLUDE {
                let start = y * row_bytes + x * frame.channels;
                masked.data[start..start + frame.channels].fill(0);
            }
        }
        Ok(masked)
    }
}

/// Build the mask for one frame from that same frame's detections.
///
/// Each detection's footprint (its dense mask when present, else its pixel
/// bounds) is grown by `config.margin_px` on every side. Enabled overlays are
/// excluded whether or not anything was detected.
pub fn build_exclusion_mask<'a, I>(
    frame_shape: (usize, usize),
    detections: I,
    config: &MotionConfig,
) -> Result<ExclusionMask>
where
    I: IntoIterator<Item = &'a Detection>,
{
    let (height, width) = frame_shape;
    if height == 0 || width == 0 {
        return Err(SceneError::ShapeMismatch {
            expected: (height.max(1), width.max(1)),
            got: frame_shape,
        });
    }

    let mut mask = ExclusionMask::all_keep(height, width);
    let margin = config.margin_px;
    let mut foreground = 0usize;

    for det in detections {
        match det.data.mask.as_ref() {
            Some(dense) => {
                if dense.dim() != frame_shape {
                    return Err(SceneError::ShapeMismatch {
                        expected: frame_shape,
                        got: dense.dim(),
                    });
                }
                mask.exclude_where(&dilate(dense, margin));
            }
            None => {
                let Some([xmin, ymin, xmax, ymax]) = det.bounds() else {
                    continue;
                };
                let x0 = grow_down(xmin, margin);
                let y0 = grow_down(ymin, margin);
                let x1 = grow_up(xmax, margin);
                let y1 = grow_up(ymax, margin);
                mask.exclude_rect(x0, y0, x1, y1);
            }
        }
        foreground += 1;
    }

    for overlay in config.overlays.iter().filter(|o| o.enabled) {
        exclude_overlay(&mut mask, overlay);
    }

    debug!(
        "Exclusion mask {}x{}: {} detections, {} px excluded",
        width,
        height,
        foreground,
        mask.excluded_count()
    );

    Ok(mask)
}

fn exclude_overlay(mask: &mut ExclusionMask, overlay: &OverlayRegion) {
    mask.exclude_rect(overlay.x1, overlay.y1, overlay.x2, overlay.y2);
}

fn grow_down(v: f32, margin: usize) -> usize {
    (v.floor() - margin as f32).max(0.0) as usize
}

fn grow_up(v: f32, margin: usize) -> usize {
    (v.ceil() + margin as f32).max(0.0) as usize
}

/// Square dilation with a `(2r + 1)` window, done as two 1-D passes.
pub fn dilate(mask: &DenseMask, radius: usize) -> DenseMask {
    if radius == 0 {
        return mask.clone();
    }
    let horizontal = dilate_axis(mask, Axis(1), radius);
    dilate_axis(&horizontal, Axis(0), radius)
}

fn dilate_axis(mask: &DenseMask, axis: Axis, radius: usize) -> DenseMask {
    let mut out = DenseMask::from_elem(mask.dim(), false);

    for (lane_in, mut lane_out) in mask.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        let n = lane_in.len();
        // prefix[i] = number of set cells in lane_in[..i]
        let mut prefix = vec![0usize; n + 1];
        for (i, &v) in lane_in.iter().enumerate() {
            prefix[i + 1] = prefix[i] + usize::from(v);
        }
        for i in 0..n {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius + 1).min(n);
            lane_out[i] = prefix[hi] > prefix[lo];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ObjectClass;
    use proptest::prelude::*;

    fn no_overlays(margin_px: usize) -> MotionConfig {
        MotionConfig {
            margin_px,
            overlays: vec![],
        }
    }

    fn player(bbox: [f32; 4]) -> Detection {
        Detection::from_bbox(bbox, ObjectClass::Player)
    }

    #[test]
    fn test_no_detections_only_overlays_excluded() {
        let config = MotionConfig {
            margin_px: 40,
            overlays: vec![
                OverlayRegion::new("a", 0, 0, 10, 5),
                OverlayRegion::new("b", 90, 40, 100, 50),
            ],
        };
        let mask = build_exclusion_mask((50, 100), std::iter::empty(), &config).unwrap();

        assert_eq!(mask.shape(), (50, 100));
        assert_eq!(mask.excluded_count(), 10 * 5 + 10 * 10);
        assert!(!mask.is_kept(0, 0));
        assert!(!mask.is_kept(99, 49));
        assert!(mask.is_kept(50, 25));
    }

    #[test]
    fn test_default_overlays_on_broadcast_frame() {
        let config = MotionConfig::default();
        let mask = build_exclusion_mask((1080, 1920), std::iter::empty(), &config).unwrap();

        let expected: usize = config.overlays.iter().map(|o| o.area()).sum();
        assert_eq!(mask.excluded_count(), expected);
        assert!(!mask.is_kept(400, 100)); // scoreboard
        assert!(!mask.is_kept(1700, 120)); // logo
        assert!(mask.is_kept(960, 540));
    }

    #[test]
    fn test_disabled_overlay_ignored() {
        let mut overlay = OverlayRegion::new("off", 0, 0, 10, 10);
        overlay.enabled = false;
        let config = MotionConfig {
            margin_px: 0,
            overlays: vec![overlay],
        };
        let mask = build_exclusion_mask((20, 20), std::iter::empty(), &config).unwrap();
        assert_eq!(mask.excluded_count(), 0);
    }

    #[test]
    fn test_box_footprint_grows_by_margin() {
        let det = player([20.0, 20.0, 30.0, 30.0]);
        let mask = build_exclusion_mask((100, 100), [&det], &no_overlays(5)).unwrap();

        // [15, 35) on both axes
        assert_eq!(mask.excluded_count(), 20 * 20);
        assert!(!mask.is_kept(15, 15));
        assert!(!mask.is_kept(34, 34));
        assert!(mask.is_kept(35, 35));
        assert!(mask.is_kept(14, 20));
    }

    #[test]
    fn test_box_clipped_at_frame_edge() {
        let det = player([-10.0, -10.0, 3.0, 3.0]);
        let mask = build_exclusion_mask((10, 10), [&det], &no_overlays(2)).unwrap();
        assert_eq!(mask.excluded_count(), 5 * 5);
    }

    #[test]
    fn test_dense_mask_footprint() {
        let mut dense = DenseMask::from_elem((20, 20), false);
        dense[[10, 10]] = true;
        let det = player([0.0, 0.0, 19.0, 19.0]).with_mask(dense);

        let mask = build_exclusion_mask((20, 20), [&det], &no_overlays(2)).unwrap();
        assert_eq!(mask.excluded_count(), 5 * 5);
        assert!(!mask.is_kept(8, 12));
        assert!(mask.is_kept(7, 10));
    }

    #[test]
    fn test_dense_mask_shape_mismatch() {
        let det = player([0.0, 0.0, 5.0, 5.0]).with_mask(DenseMask::from_elem((10, 10), true));
        let err = build_exclusion_mask((20, 20), [&det], &no_overlays(0)).unwrap_err();
        assert!(matches!(
            err,
            SceneError::ShapeMismatch {
                expected: (20, 20),
                got: (10, 10)
            }
        ));
    }

    #[test]
    fn test_zero_sized_frame_rejected() {
        let err = build_exclusion_mask((0, 640), std::iter::empty(), &no_overlays(0)).unwrap_err();
        assert!(matches!(err, SceneError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_apply_blacks_out_excluded_pixels() {
        let config = MotionConfig {
            margin_px: 0,
            overlays: vec![OverlayRegion::new("corner", 0, 0, 1, 1)],
        };
        let mask = build_exclusion_mask((2, 2), std::iter::empty(), &config).unwrap();
        let frame = Frame::new(vec![9; 2 * 2 * 3], 2, 2, 3);

        let masked = mask.apply(&frame).unwrap();
        assert_eq!(&masked.data[..3], &[0, 0, 0]);
        assert!(masked.data[3..].iter().all(|&b| b == 9));

        let wrong = Frame::blank(3, 2, 3);
        assert!(mask.apply(&wrong).is_err());
    }

    #[test]
    fn test_apply_rejects_short_buffer() {
        let mask = ExclusionMask::all_keep(2, 2);
        let frame = Frame::new(vec![9; 5], 2, 2, 3);
        assert!(matches!(
            mask.apply(&frame).unwrap_err(),
            SceneError::ShapeMismatch {
                expected: (2, 2),
                got: (2, 2)
            }
        ));
    }

    #[test]
    fn test_dilate_radius_zero_is_identity() {
        let mut dense = DenseMask::from_elem((4, 4), false);
        dense[[1, 2]] = true;
        assert_eq!(dilate(&dense, 0), dense);
    }

    proptest! {
        #[test]
        fn prop_excluded_area_monotonic_in_margin(
            boxes in proptest::collection::vec(
                (0.0f32..200.0, 0.0f32..120.0, 1.0f32..40.0, 1.0f32..40.0),
                1..6,
            ),
            margin in 0usize..30,
        ) {
            let detections: Vec<Detection> = boxes
                .iter()
                .map(|&(x, y, w, h)| player([x, y, x + w, y + h]))
                .collect();

            let smaller = build_exclusion_mask((120, 200), &detections, &no_overlays(margin)).unwrap();
            let larger = build_exclusion_mask((120, 200), &detections, &no_overlays(margin + 1)).unwrap();

            prop_assert!(larger.excluded_count() >= smaller.excluded_count());
            // Everything excluded at the smaller margin stays excluded
            for ((y, x), &v) in smaller.as_array().indexed_iter() {
                if v == EXCLUDE {
                    prop_assert!(!larger.is_kept(x, y));
                }
            }
        }
    }
}
