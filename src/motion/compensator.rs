// src/motion/compensator.rs
//
// Glue between the frame's detections and the external motion estimator.
// The estimator is a black box: it gets the frame plus an exclusion mask
// and returns a transform we pass through without looking inside.

use super::mask::{build_exclusion_mask, ExclusionMask};
use super::transform::CoordinateTransform;
use crate::detection::Detection;
use crate::error::{Result, SceneError};
use crate::types::{Frame, MotionConfig};
use tracing::debug;

/// Camera-motion estimator, e.g. a feature-tracking homography fitter.
pub trait MotionEstimator {
    type Transform: CoordinateTransform;

    fn update(&mut self, frame: &Frame, mask: &ExclusionMask) -> anyhow::Result<Self::Transform>;
}

#[derive(Debug, Clone, Default)]
pub struct MotionCompensator {
    config: MotionConfig,
}

impl MotionCompensator {
    pub fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn build_mask<'a, I>(
        &self,
        frame_shape: (usize, usize),
        detections: I,
    ) -> Result<ExclusionMask>
    where
        I: IntoIterator<Item = &'a Detection>,
    {
        build_exclusion_mask(frame_shape, detections, &self.config)
    }

    /// Mask this frame's detections and overlays, then ask the estimator
    /// for this frame's transform. Estimator failures come back unchanged
    /// inside `SceneError::MotionEstimation`.
    pub fn update<'a, E, I>(
        &self,
        estimator: &mut E,
        detections: I,
        frame: &Frame,
    ) -> Result<E::Transform>
    where
        E: MotionEstimator,
        I: IntoIterator<Item = &'a Detection>,
    {
        let expected_len = frame.width * frame.height * frame.channels;
        if frame.data.len() != expected_len {
            return Err(SceneError::ShapeMismatch {
                expected: frame.shape(),
                got: (frame.data.len() / (frame.width * frame.channels).max(1), frame.width),
            });
        }

        let mask = self.build_mask(frame.shape(), detections)?;
        if mask.shape() != frame.shape() {
            return Err(SceneError::ShapeMismatch {
                expected: frame.shape(),
                got: mask.shape(),
            });
        }

        let transform = estimator
            .update(frame, &mask)
            .map_err(SceneError::MotionEstimation)?;

        debug!(
            "Motion estimate at {:.0}ms with {} px masked",
            frame.timestamp_ms,
            mask.excluded_count()
        );
        Ok(transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ObjectClass;
    use crate::motion::TranslationTransform;
    use crate::types::{OverlayRegion, Point};

    /// Records what it was handed and replies with a fixed pan
    struct RecordingEstimator {
        seen_masks: Vec<ExclusionMask>,
        fail: bool,
    }

    impl MotionEstimator for RecordingEstimator {
        type Transform = TranslationTransform;

        fn update(
            &mut self,
            _frame: &Frame,
            mask: &ExclusionMask,
        ) -> anyhow::Result<Self::Transform> {
            if self.fail {
                anyhow::bail!("not enough features");
            }
            self.seen_masks.push(mask.clone());
            Ok(TranslationTransform::new(4.0, 0.0))
        }
    }

    fn compensator() -> MotionCompensator {
        MotionCompensator::new(MotionConfig {
            margin_px: 1,
            overlays: vec![OverlayRegion::new("logo", 0, 0, 2, 2)],
        })
    }

    #[test]
    fn test_update_masks_detections_and_returns_transform() {
        let mut estimator = RecordingEstimator {
            seen_masks: vec![],
            fail: false,
        };
        let frame = Frame::blank(20, 10, 3);
        let det = Detection::from_bbox([10.0, 5.0, 12.0, 7.0], ObjectClass::Player);

        let t = compensator().update(&mut estimator, [&det], &frame).unwrap();
        assert_eq!(t.rel_to_abs(Point::new(1.0, 1.0)), Point::new(5.0, 1.0));

        let mask = &estimator.seen_masks[0];
        assert_eq!(mask.shape(), (10, 20));
        assert!(!mask.is_kept(0, 0));
        assert!(!mask.is_kept(9, 4));
        assert!(!mask.is_kept(12, 7));
        assert!(mask.is_kept(15, 5));
    }

    #[test]
    fn test_estimator_error_propagates() {
        let mut estimator = RecordingEstimator {
            seen_masks: vec![],
            fail: true,
        };
        let frame = Frame::blank(20, 10, 3);
        let err = compensator()
            .update(&mut estimator, std::iter::empty(), &frame)
            .unwrap_err();

        assert!(matches!(err, SceneError::MotionEstimation(_)));
        assert_eq!(err.to_string(), "not enough features");
    }

    #[test]
    fn test_truncated_frame_is_shape_mismatch() {
        let mut estimator = RecordingEstimator {
            seen_masks: vec![],
            fail: false,
        };
        let mut frame = Frame::blank(20, 10, 3);
        frame.data.truncate(20 * 3 * 4);

        let err = compensator()
            .update(&mut estimator, std::iter::empty(), &frame)
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::ShapeMismatch {
                expected: (10, 20),
                got: (4, 20)
            }
        ));
        assert!(estimator.seen_masks.is_empty());
    }

    #[test]
    fn test_undersized_buffer_from_constructor_is_shape_mismatch() {
        let mut estimator = RecordingEstimator {
            seen_masks: vec![],
            fail: false,
        };
        let frame = Frame::new(vec![0u8; 10], 20, 10, 3);
        assert_eq!(frame.shape(), (10, 20));

        let err = compensator()
            .update(&mut estimator, std::iter::empty(), &frame)
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::ShapeMismatch {
                expected: (10, 20),
                got: (0, 20)
            }
        ));
        assert!(estimator.seen_masks.is_empty());
    }
}
