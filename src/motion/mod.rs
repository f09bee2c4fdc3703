// src/motion/mod.rs
//
// Camera-motion compensation.
//
//   Frame + detections → mask ─→ MotionEstimator (external) ─→ transform
//
// The transform maps this frame's pixel coordinates into a stabilized space
// so positions from different frames can be compared.

pub mod compensator;
pub mod mask;
pub mod transform;

pub use compensator::{MotionCompensator, MotionEstimator};
pub use mask::{build_exclusion_mask, dilate, ExclusionMask};
pub use transform::{CoordinateTransform, HomographyTransform, Matrix3, TranslationTransform};
