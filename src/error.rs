// src/error.rs

use thiserror::Error;

/// Errors raised by the scene layer.
///
/// Missing detections, teams and transforms are not errors: entity
/// accessors return `None` for those.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid geometry: expected at least {expected} points, got {got}")]
    InvalidGeometry { expected: usize, got: usize },

    #[error("Shape mismatch: expected {expected:?} (h, w), got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    MotionEstimation(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
