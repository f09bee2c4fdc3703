// src/lib.rs
//
// Scene model for broadcast football video: turns per-frame tracked
// detections into players, referee and ball, keeps their coordinates
// comparable across frames through camera-motion compensation, and
// computes player ↔ ball relations for possession logic downstream.

pub mod analysis;
pub mod config;
pub mod detection;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod pipeline;
pub mod types;

pub use crate::config::init_tracing;
pub use crate::detection::{Detection, DetectionData, ObjectClass, TrackerId};
pub use crate::entities::{Ball, Entity, Player, Referee, Team, TeamRef, TeamRegistry};
pub use crate::error::{Result, SceneError};
pub use crate::motion::{CoordinateTransform, ExclusionMask, MotionCompensator, MotionEstimator};
pub use crate::pipeline::{FrameContext, ScenePipeline};
pub use crate::types::{Frame, MotionConfig, OverlayRegion, Point, Rgb, SceneConfig};
