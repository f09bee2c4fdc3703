// src/entities/ball.rs

use super::entity::{Entity, EntityKind};
use super::team::TeamRef;
use crate::detection::Detection;
use crate::geometry;
use crate::types::{Point, Rgb};

/// Tells the ball which team currently has it. The decision itself is
/// made elsewhere.
pub trait PossessionContext {
    fn team_in_possession(&self) -> Option<&TeamRef>;
}

impl PossessionContext for TeamRef {
    fn team_in_possession(&self) -> Option<&TeamRef> {
        Some(self)
    }
}

impl PossessionContext for Option<TeamRef> {
    fn team_in_possession(&self) -> Option<&TeamRef> {
        self.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub detection: Option<Detection>,
    /// Most recent non-empty detection, this frame's included
    pub last_detection: Option<Detection>,
    pub color: Rgb,
}

impl Ball {
    pub fn new(detection: Option<Detection>) -> Self {
        Self::with_last_known(detection, None)
    }

    /// Ball for this frame, remembering `previous` while the detector
    /// misses it. A fresh detection always replaces the remembered one.
    pub fn with_last_known(detection: Option<Detection>, previous: Option<Detection>) -> Self {
        let last_detection = detection.clone().or(previous);
        Self {
            detection,
            last_detection,
            color: Rgb::WHITE,
        }
    }

    pub fn empty() -> Self {
        Self::new(None)
    }

    /// Paint the ball with the color of the team in possession, if any
    pub fn set_color(&mut self, context: &dyn PossessionContext) {
        let Some(team) = context.team_in_possession() else {
            return;
        };
        self.color = team.color;
        if let Some(det) = self.detection.as_mut() {
            det.data.color = Some(team.color);
        }
    }

    /// Whether the detector lost the ball this frame but we still remember it
    pub fn is_coasting(&self) -> bool {
        self.detection.is_none() && self.last_detection.is_some()
    }

    /// Center of this frame's detection, else of the last one seen
    pub fn last_known_center(&self) -> Option<Point> {
        self.center().or_else(|| {
            self.last_detection
                .as_ref()
                .and_then(|d| geometry::center(&d.points).ok())
        })
    }
}

impl Entity for Ball {
    fn kind(&self) -> EntityKind {
        EntityKind::Ball
    }

    fn detection(&self) -> Option<&Detection> {
        self.detection.as_ref()
    }

    fn anchor(&self) -> Option<Point> {
        self.center()
    }
}
