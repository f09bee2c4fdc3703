// src/entities/player.rs

use super::ball::Ball;
use super::entity::{Entity, EntityKind};
use super::team::TeamRef;
use crate::detection::Detection;
use crate::geometry;
use crate::motion::CoordinateTransform;
use crate::types::{Point, Rgb};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Player {
    pub detection: Option<Detection>,
    pub team: Option<TeamRef>,
    pub in_possession: bool,
    /// Transformed anchor, cached by the frame's spatial query
    pub txy: Option<Point>,
}

impl Player {
    /// Takes the team already resolved onto the detection, if any.
    pub fn new(detection: Option<Detection>) -> Self {
        let team = detection.as_ref().and_then(|d| d.data.team.clone());
        Self {
            detection,
            team,
            in_possession: false,
            txy: None,
        }
    }

    pub fn set_team(&mut self, team: Option<TeamRef>) {
        self.team = team;
    }

    pub fn set_possession(&mut self, in_possession: bool) {
        self.in_possession = in_possession;
    }

    pub fn cache_transformed(&mut self, transform: &dyn CoordinateTransform) -> Option<Point> {
        self.txy = self.transformed_point(transform);
        self.txy
    }

    /// Team color, falling back to whatever color the detection carries
    pub fn display_color(&self) -> Option<Rgb> {
        self.team
            .as_ref()
            .map(|t| t.color)
            .or_else(|| self.detection.as_ref().and_then(|d| d.data.color))
    }

    /// Foot nearer the ball center. Left wins only when strictly closer.
    pub fn closest_foot_to(&self, ball: &Ball) -> Option<Point> {
        let target = ball.center()?;
        let (left, right) = self.feet()?;
        Some(pick_foot(target, left, right))
    }

    /// Same rule as `closest_foot_to`, in stabilized space
    pub fn closest_foot_to_abs(
        &self,
        ball: &Ball,
        transform: &dyn CoordinateTransform,
    ) -> Option<Point> {
        let target = ball.center_abs(transform)?;
        let (left, right) = self.feet_abs(transform)?;
        Some(pick_foot(target, left, right))
    }

    /// Pixel-space center, but only when the stabilized center distance to
    /// the ball does not exceed the pixel-space one. A transform that blows
    /// the distance up makes this frame's absolute reading untrustworthy.
    pub fn closest_center_abs(
        &self,
        ball: &Ball,
        transform: &dyn CoordinateTransform,
    ) -> Option<Point> {
        let center = self.center()?;
        let pixel_distance = geometry::euclidean_distance(center, ball.center()?);
        let abs_distance =
            geometry::euclidean_distance(self.center_abs(transform)?, ball.center_abs(transform)?);

        if abs_distance <= pixel_distance {
            Some(center)
        } else {
            debug!(
                "Rejected absolute center for {:?}: abs {:.2} > px {:.2}",
                self.tracker_id(),
                abs_distance,
                pixel_distance
            );
            None
        }
    }

    /// Distance to the ball, or to where it was last seen when the detector
    /// dropped it this frame.
    pub fn distance_to_last_known(&self, ball: &Ball) -> Option<f32> {
        let anchor = self.anchor()?;
        let target = ball.last_known_center()?;
        Some(geometry::euclidean_distance(anchor, target))
    }

    /// Both present and carrying the same tracker id
    pub fn have_same_id(a: Option<&Player>, b: Option<&Player>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

fn pick_foot(target: Point, left: Point, right: Point) -> Point {
    let left_d = geometry::euclidean_distance(target, left);
    let right_d = geometry::euclidean_distance(target, right);
    if left_d < right_d {
        left
    } else {
        right
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn detection(&self) -> Option<&Detection> {
        self.detection.as_ref()
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_as(other)
    }
}
