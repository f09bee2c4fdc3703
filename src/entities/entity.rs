// src/entities/entity.rs
//
// Geometry shared by every scene entity. Nothing is cached: each call
// recomputes from the wrapped detection, so a transform swapped in for a
// new frame can never meet stale coordinates.
//
// Every accessor is None-soft. A missing detection, or one with fewer than
// two points, yields None rather than an error.

use crate::detection::{Detection, TrackerId};
use crate::geometry;
use crate::motion::CoordinateTransform;
use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Referee,
    Ball,
}

pub trait Entity {
    fn kind(&self) -> EntityKind;

    fn detection(&self) -> Option<&Detection>;

    fn tracker_id(&self) -> Option<TrackerId> {
        self.detection().and_then(|d| d.id)
    }

    fn points(&self) -> Option<&[Point]> {
        self.detection().map(|d| d.points.as_slice())
    }

    fn left_foot(&self) -> Option<Point> {
        geometry::left_foot(self.points()?).ok()
    }

    fn right_foot(&self) -> Option<Point> {
        geometry::right_foot(self.points()?).ok()
    }

    /// (left, right) in pixel space
    fn feet(&self) -> Option<(Point, Point)> {
        Some((self.left_foot()?, self.right_foot()?))
    }

    fn center(&self) -> Option<Point> {
        geometry::center(self.points()?).ok()
    }

    /// Reference point for entity-to-entity distances. People stand on
    /// their feet; the ball overrides this with its center.
    fn anchor(&self) -> Option<Point> {
        geometry::ground_point(self.points()?).ok()
    }

    /// Detection points mapped into the stabilized (absolute) space
    fn absolute_points(&self, transform: &dyn CoordinateTransform) -> Option<Vec<Point>> {
        let points = self.points()?;
        Some(points.iter().map(|&p| transform.rel_to_abs(p)).collect())
    }

    fn center_abs(&self, transform: &dyn CoordinateTransform) -> Option<Point> {
        geometry::center(&self.absolute_points(transform)?).ok()
    }

    fn feet_abs(&self, transform: &dyn CoordinateTransform) -> Option<(Point, Point)> {
        let points = self.absolute_points(transform)?;
        Some((
            geometry::left_foot(&points).ok()?,
            geometry::right_foot(&points).ok()?,
        ))
    }

    /// Anchor in stabilized space
    fn transformed_point(&self, transform: &dyn CoordinateTransform) -> Option<Point> {
        Some(transform.rel_to_abs(self.anchor()?))
    }

    /// Anchor on the pitch plane, when the transform knows the pitch
    fn birds_eye_point(&self, transform: &dyn CoordinateTransform) -> Option<Point> {
        transform.to_birds_eye(self.anchor()?)
    }

    /// Pixel-space distance between both anchors. For people the anchor is
    /// the ground point between the feet, not the box center, so a ball at
    /// a player's feet is at distance 0.
    fn distance_to(&self, other: &dyn Entity) -> Option<f32> {
        Some(geometry::euclidean_distance(self.anchor()?, other.anchor()?))
    }

    /// Identity is the tracker id alone. Entities without an id, or of a
    /// different kind, are never the same.
    fn is_same_as(&self, other: &dyn Entity) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        match (self.tracker_id(), other.tracker_id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
