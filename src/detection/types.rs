// src/detection/types.rs

use crate::entities::TeamRef;
use crate::error::Result;
use crate::geometry;
use crate::types::{Point, Rgb};
use ndarray::Array2;

/// Identifier assigned by the tracker and carried across frames.
/// Only ever compared, never generated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct TrackerId(pub u64);

/// Detector class label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    Player,
    Goalkeeper,
    Ball,
    Referee,
    Unknown,
}

/// Per-pixel foreground mask, shape (height, width) of the frame
pub type DenseMask = Array2<bool>;

/// Typed attribute map riding along with a detection.
#[derive(Debug, Clone, Default)]
pub struct DetectionData {
    /// Team label produced by the color classifier
    pub classification: Option<String>,
    /// Team resolved from `classification` by the entity factory
    pub team: Option<TeamRef>,
    /// Display color for drawing
    pub color: Option<Rgb>,
    pub mask: Option<DenseMask>,
}

#[derive(Debug, Clone)]
pub struct Detection {
    /// Pixel-space corners `[(x1, y1), (x2, y2)]`, or a polygon
    pub points: Vec<Point>,
    pub id: Option<TrackerId>,
    pub class: ObjectClass,
    pub confidence: f32,
    pub data: DetectionData,
}

impl Detection {
    pub fn new(points: Vec<Point>, class: ObjectClass) -> Self {
        Self {
            points,
            id: None,
            class,
            confidence: 1.0,
            data: DetectionData::default(),
        }
    }

    /// Two-corner detection from an `[x1, y1, x2, y2]` box
    pub fn from_bbox(bbox: [f32; 4], class: ObjectClass) -> Self {
        Self::new(
            vec![Point::new(bbox[0], bbox[1]), Point::new(bbox[2], bbox[3])],
            class,
        )
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(TrackerId(id));
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_classification(mut self, label: &str) -> Self {
        self.data.classification = Some(label.to_string());
        self
    }

    pub fn with_mask(mut self, mask: DenseMask) -> Self {
        self.data.mask = Some(mask);
        self
    }

    pub fn center(&self) -> Result<Point> {
        geometry::center(&self.points)
    }

    /// Axis-aligned pixel bounds `[xmin, ymin, xmax, ymax]` over all points
    pub fn bounds(&self) -> Option<[f32; 4]> {
        let first = self.points.first()?;
        let init = [first.x, first.y, first.x, first.y];
        Some(self.points.iter().fold(init, |b, p| {
            [b[0].min(p.x), b[1].min(p.y), b[2].max(p.x), b[3].max(p.y)]
        }))
    }
}
