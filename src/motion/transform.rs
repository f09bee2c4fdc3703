// src/motion/transform.rs
//
// Per-frame coordinate transforms. A transform is produced by the motion
// estimator for exactly one frame and must not be reused for the next.

use crate::types::Point;
use tracing::warn;

pub type Matrix3 = [[f64; 3]; 3];

const IDENTITY: Matrix3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Pixel (relative, camera-frame) space to stabilized (absolute) space.
pub trait CoordinateTransform {
    fn rel_to_abs(&self, point: Point) -> Point;

    fn abs_to_rel(&self, point: Point) -> Point;

    /// Pixel point onto the pitch plane. None when no pitch calibration
    /// is attached.
    fn to_birds_eye(&self, _point: Point) -> Option<Point> {
        None
    }
}

// ============================================================================
// TRANSLATION
// ============================================================================

/// Pure camera pan: absolute = pixel + movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationTransform {
    pub dx: f32,
    pub dy: f32,
    pitch: Option<Matrix3>,
}

impl TranslationTransform {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            pitch: None,
        }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Attach a homography from absolute space to pitch coordinates
    pub fn with_pitch(mut self, pitch: Matrix3) -> Self {
        self.pitch = Some(pitch);
        self
    }
}

impl CoordinateTransform for TranslationTransform {
    fn rel_to_abs(&self, point: Point) -> Point {
        Point::new(point.x + self.dx, point.y + self.dy)
    }

    fn abs_to_rel(&self, point: Point) -> Point {
        Point::new(point.x - self.dx, point.y - self.dy)
    }

    fn to_birds_eye(&self, point: Point) -> Option<Point> {
        let pitch = self.pitch.as_ref()?;
        Some(project(pitch, self.rel_to_abs(point)))
    }
}

// ============================================================================
// HOMOGRAPHY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HomographyTransform {
    matrix: Matrix3,
    inverse: Option<Matrix3>,
    pitch: Option<Matrix3>,
}

impl HomographyTransform {
    pub fn new(matrix: Matrix3) -> Self {
        let inverse = invert(&matrix);
        if inverse.is_none() {
            warn!("Singular homography, abs_to_rel will pass points through");
        }
        Self {
            matrix,
            inverse,
            pitch: None,
        }
    }

    pub fn identity() -> Self {
        Self::new(IDENTITY)
    }

    pub fn with_pitch(mut self, pitch: Matrix3) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }
}

impl CoordinateTransform for HomographyTransform {
    fn rel_to_abs(&self, point: Point) -> Point {
        project(&self.matrix, point)
    }

    fn abs_to_rel(&self, point: Point) -> Point {
        match &self.inverse {
            Some(inv) => project(inv, point),
            None => point,
        }
    }

    fn to_birds_eye(&self, point: Point) -> Option<Point> {
        let pitch = self.pitch.as_ref()?;
        Some(project(pitch, self.rel_to_abs(point)))
    }
}

/// Apply a homography in homogeneous coordinates
pub fn project(m: &Matrix3, point: Point) -> Point {
    let (x, y) = (point.x as f64, point.y as f64);
    let w = m[2][0] * x + m[2][1] * y + m[2][2];
    let px = (m[0][0] * x + m[0][1] * y + m[0][2]) / w;
    let py = (m[1][0] * x + m[1][1] * y + m[1][2]) / w;
    Point::new(px as f32, py as f32)
}

fn invert(m: &Matrix3) -> Option<Matrix3> {
    let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);

    if det.abs() < 1e-12 {
        return None;
    }
    let inv_det = 1.0 / det;

    Some([
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
        ],
    ])
}
