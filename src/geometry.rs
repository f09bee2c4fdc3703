// src/geometry.rs
//
// Pure point math over a detection's two-corner region
// `[(x1, y1), (x2, y2)]`. Only the first two points are read; polygon
// detections with more vertices are accepted.

use crate::error::{Result, SceneError};
use crate::types::Point;

const REQUIRED_POINTS: usize = 2;

fn corners(points: &[Point]) -> Result<(Point, Point)> {
    match points {
        [a, b, ..] => Ok((*a, *b)),
        _ => Err(SceneError::InvalidGeometry {
            expected: REQUIRED_POINTS,
            got: points.len(),
        }),
    }
}

/// Lower-left corner: `(x1, max(y1, y2))`
pub fn left_foot(points: &[Point]) -> Result<Point> {
    let (a, b) = corners(points)?;
    Ok(Point::new(a.x, a.y.max(b.y)))
}

/// Second corner as-is: `(x2, y2)`. Not mirrored from `left_foot`.
pub fn right_foot(points: &[Point]) -> Result<Point> {
    let (_, b) = corners(points)?;
    Ok(b)
}

pub fn center(points: &[Point]) -> Result<Point> {
    let (a, b) = corners(points)?;
    Ok(midpoint(a, b))
}

/// Where the object touches the pitch: halfway between both feet.
pub fn ground_point(points: &[Point]) -> Result<Point> {
    Ok(midpoint(left_foot(points)?, right_foot(points)?))
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

pub fn euclidean_distance(p: Point, q: Point) -> f32 {
    ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt()
}

/// Index of the candidate closest to `target`. A candidate only replaces
/// the current best when strictly closer, except that equal distances are
/// resolved in favour of the later candidate.
pub fn closest_by_distance(target: Point, candidates: &[Point]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &candidate) in candidates.iter().enumerate() {
        let d = euclidean_distance(target, candidate);
        match best {
            Some((_, best_d)) if best_d < d => {}
            _ => best = Some((idx, d)),
        }
    }
    best.map(|(idx, _)| idx)
}
