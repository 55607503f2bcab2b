//! Whole-path metrics over an ordered point sequence.

use std::f64::consts::PI;

use crate::geometry::{angle_between, cross, distance, vector_from_points, BoundingBox, Point};

/// Default closure ratio below which a path counts as closed.
pub const DEFAULT_CLOSED_THRESHOLD: f64 = 0.15;

/// Default turning angle (radians) above which a vertex counts as a corner.
pub const DEFAULT_CORNER_THRESHOLD: f64 = PI / 6.0;

/// Sum of consecutive segment lengths; 0 for fewer than 2 points.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Bounding box of `points`; the zero box for empty input.
pub fn bounding_box(points: &[Point]) -> BoundingBox {
    let Some(first) = points.first() else {
        return BoundingBox::default();
    };

    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_y, mut max_y) = (first.y, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// Arithmetic mean of the positions; the origin for empty input.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Unsigned turning angle (radians) at every interior vertex.
///
/// Entry `k` belongs to point `k + 1`. Empty for fewer than 3 points.
pub fn angle_changes(points: &[Point]) -> Vec<f64> {
    points
        .windows(3)
        .map(|w| {
            let v1 = vector_from_points(&w[0], &w[1]);
            let v2 = vector_from_points(&w[1], &w[2]);
            angle_between(&v1, &v2)
        })
        .collect()
}

/// Menger curvature `4·area / (a·b·c)` at every interior vertex.
///
/// Degenerate triangles (any side of zero length) yield 0.
pub fn calculate_curvatures(points: &[Point]) -> Vec<f64> {
    points
        .windows(3)
        .map(|w| {
            let (p0, p1, p2) = (&w[0], &w[1], &w[2]);
            let a = distance(p0, p1);
            let b = distance(p1, p2);
            let c = distance(p0, p2);
            let sides = a * b * c;
            if sides == 0.0 {
                return 0.0;
            }
            let area = 0.5 * cross(&vector_from_points(p0, p1), &vector_from_points(p0, p2)).abs();
            4.0 * area / sides
        })
        .collect()
}

/// `true` when the start/end gap is a small fraction of the path length.
///
/// Always `false` for fewer than 3 points or a zero-length path.
pub fn is_closed_path(points: &[Point], threshold_ratio: f64) -> bool {
    if points.len() < 3 {
        return false;
    }
    let total = path_length(points);
    if total == 0.0 {
        return false;
    }
    let (first, last) = (&points[0], &points[points.len() - 1]);
    distance(first, last) / total < threshold_ratio
}

/// Indices (into `points`) of vertices whose turning angle exceeds `angle_threshold`.
pub fn find_corners(points: &[Point], angle_threshold: f64) -> Vec<usize> {
    angle_changes(points)
        .into_iter()
        .enumerate()
        .filter(|&(_, a)| a > angle_threshold)
        .map(|(i, _)| i + 1)
        .collect()
}

/// Population variance; 0 for empty input.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
