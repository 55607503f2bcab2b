//! Ramer-Douglas-Peucker polyline simplification.

use crate::geometry::{distance, Point};

/// Distance from `point` to the segment `[line_start, line_end]`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure to the nearest endpoint rather than to the infinite line.
pub fn perpendicular_distance(point: &Point, line_start: &Point, line_end: &Point) -> f64 {
    let dx = line_end.x - line_start.x;
    let dy = line_end.y - line_start.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return distance(point, line_start);
    }

    let t = ((point.x - line_start.x) * dx + (point.y - line_start.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let closest = Point::new(line_start.x + t * dx, line_start.y + t * dy);
    distance(point, &closest)
}

/// Simplify `points`, keeping every vertex that deviates more than `epsilon`
/// from the chord of its sub-range. Input of 2 points or fewer is returned as is.
pub fn simplify_path(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let (max_dist, max_index) = farthest_from_chord(points);

    if max_dist > epsilon {
        let mut left = simplify_path(&points[..=max_index], epsilon);
        let right = simplify_path(&points[max_index..], epsilon);
        // the split vertex ends `left` and starts `right`
        left.pop();
        left.extend(right);
        left
    } else {
        vec![points[0], points[points.len() - 1]]
    }
}

fn farthest_from_chord(points: &[Point]) -> (f64, usize) {
    let start = &points[0];
    let end = &points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = perpendicular_distance(p, start, end);
        if d > max_dist {
            max_dist = d;
            max_index = i;
        }
    }
    (max_dist, max_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perpendicular_distance_clamps_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_relative_eq!(perpendicular_distance(&Point::new(5.0, 3.0), &a, &b), 3.0);
        // beyond the end: distance to `b`, not to the infinite line
        assert_relative_eq!(perpendicular_distance(&Point::new(13.0, 4.0), &a, &b), 5.0);
        assert_relative_eq!(perpendicular_distance(&Point::new(3.0, 4.0), &a, &a), 5.0);
    }

    #[test]
    fn collinear_points_collapse_to_endpoints() {
        let line: Vec<Point> = (0..10)
            .map(|i| Point::new(i as f64, 0.2 * (i % 2) as f64))
            .collect();
        let out = simplify_path(&line, 1.0);
        assert_eq!(out, vec![line[0], line[9]]);
    }

    #[test]
    fn keeps_sharp_vertex() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.1),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(10.1, 10.0),
        ];
        let out = simplify_path(&pts, 1.0);
        assert_eq!(
            out,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.1, 10.0)]
        );
    }

    #[test]
    fn short_input_is_unchanged() {
        let pts = vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert_eq!(simplify_path(&pts, 0.5), pts);
        assert!(simplify_path(&[], 0.5).is_empty());
    }
}
