use inkshape_core::{distance, to_degrees, to_radians, LineParams, Point};

use super::{round_point, saturating_score, Detection};
use crate::features::StrokeFeatures;

/// Directions (degrees) a drawn line snaps to, in the order they are tried.
const SNAP_ANGLES_DEG: [f64; 9] = [
    0.0, 45.0, 90.0, 135.0, 180.0, -45.0, -90.0, -135.0, -180.0,
];

/// Maximum deviation (degrees) from a snap direction that still snaps.
pub const LINE_SNAP_TOLERANCE_DEG: f64 = 15.0;

const MIN_LENGTH: f64 = 20.0;

pub fn detect_line(features: &StrokeFeatures) -> Detection<LineParams> {
    let straightness = if features.path_length > 0.0 {
        features.start_end_distance / features.path_length
    } else {
        0.0
    };
    let curvature_score = (1.0 - 10.0 * features.curvature_variance).max(0.0);
    let not_closed_score = if features.is_closed { 0.0 } else { 1.0 };
    let no_corner_score = if features.corner_count == 0 {
        1.0
    } else {
        (1.0 - 0.5 * features.corner_count as f64).max(0.0)
    };
    let length_score = saturating_score(features.path_length, MIN_LENGTH);

    let confidence = 0.4 * straightness
        + 0.25 * curvature_score
        + 0.15 * not_closed_score
        + 0.15 * no_corner_score
        + 0.05 * length_score;

    if confidence > 0.7 && straightness > 0.9 {
        Detection::hit(
            confidence,
            LineParams {
                start: features.start_point,
                end: features.end_point,
            },
        )
    } else {
        Detection::miss(confidence)
    }
}

/// Snap the direction of `start → end` to the first of 0°, ±45°, ±90°,
/// ±135°, ±180° within `tolerance_deg`, keeping the start point and the
/// length, then round both ends.
pub fn optimize_line(start: &Point, end: &Point, tolerance_deg: f64) -> LineParams {
    let angle = to_degrees((end.y - start.y).atan2(end.x - start.x));
    let snapped = SNAP_ANGLES_DEG
        .iter()
        .copied()
        .find(|a| (angle - a).abs() < tolerance_deg);

    let end = match snapped {
        Some(a) if a != angle => {
            let length = distance(start, end);
            let rad = to_radians(a);
            Point::new(start.x + length * rad.cos(), start.y + length * rad.sin())
        }
        _ => *end,
    };

    LineParams {
        start: round_point(start),
        end: round_point(&end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::fixtures::{polyline, square};
    use crate::extract_features;
    use approx::assert_relative_eq;

    #[test]
    fn straight_stroke_is_a_line() {
        let pts = polyline(&[(0.0, 0.0), (100.0, 0.0)], 5.0);
        let det = detect_line(&extract_features(&pts));
        assert!(det.detected());
        assert_relative_eq!(det.confidence, 1.0, epsilon = 1e-12);
        let params = det.params.expect("line params");
        assert_eq!(params.start, Point::new(0.0, 0.0));
        assert_eq!(params.end, Point::new(100.0, 0.0));
    }

    #[test]
    fn closed_square_is_not_a_line() {
        let det = detect_line(&extract_features(&square(0.0, 0.0, 100.0)));
        assert!(!det.detected());
        assert!(det.confidence < 0.7);
    }

    #[test]
    fn short_line_is_penalized_but_detected() {
        let pts = polyline(&[(0.0, 0.0), (10.0, 0.0)], 2.0);
        let det = detect_line(&extract_features(&pts));
        assert!(det.detected());
        assert_relative_eq!(det.confidence, 0.975, epsilon = 1e-12);
    }

    #[test]
    fn gentle_arc_fails_straightness_despite_high_confidence() {
        let pts: Vec<Point> = (0..=40)
            .map(|k| {
                let t = k as f64 * 1.6 / 40.0;
                Point::new(100.0 * t.cos(), 100.0 * t.sin())
            })
            .collect();
        let f = extract_features(&pts);
        assert_eq!(f.corner_count, 0);
        assert!(!f.is_closed);
        let straightness = f.start_end_distance / f.path_length;
        assert!(straightness < 0.9 && straightness > 0.89);

        let det = detect_line(&f);
        assert!(det.confidence > 0.95);
        assert!(!det.detected());
        assert!(det.params.is_none());
    }

    #[test]
    fn optimize_snaps_near_horizontal() {
        let l = optimize_line(
            &Point::new(0.0, 0.0),
            &Point::new(100.0, 10.0),
            LINE_SNAP_TOLERANCE_DEG,
        );
        assert_eq!(l.start, Point::new(0.0, 0.0));
        assert_eq!(l.end, Point::new(100.0, 0.0));
    }

    #[test]
    fn optimize_snaps_diagonals_and_keeps_length() {
        let l = optimize_line(
            &Point::new(10.0, 10.0),
            &Point::new(80.0, 75.0),
            LINE_SNAP_TOLERANCE_DEG,
        );
        // 42.9° snaps to 45°, length 95.52
        assert_eq!(l.end, Point::new(78.0, 78.0));

        let up = optimize_line(
            &Point::new(0.0, 0.0),
            &Point::new(-5.0, -60.0),
            LINE_SNAP_TOLERANCE_DEG,
        );
        assert_eq!(up.end, Point::new(0.0, -60.0));
    }

    #[test]
    fn optimize_leaves_far_angles_alone() {
        let l = optimize_line(
            &Point::new(0.4, 0.4),
            &Point::new(30.2, 100.2),
            LINE_SNAP_TOLERANCE_DEG,
        );
        assert_eq!(l.start, Point::new(0.0, 0.0));
        assert_eq!(l.end, Point::new(30.0, 100.0));
    }
}
