use inkshape_core::RectangleParams;
use serde::Serialize;

use super::{saturating_score, Detection};
use crate::features::StrokeFeatures;

/// `|1 − aspect_ratio|` below which a detected rectangle is flagged square.
pub const SQUARE_DETECT_TOLERANCE: f64 = 0.2;

/// `|1 − width / height|` below which [`optimize_rectangle`] forces equal sides.
pub const SQUARE_SNAP_TOLERANCE: f64 = 0.15;

const MIN_SIZE: f64 = 20.0;

/// Axis-aligned bounds of a detected rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RectangleMatch {
    pub bounds: RectangleParams,
    pub is_square: bool,
}

#[inline]
pub fn is_square(features: &StrokeFeatures) -> bool {
    (1.0 - features.aspect_ratio).abs() < SQUARE_DETECT_TOLERANCE
}

pub fn detect_rectangle(features: &StrokeFeatures) -> Detection<RectangleMatch> {
    let corners = features.corner_count;
    let closed_score = if features.is_closed { 1.0 } else { 0.0 };
    let corner_score = match corners {
        4 => 1.0,
        3 | 5 => 0.6,
        _ => (1.0 - 0.3 * (corners as f64 - 4.0).abs()).max(0.0),
    };
    let right_angle_score = if features.corner_angles.len() >= 3 {
        let right = features
            .corner_angles
            .iter()
            .filter(|a| {
                let folded = a.abs() % 180.0;
                folded > 70.0 && folded < 110.0
            })
            .count();
        right as f64 / features.corner_angles.len() as f64
    } else {
        0.0
    };
    let straightness_score = (1.0 - 5.0 * features.curvature_variance).max(0.0);
    let size_score = saturating_score(features.min_size(), MIN_SIZE);

    let confidence = 0.2 * closed_score
        + 0.35 * corner_score
        + 0.25 * right_angle_score
        + 0.15 * straightness_score
        + 0.05 * size_score;

    if confidence > 0.6 && features.is_closed && (3..=5).contains(&corners) {
        let bbox = features.bounding_box;
        Detection::hit(
            confidence,
            RectangleMatch {
                bounds: RectangleParams {
                    x: bbox.x,
                    y: bbox.y,
                    width: bbox.width,
                    height: bbox.height,
                    rotation: None,
                },
                is_square: is_square(features),
            },
        )
    } else {
        Detection::miss(confidence)
    }
}

/// Round the bounds; near-square boxes (or `force_square`) get equal sides
/// of the rounded mean extent.
pub fn optimize_rectangle(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    force_square: bool,
) -> RectangleParams {
    let (mut w, mut h) = (width.round(), height.round());
    if force_square || (1.0 - width / height).abs() < SQUARE_SNAP_TOLERANCE {
        let side = ((width + height) / 2.0).round();
        w = side;
        h = side;
    }

    RectangleParams {
        x: x.round(),
        y: y.round(),
        width: w,
        height: h,
        rotation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::fixtures::{circle, polyline, square};
    use crate::extract_features;
    use approx::assert_relative_eq;

    #[test]
    fn square_outline_is_a_square_rectangle() {
        let det = detect_rectangle(&extract_features(&square(10.0, 20.0, 100.0)));
        assert!(det.detected());
        assert!(det.confidence > 0.95);
        let m = det.params.expect("rectangle match");
        assert!(m.is_square);
        assert_eq!(m.bounds.x, 10.0);
        assert_eq!(m.bounds.y, 20.0);
        assert_eq!(m.bounds.width, 100.0);
        assert_eq!(m.bounds.height, 100.0);
    }

    #[test]
    fn wide_rectangle_is_not_square() {
        let pts = polyline(
            &[
                (100.0, 0.0),
                (200.0, 0.0),
                (200.0, 80.0),
                (0.0, 80.0),
                (0.0, 0.0),
                (90.0, 0.0),
            ],
            10.0,
        );
        let det = detect_rectangle(&extract_features(&pts));
        assert!(det.detected());
        assert!(!det.params.expect("rectangle match").is_square);
    }

    #[test]
    fn three_corners_score_partially() {
        // starts on a corner, so only three turns are interior
        let pts = polyline(
            &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 5.0)],
            10.0,
        );
        let f = extract_features(&pts);
        assert!(f.is_closed);
        assert_eq!(f.corner_count, 3);
        let det = detect_rectangle(&f);
        assert!(det.detected());
        assert_relative_eq!(det.confidence, 0.858916703930421, epsilon = 1e-9);
    }

    #[test]
    fn circle_has_no_corners_to_match() {
        let det = detect_rectangle(&extract_features(&circle(0.0, 0.0, 50.0, 36)));
        assert!(!det.detected());
    }

    #[test]
    fn optimize_snaps_near_squares_only() {
        let near = optimize_rectangle(10.4, 19.6, 100.0, 90.0, false);
        assert_eq!((near.x, near.y, near.width, near.height), (10.0, 20.0, 95.0, 95.0));

        let wide = optimize_rectangle(0.0, 0.0, 120.3, 80.6, false);
        assert_eq!((wide.width, wide.height), (120.0, 81.0));

        let forced = optimize_rectangle(0.0, 0.0, 120.0, 80.0, true);
        assert_eq!((forced.width, forced.height), (100.0, 100.0));
    }

    #[test]
    fn detection_and_snap_tolerances_differ() {
        // aspect 1.18: flagged square by the detector, not snapped by the optimizer alone
        let r = optimize_rectangle(0.0, 0.0, 118.0, 100.0, false);
        assert_eq!((r.width, r.height), (118.0, 100.0));
        assert!((1.0 - 118.0_f64 / 100.0).abs() < SQUARE_DETECT_TOLERANCE);
    }
}
