use inkshape_core::{CircleParams, Point};

use super::{round_point, saturating_score, Detection};
use crate::features::StrokeFeatures;

const MIN_SIZE: f64 = 15.0;

pub fn detect_circle(features: &StrokeFeatures) -> Detection<CircleParams> {
    let closed_score = if features.is_closed {
        1.0
    } else {
        (1.0 - 3.0 * features.closure_ratio).max(0.0)
    };
    let aspect_score = (1.0 - 2.0 * (1.0 - features.aspect_ratio).abs()).max(0.0);
    let no_corner_score = if features.corner_count == 0 {
        1.0
    } else {
        (1.0 - 0.3 * features.corner_count as f64).max(0.0)
    };
    let size_score = saturating_score(features.min_size(), MIN_SIZE);

    let confidence = 0.25 * closed_score
        + 0.35 * features.circularity
        + 0.2 * aspect_score
        + 0.15 * no_corner_score
        + 0.05 * size_score;

    if confidence > 0.65 && features.is_closed && features.circularity > 0.6 {
        Detection::hit(
            confidence,
            CircleParams {
                center: features.centroid,
                radius: features.mean_radius,
            },
        )
    } else {
        Detection::miss(confidence)
    }
}

pub fn optimize_circle(center: &Point, radius: f64) -> CircleParams {
    CircleParams {
        center: round_point(center),
        radius: radius.round(),
    }
}
