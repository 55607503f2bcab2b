use inkshape_core::{Point, TriangleParams};

use super::{round_point, saturating_score, Detection};
use crate::features::StrokeFeatures;

const MIN_SIZE: f64 = 20.0;

pub fn detect_triangle(features: &StrokeFeatures, points: &[Point]) -> Detection<TriangleParams> {
    let corners = features.corner_count;
    let closed_score = if features.is_closed { 1.0 } else { 0.0 };
    let corner_score = match corners {
        3 => 1.0,
        2 | 4 => 0.5,
        _ => 0.0,
    };
    let straightness_score = (1.0 - 5.0 * features.curvature_variance).max(0.0);
    let not_circular_score = 1.0 - features.circularity;
    let size_score = saturating_score(features.min_size(), MIN_SIZE);

    let confidence = 0.25 * closed_score
        + 0.4 * corner_score
        + 0.15 * straightness_score
        + 0.1 * not_circular_score
        + 0.1 * size_score;

    if confidence > 0.6 && features.is_closed && matches!(corners, 2 | 3) {
        Detection::hit(confidence, vertices(features, points))
    } else {
        Detection::miss(confidence)
    }
}

/// First three corners when available, else an upward triangle inscribed in
/// the bounding box.
fn vertices(features: &StrokeFeatures, points: &[Point]) -> TriangleParams {
    if let [a, b, c, ..] = features.corner_indices[..] {
        let n = points.len();
        let pick = |idx: usize, fallback: usize| {
            points
                .get(idx)
                .or_else(|| points.get(fallback))
                .copied()
                .unwrap_or(features.centroid)
        };
        return TriangleParams {
            p1: pick(a, 0),
            p2: pick(b, n / 3),
            p3: pick(c, 2 * n / 3),
        };
    }

    let bbox = &features.bounding_box;
    TriangleParams {
        p1: Point::new(bbox.x + bbox.width / 2.0, bbox.y),
        p2: Point::new(bbox.x, bbox.y + bbox.height),
        p3: Point::new(bbox.x + bbox.width, bbox.y + bbox.height),
    }
}

pub fn optimize_triangle(p1: &Point, p2: &Point, p3: &Point) -> TriangleParams {
    TriangleParams {
        p1: round_point(p1),
        p2: round_point(p2),
        p3: round_point(p3),
    }
}
