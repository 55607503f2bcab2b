//! Geometric descriptors computed once per stroke and shared by every detector.

use std::f64::consts::FRAC_PI_4;

use inkshape_core::{
    angle_changes, bounding_box, calculate_curvatures, centroid, distance, find_corners,
    is_closed_path, path_length, to_degrees, variance, vector_angle, vector_from_points,
    BoundingBox, Point, DEFAULT_CLOSED_THRESHOLD,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Turning angle above which a vertex counts as a corner during extraction.
pub const FEATURE_CORNER_THRESHOLD: f64 = FRAC_PI_4;

const DOMINANT_ANGLE_BINS: usize = 8;
const DOMINANT_ANGLE_BIN_DEG: f64 = 45.0;

/// Feature vector of a single stroke.
///
/// Angles in `angle_changes` are radians; `dominant_angle`, `corner_angles`,
/// `start_angle` and `end_angle` are degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeFeatures {
    pub point_count: usize,
    pub path_length: f64,
    pub bounding_box: BoundingBox,
    /// `width / height`, or 1 for a flat box.
    pub aspect_ratio: f64,
    pub centroid: Point,

    pub start_point: Point,
    pub end_point: Point,
    pub start_end_distance: f64,
    /// `start_end_distance / path_length`, or 1 for a zero-length path.
    pub closure_ratio: f64,
    pub is_closed: bool,

    pub curvatures: Vec<f64>,
    pub curvature_mean: f64,
    pub curvature_variance: f64,

    pub angle_changes: Vec<f64>,
    pub total_angle_change: f64,
    /// Center of the most populated 45° bin of turning angles.
    pub dominant_angle: f64,

    pub corner_count: usize,
    /// Indices into the stroke's points.
    pub corner_indices: Vec<usize>,
    /// Signed turning angle at each corner.
    pub corner_angles: Vec<f64>,

    /// 1 for a perfectly uniform radius around the centroid, down to 0.
    pub circularity: f64,
    pub radius_variance: f64,
    pub mean_radius: f64,

    pub start_angle: f64,
    pub end_angle: f64,
}

impl StrokeFeatures {
    /// Neutral record for input too short to measure, anchored at `anchor`.
    pub fn degenerate(point_count: usize, anchor: Point) -> Self {
        Self {
            point_count,
            path_length: 0.0,
            bounding_box: BoundingBox::at(&anchor),
            aspect_ratio: 1.0,
            centroid: anchor,
            start_point: anchor,
            end_point: anchor,
            start_end_distance: 0.0,
            closure_ratio: 0.0,
            is_closed: false,
            curvatures: Vec::new(),
            curvature_mean: 0.0,
            curvature_variance: 0.0,
            angle_changes: Vec::new(),
            total_angle_change: 0.0,
            dominant_angle: 0.0,
            corner_count: 0,
            corner_indices: Vec::new(),
            corner_angles: Vec::new(),
            circularity: 0.0,
            radius_variance: 0.0,
            mean_radius: 0.0,
            start_angle: 0.0,
            end_angle: 0.0,
        }
    }

    /// Shorter side of the bounding box.
    #[inline]
    pub fn min_size(&self) -> f64 {
        self.bounding_box.min_side()
    }

    /// Longer side of the bounding box.
    #[inline]
    pub fn max_size(&self) -> f64 {
        self.bounding_box.max_side()
    }
}

/// Compute the feature vector of `points`.
///
/// Total over its input: fewer than 2 points yield
/// [`StrokeFeatures::degenerate`] anchored at the first point (or the origin).
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(points), fields(n = points.len()))
)]
pub fn extract_features(points: &[Point]) -> StrokeFeatures {
    if points.len() < 2 {
        let anchor = points.first().copied().unwrap_or(Point::ORIGIN);
        return StrokeFeatures::degenerate(points.len(), anchor);
    }

    let start_point = points[0];
    let end_point = points[points.len() - 1];
    let length = path_length(points);
    let bbox = bounding_box(points);
    let center = centroid(points);
    let angles = angle_changes(points);
    let curvatures = calculate_curvatures(points);
    let corners = find_corners(points, FEATURE_CORNER_THRESHOLD);
    let start_end_distance = distance(&start_point, &end_point);

    let aspect_ratio = if bbox.height > 0.0 {
        bbox.width / bbox.height
    } else {
        1.0
    };
    let closure_ratio = if length > 0.0 {
        start_end_distance / length
    } else {
        1.0
    };

    let curvature_mean = if curvatures.is_empty() {
        0.0
    } else {
        curvatures.iter().sum::<f64>() / curvatures.len() as f64
    };
    let curvature_variance = variance(&curvatures);

    let total_angle_change = angles.iter().map(|a| a.abs()).sum();
    let dominant_angle = dominant_angle(&angles);
    let radius = radius_stats(points, &center);
    let corner_angles = corners
        .iter()
        .map(|&idx| signed_turn_deg(points, idx))
        .collect();

    StrokeFeatures {
        point_count: points.len(),
        path_length: length,
        bounding_box: bbox,
        aspect_ratio,
        centroid: center,
        start_point,
        end_point,
        start_end_distance,
        closure_ratio,
        is_closed: is_closed_path(points, DEFAULT_CLOSED_THRESHOLD),
        curvatures,
        curvature_mean,
        curvature_variance,
        angle_changes: angles,
        total_angle_change,
        dominant_angle,
        corner_count: corners.len(),
        corner_indices: corners,
        corner_angles,
        circularity: radius.circularity,
        radius_variance: radius.variance,
        mean_radius: radius.mean,
        start_angle: tangent_deg(&points[0], &points[1]),
        end_angle: tangent_deg(&points[points.len() - 2], &points[points.len() - 1]),
    }
}

struct RadiusStats {
    circularity: f64,
    variance: f64,
    mean: f64,
}

fn radius_stats(points: &[Point], center: &Point) -> RadiusStats {
    if points.len() < 3 {
        return RadiusStats {
            circularity: 0.0,
            variance: 0.0,
            mean: 0.0,
        };
    }

    let radii: Vec<f64> = points.iter().map(|p| distance(p, center)).collect();
    let mean = radii.iter().sum::<f64>() / radii.len() as f64;
    let var = variance(&radii);
    let normalized = if mean > 0.0 { var / (mean * mean) } else { 1.0 };

    RadiusStats {
        circularity: (1.0 - normalized).max(0.0),
        variance: var,
        mean,
    }
}

/// Center (degrees) of the fullest 45° bin of `|angle change|`; first bin wins ties.
fn dominant_angle(angles: &[f64]) -> f64 {
    if angles.is_empty() {
        return 0.0;
    }

    let mut bins = [0usize; DOMINANT_ANGLE_BINS];
    for a in angles {
        let bin =
            (to_degrees(a.abs()) / DOMINANT_ANGLE_BIN_DEG).floor() as usize % DOMINANT_ANGLE_BINS;
        bins[bin] += 1;
    }

    let mut best = 0;
    for (i, &count) in bins.iter().enumerate().skip(1) {
        if count > bins[best] {
            best = i;
        }
    }
    best as f64 * DOMINANT_ANGLE_BIN_DEG + 0.5 * DOMINANT_ANGLE_BIN_DEG
}

/// Heading change at interior vertex `idx`, degrees, not wrapped.
fn signed_turn_deg(points: &[Point], idx: usize) -> f64 {
    if idx == 0 || idx + 1 >= points.len() {
        return 0.0;
    }
    let v1 = vector_from_points(&points[idx - 1], &points[idx]);
    let v2 = vector_from_points(&points[idx], &points[idx + 1]);
    to_degrees(vector_angle(&v2) - vector_angle(&v1))
}

fn tangent_deg(from: &Point, to: &Point) -> f64 {
    to_degrees(vector_angle(&vector_from_points(from, to)))
}
