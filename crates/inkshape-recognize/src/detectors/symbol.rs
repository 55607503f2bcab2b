use inkshape_core::{to_degrees, Point, ShapeParams, ShapeType, SymbolParams};
use serde::Serialize;

use super::{round_point, Detection};
use crate::features::StrokeFeatures;

/// Symbols larger than this (bounding box, px) are left to the other detectors.
pub const SYMBOL_MAX_SIZE: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Checkmark,
    Xmark,
}

impl SymbolKind {
    pub fn shape_type(self) -> ShapeType {
        match self {
            SymbolKind::Checkmark => ShapeType::Checkmark,
            SymbolKind::Xmark => ShapeType::Xmark,
        }
    }

    pub fn into_params(self, params: SymbolParams) -> ShapeParams {
        match self {
            SymbolKind::Checkmark => ShapeParams::Checkmark(params),
            SymbolKind::Xmark => ShapeParams::Xmark(params),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SymbolMatch {
    pub kind: SymbolKind,
    pub params: SymbolParams,
}

/// Run the checkmark and x-mark tests; a detected checkmark wins unless the
/// x-mark also detected with at least its confidence.
pub fn detect_symbol(features: &StrokeFeatures, points: &[Point]) -> Detection<SymbolMatch> {
    pick_symbol(detect_checkmark(features, points), detect_xmark(features, points))
}

fn pick_symbol(
    check: Detection<SymbolMatch>,
    xmark: Detection<SymbolMatch>,
) -> Detection<SymbolMatch> {
    if check.detected() && (!xmark.detected() || check.confidence > xmark.confidence) {
        return check;
    }
    if xmark.detected() {
        return xmark;
    }
    Detection::rejected()
}

fn detect_checkmark(features: &StrokeFeatures, points: &[Point]) -> Detection<SymbolMatch> {
    if features.is_closed || !(1..=2).contains(&features.corner_count) {
        return Detection::rejected();
    }
    if !(features.aspect_ratio > 0.5 && features.aspect_ratio < 3.0) {
        return Detection::rejected();
    }
    if features.max_size() > SYMBOL_MAX_SIZE {
        return Detection::rejected();
    }

    if !has_check_shape(points) {
        return Detection::miss(0.4);
    }
    let confidence = if features.corner_count == 1 { 0.9 } else { 0.75 };
    Detection::hit(confidence, symbol_match(SymbolKind::Checkmark, features))
}

/// The lowest point (largest y) sits in the middle of the stroke and both
/// ends are above it.
fn has_check_shape(points: &[Point]) -> bool {
    if points.len() < 5 {
        return false;
    }

    let mut lowest = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        if p.y > points[lowest].y {
            lowest = i;
        }
    }
    let relative = lowest as f64 / points.len() as f64;
    if !(0.2..=0.8).contains(&relative) {
        return false;
    }

    let bottom = points[lowest].y;
    points[0].y < bottom && points[points.len() - 1].y < bottom
}

fn detect_xmark(features: &StrokeFeatures, points: &[Point]) -> Detection<SymbolMatch> {
    if features.is_closed || !(1..=3).contains(&features.corner_count) {
        return Detection::rejected();
    }
    let aspect_score = 1.0 - (1.0 - features.aspect_ratio).abs();
    if aspect_score < 0.5 {
        return Detection::rejected();
    }
    if features.max_size() > SYMBOL_MAX_SIZE {
        return Detection::rejected();
    }

    if !has_crossing(features, points) {
        return Detection::miss(0.4);
    }
    Detection::hit(
        0.7 + 0.2 * aspect_score,
        symbol_match(SymbolKind::Xmark, features),
    )
}

/// A corner in the middle 30–70 % of the stroke, or a sharp turn at the
/// middle of the turning-angle sequence.
fn has_crossing(features: &StrokeFeatures, points: &[Point]) -> bool {
    let n = points.len();
    if n < 5 {
        return false;
    }

    let lo = (n as f64 * 0.3).floor() as usize;
    let hi = (n as f64 * 0.7).floor() as usize;
    if features
        .corner_indices
        .iter()
        .any(|idx| (lo..=hi).contains(idx))
    {
        return true;
    }

    let turns = &features.angle_changes;
    turns
        .get(turns.len() / 2)
        .is_some_and(|a| to_degrees(*a).abs() > 60.0)
}

fn symbol_match(kind: SymbolKind, features: &StrokeFeatures) -> SymbolMatch {
    SymbolMatch {
        kind,
        params: SymbolParams {
            center: features.centroid,
            size: features.max_size(),
        },
    }
}

pub fn optimize_symbol(center: &Point, size: f64) -> SymbolParams {
    SymbolParams {
        center: round_point(center),
        size: size.round(),
    }
}
