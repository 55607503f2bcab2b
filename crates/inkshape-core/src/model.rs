//! Stroke and shape values exchanged with the drawing surface.
//!
//! A [`Shape`] stores only its [`ShapeParams`]; the [`ShapeType`] tag is
//! derived from the params variant, so the two can never disagree.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Point;

/// Closed set of vector shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Line,
    Circle,
    Rectangle,
    Square,
    Triangle,
    Arrow,
    Checkmark,
    Xmark,
}

impl ShapeType {
    /// Every shape type, in declaration order.
    pub const ALL: [ShapeType; 8] = [
        ShapeType::Line,
        ShapeType::Circle,
        ShapeType::Rectangle,
        ShapeType::Square,
        ShapeType::Triangle,
        ShapeType::Arrow,
        ShapeType::Checkmark,
        ShapeType::Xmark,
    ];

    /// Types the recognizer can emit. Squares come out as rectangles with
    /// equal sides.
    pub const RECOGNIZABLE: [ShapeType; 7] = [
        ShapeType::Line,
        ShapeType::Circle,
        ShapeType::Rectangle,
        ShapeType::Triangle,
        ShapeType::Arrow,
        ShapeType::Checkmark,
        ShapeType::Xmark,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeType::Line => "line",
            ShapeType::Circle => "circle",
            ShapeType::Rectangle => "rectangle",
            ShapeType::Square => "square",
            ShapeType::Triangle => "triangle",
            ShapeType::Arrow => "arrow",
            ShapeType::Checkmark => "checkmark",
            ShapeType::Xmark => "xmark",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineParams {
    pub start: Point,
    pub end: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleParams {
    pub center: Point,
    pub radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectangleParams {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation around the box center, radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriangleParams {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrowParams {
    pub start: Point,
    /// Tip of the arrow head.
    pub end: Point,
    pub head_size: f64,
}

/// Checkmarks and x-marks are drawn inside a `size`-wide box around `center`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolParams {
    pub center: Point,
    pub size: f64,
}

/// Geometry needed to redraw a shape, one variant per [`ShapeType`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "lowercase")]
pub enum ShapeParams {
    Line(LineParams),
    Circle(CircleParams),
    Rectangle(RectangleParams),
    Square(RectangleParams),
    Triangle(TriangleParams),
    Arrow(ArrowParams),
    Checkmark(SymbolParams),
    Xmark(SymbolParams),
}

impl ShapeParams {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeParams::Line(_) => ShapeType::Line,
            ShapeParams::Circle(_) => ShapeType::Circle,
            ShapeParams::Rectangle(_) => ShapeType::Rectangle,
            ShapeParams::Square(_) => ShapeType::Square,
            ShapeParams::Triangle(_) => ShapeType::Triangle,
            ShapeParams::Arrow(_) => ShapeType::Arrow,
            ShapeParams::Checkmark(_) => ShapeType::Checkmark,
            ShapeParams::Xmark(_) => ShapeType::Xmark,
        }
    }
}

/// Display attributes stamped on new shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub color: String,
    pub width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            width: 2.0,
        }
    }
}

/// A finalized freehand stroke, owned by the drawing session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: String,
    pub points: Vec<Point>,
    pub color: String,
    pub width: f64,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
}

impl Stroke {
    pub fn new(
        id: impl Into<String>,
        points: Vec<Point>,
        color: impl Into<String>,
        width: f64,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            points,
            color: color.into(),
            width,
            timestamp,
        }
    }

    /// A stroke needs at least two points to be kept.
    pub fn is_finalized(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn style(&self) -> ShapeStyle {
        ShapeStyle {
            color: self.color.clone(),
            width: self.width,
        }
    }
}

/// A classified vector shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    #[serde(flatten)]
    pub params: ShapeParams,
    pub color: String,
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Id of the stroke this shape replaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_stroke_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Shape {
    pub fn new(id: impl Into<String>, params: ShapeParams, style: &ShapeStyle) -> Self {
        Self {
            id: id.into(),
            params,
            color: style.color.clone(),
            width: style.width,
            confidence: None,
            original_stroke_id: None,
            timestamp: None,
        }
    }

    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.params.shape_type()
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    /// Take over display attributes and provenance from `stroke`.
    pub fn replacing(mut self, stroke: &Stroke) -> Self {
        self.color = stroke.color.clone();
        self.width = stroke.width;
        self.original_stroke_id = Some(stroke.id.clone());
        self.timestamp = Some(stroke.timestamp);
        self
    }
}
