//! Core types and geometry for freehand stroke recognition.
//!
//! This crate is small and purely geometric. It does *not*
//! know about rendering, input capture, or persistence; it only works on
//! ordered point sequences and produces plain values.
//!
//! ## Quickstart
//!
//! ```
//! use inkshape_core::{bounding_box, path_length, Point};
//!
//! let pts = [Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(6.0, 0.0)];
//! assert_eq!(path_length(&pts), 10.0);
//! assert_eq!(bounding_box(&pts).width, 6.0);
//! ```

mod geometry;
mod ids;
mod logger;
mod model;
mod path;
mod simplify;

pub use geometry::{
    angle_between, cross, distance, distance_squared, dot, lerp, magnitude, midpoint, normalize,
    normalize_angle, to_degrees, to_radians, vector_angle, vector_from_points, BoundingBox, Point,
    Vector,
};
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use model::{
    ArrowParams, CircleParams, LineParams, RectangleParams, Shape, ShapeParams, ShapeStyle,
    ShapeType, Stroke, SymbolParams, TriangleParams,
};
pub use path::{
    angle_changes, bounding_box, calculate_curvatures, centroid, find_corners, is_closed_path,
    path_length, variance, DEFAULT_CLOSED_THRESHOLD, DEFAULT_CORNER_THRESHOLD,
};
pub use simplify::{perpendicular_distance, simplify_path};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, verbosity_level};
