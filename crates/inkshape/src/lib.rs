//! Facade crate for the `inkshape-*` workspace.
//!
//! Turns freehand pointer strokes into clean vector shapes:
//! - [`smooth`]: Catmull-Rom and moving-average smoothing for display;
//! - [`recognize`]: feature extraction, per-shape detectors and the
//!   confidence-ranked [`ShapeRecognizer`];
//! - [`core`]: points, geometry helpers and the stroke/shape model.
//!
//! ## Quickstart
//!
//! ```
//! use inkshape::{Point, RecognitionConfig, SequentialIds, ShapeRecognizer, ShapeType, Stroke};
//!
//! let points: Vec<Point> = (0..40).map(|k| Point::new(5.0 * k as f64, 20.0)).collect();
//! let stroke = Stroke::new("stroke-1", points, "#1e88e5", 3.0, 0);
//!
//! let recognizer = ShapeRecognizer::new(RecognitionConfig::default());
//! let result = recognizer.recognize_stroke(&stroke, &mut SequentialIds::default());
//! assert_eq!(result.shape_type, Some(ShapeType::Line));
//! assert_eq!(result.shape.map(|s| s.color).as_deref(), Some("#1e88e5"));
//! ```
//!
//! The `inkshape` binary (feature `cli`, on by default) runs the same
//! pipeline over JSON job files.

pub use inkshape_core as core;
pub use inkshape_recognize as recognize;
pub use inkshape_smooth as smooth;

pub use inkshape_core::{
    BoundingBox, IdSource, Point, SequentialIds, Shape, ShapeParams, ShapeType, Stroke, UuidIds,
};
pub use inkshape_recognize::{
    extract_features, RecognitionConfig, RecognitionResult, RecognizeJob, RecognizeReport,
    ShapeRecognizer, StrokeFeatures,
};
pub use inkshape_smooth::{smooth_stroke, SmoothingConfig};
