//! Freehand stroke classification.
//!
//! A finished stroke is reduced once to a [`StrokeFeatures`] vector; every
//! enabled detector scores that vector, and the [`ShapeRecognizer`] keeps
//! the detected interpretations ranked by confidence.
//!
//! ## Quickstart
//!
//! ```
//! use inkshape_core::{Point, SequentialIds, ShapeType};
//! use inkshape_recognize::{RecognitionConfig, ShapeRecognizer};
//!
//! let circle: Vec<Point> = (0..36)
//!     .map(|k| {
//!         let t = k as f64 * std::f64::consts::TAU / 36.0;
//!         Point::new(100.0 + 50.0 * t.cos(), 100.0 + 50.0 * t.sin())
//!     })
//!     .collect();
//!
//! let recognizer = ShapeRecognizer::new(RecognitionConfig::default());
//! let result = recognizer.recognize(&circle, &mut SequentialIds::default());
//! assert!(result.recognized);
//! assert_eq!(result.shape_type, Some(ShapeType::Circle));
//! ```
//!
//! Detectors (in evaluation order):
//! 1. line: straight, open, no corners;
//! 2. circle: closed with a uniform radius;
//! 3. rectangle: closed, 3–5 corners near 90°, flagged square when `w ≈ h`;
//! 4. triangle: closed, 2–3 corners;
//! 5. arrow: open shaft with a "V" head at either end;
//! 6. symbol: small checkmarks and x-marks.

mod detectors;
mod features;
mod io;
mod params;
mod recognizer;

pub use detectors::{
    detect_arrow, detect_circle, detect_line, detect_rectangle, detect_symbol, detect_triangle,
    is_square, optimize_arrow, optimize_circle, optimize_line, optimize_rectangle,
    optimize_symbol, optimize_triangle, Detection, RectangleMatch, SymbolKind, SymbolMatch,
    ARROW_HEAD_WINDOW_MAX, LINE_SNAP_TOLERANCE_DEG, SQUARE_DETECT_TOLERANCE,
    SQUARE_SNAP_TOLERANCE, SYMBOL_MAX_SIZE,
};
pub use features::{extract_features, StrokeFeatures, FEATURE_CORNER_THRESHOLD};
pub use io::{JobConfigError, JobIoError, RecognizeJob, RecognizeReport, StrokeInput, StrokeReport};
pub use params::{RecognitionConfig, RecognitionConfigError, USER_THRESHOLD_RANGE};
pub use recognizer::{
    recognize_shape, RecognitionResult, ShapeCandidate, ShapeRecognizer, MIN_RECOGNITION_POINTS,
};
