//! Stroke-to-shape classification.

use inkshape_core::{IdSource, Point, Shape, ShapeParams, ShapeStyle, ShapeType, Stroke};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::detectors::{
    detect_arrow, detect_circle, detect_line, detect_rectangle, detect_symbol, detect_triangle,
    optimize_arrow, optimize_circle, optimize_line, optimize_rectangle, optimize_symbol,
    optimize_triangle, LINE_SNAP_TOLERANCE_DEG,
};
use crate::features::{extract_features, StrokeFeatures};
use crate::params::RecognitionConfig;

/// Strokes with fewer points are never classified.
pub const MIN_RECOGNITION_POINTS: usize = 5;

/// One detector's accepted interpretation of a stroke.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeCandidate {
    pub shape_type: ShapeType,
    pub confidence: f64,
    pub shape: Shape,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub recognized: bool,
    pub shape: Option<Shape>,
    /// Confidence of the top candidate, whether or not it was accepted.
    pub confidence: f64,
    pub shape_type: Option<ShapeType>,
    /// Every detected interpretation, best first.
    pub all_candidates: Vec<ShapeCandidate>,
}

impl RecognitionResult {
    /// Result for input that never reached the detectors.
    pub fn rejected() -> Self {
        Self {
            recognized: false,
            shape: None,
            confidence: 0.0,
            shape_type: None,
            all_candidates: Vec::new(),
        }
    }

    /// Highest-confidence candidate, accepted or not.
    pub fn best(&self) -> Option<&ShapeCandidate> {
        self.all_candidates.first()
    }

    fn from_candidates(candidates: Vec<ShapeCandidate>, min_confidence: f64) -> Self {
        match candidates.first() {
            Some(top) if top.confidence >= min_confidence => Self {
                recognized: true,
                shape: Some(top.shape.clone()),
                confidence: top.confidence,
                shape_type: Some(top.shape_type),
                all_candidates: candidates,
            },
            top => Self {
                recognized: false,
                shape: None,
                confidence: top.map_or(0.0, |c| c.confidence),
                shape_type: None,
                all_candidates: candidates,
            },
        }
    }
}

/// The detectors, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DetectorKind {
    Line,
    Circle,
    Rectangle,
    Triangle,
    Arrow,
    Symbol,
}

impl DetectorKind {
    const ORDER: [DetectorKind; 6] = [
        DetectorKind::Line,
        DetectorKind::Circle,
        DetectorKind::Rectangle,
        DetectorKind::Triangle,
        DetectorKind::Arrow,
        DetectorKind::Symbol,
    ];

    fn is_enabled(self, config: &RecognitionConfig) -> bool {
        match self {
            DetectorKind::Line => config.is_enabled(ShapeType::Line),
            DetectorKind::Circle => config.is_enabled(ShapeType::Circle),
            DetectorKind::Rectangle => config.is_enabled(ShapeType::Rectangle),
            DetectorKind::Triangle => config.is_enabled(ShapeType::Triangle),
            DetectorKind::Arrow => config.is_enabled(ShapeType::Arrow),
            DetectorKind::Symbol => {
                config.is_enabled(ShapeType::Checkmark) || config.is_enabled(ShapeType::Xmark)
            }
        }
    }

    /// Run the detector; on detection return its confidence and the
    /// optimized parameters.
    fn run(self, features: &StrokeFeatures, points: &[Point]) -> Option<(f64, ShapeParams)> {
        let (confidence, params) = match self {
            DetectorKind::Line => {
                let det = detect_line(features);
                let params = det.params.map(|l| {
                    ShapeParams::Line(optimize_line(&l.start, &l.end, LINE_SNAP_TOLERANCE_DEG))
                });
                (det.confidence, params)
            }
            DetectorKind::Circle => {
                let det = detect_circle(features);
                let params = det
                    .params
                    .map(|c| ShapeParams::Circle(optimize_circle(&c.center, c.radius)));
                (det.confidence, params)
            }
            DetectorKind::Rectangle => {
                let det = detect_rectangle(features);
                let params = det.params.map(|m| {
                    let b = m.bounds;
                    ShapeParams::Rectangle(optimize_rectangle(
                        b.x,
                        b.y,
                        b.width,
                        b.height,
                        m.is_square,
                    ))
                });
                (det.confidence, params)
            }
            DetectorKind::Triangle => {
                let det = detect_triangle(features, points);
                let params = det
                    .params
                    .map(|t| ShapeParams::Triangle(optimize_triangle(&t.p1, &t.p2, &t.p3)));
                (det.confidence, params)
            }
            DetectorKind::Arrow => {
                let det = detect_arrow(features, points);
                let params = det
                    .params
                    .map(|a| ShapeParams::Arrow(optimize_arrow(&a.start, &a.end, a.head_size)));
                (det.confidence, params)
            }
            DetectorKind::Symbol => {
                let det = detect_symbol(features, points);
                let params = det.params.map(|m| {
                    m.kind
                        .into_params(optimize_symbol(&m.params.center, m.params.size))
                });
                (det.confidence, params)
            }
        };

        debug!(
            "{:?} detector: confidence {:.3}, detected {}",
            self,
            confidence,
            params.is_some()
        );
        params.map(|p| (confidence, p))
    }
}

/// Classifies finished strokes against the enabled shape detectors.
#[derive(Clone, Debug, Default)]
pub struct ShapeRecognizer {
    config: RecognitionConfig,
}

impl ShapeRecognizer {
    pub fn new(config: RecognitionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    /// Classify `points`. Each candidate shape takes one id from `ids` and
    /// the default [`ShapeStyle`].
    ///
    /// Fewer than [`MIN_RECOGNITION_POINTS`] points short-circuit to
    /// [`RecognitionResult::rejected`] without running any detector.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, points, ids), fields(n = points.len()))
    )]
    pub fn recognize<I: IdSource + ?Sized>(
        &self,
        points: &[Point],
        ids: &mut I,
    ) -> RecognitionResult {
        if points.len() < MIN_RECOGNITION_POINTS {
            debug!("{} points: too few to recognize", points.len());
            return RecognitionResult::rejected();
        }

        let features = extract_features(points);
        trace!(
            "features: n={} length={:.1} closure={:.3} corners={} circularity={:.3} aspect={:.3}",
            features.point_count,
            features.path_length,
            features.closure_ratio,
            features.corner_count,
            features.circularity,
            features.aspect_ratio
        );

        let style = ShapeStyle::default();
        let mut candidates: Vec<ShapeCandidate> = DetectorKind::ORDER
            .into_iter()
            .filter(|kind| kind.is_enabled(&self.config))
            .filter_map(|kind| kind.run(&features, points))
            .filter(|(_, params)| self.config.is_enabled(params.shape_type()))
            .map(|(confidence, params)| ShapeCandidate {
                shape_type: params.shape_type(),
                confidence,
                shape: Shape::new(ids.next_id(), params, &style).with_confidence(confidence),
            })
            .collect();

        // stable: equal confidences keep evaluation order
        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let result = RecognitionResult::from_candidates(candidates, self.config.min_confidence);
        match result.shape_type {
            Some(t) => debug!("recognized {} (confidence {:.3})", t, result.confidence),
            None => debug!(
                "not recognized: top confidence {:.3} of {} candidates, need {:.3}",
                result.confidence,
                result.all_candidates.len(),
                self.config.min_confidence
            ),
        }
        result
    }

    /// Classify a finished stroke; candidate shapes take over the stroke's
    /// color, width and timestamp and record its id.
    pub fn recognize_stroke<I: IdSource + ?Sized>(
        &self,
        stroke: &Stroke,
        ids: &mut I,
    ) -> RecognitionResult {
        let mut result = self.recognize(&stroke.points, ids);
        result.shape = result.shape.map(|s| s.replacing(stroke));
        for candidate in &mut result.all_candidates {
            candidate.shape = candidate.shape.clone().replacing(stroke);
        }
        result
    }
}

/// One-shot form of [`ShapeRecognizer::recognize`].
pub fn recognize_shape<I: IdSource + ?Sized>(
    points: &[Point],
    config: &RecognitionConfig,
    ids: &mut I,
) -> RecognitionResult {
    ShapeRecognizer::new(config.clone()).recognize(points, ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::fixtures::{circle, polyline, square};
    use inkshape_core::SequentialIds;

    #[test]
    fn too_few_points_never_reach_detectors() {
        let mut calls = 0;
        let mut ids = || {
            calls += 1;
            format!("id-{calls}")
        };
        let pts = polyline(&[(0.0, 0.0), (100.0, 0.0)], 25.0);
        assert_eq!(pts.len(), 5);
        let r = ShapeRecognizer::default().recognize(&pts[..4], &mut ids);
        assert_eq!(r, RecognitionResult::rejected());
        assert_eq!(calls, 0);
    }

    #[test]
    fn circle_is_recognized() {
        let mut ids = SequentialIds::default();
        let r = ShapeRecognizer::default().recognize(&circle(100.0, 100.0, 50.0, 36), &mut ids);
        assert!(r.recognized);
        assert_eq!(r.shape_type, Some(ShapeType::Circle));
        let shape = r.shape.expect("shape");
        assert_eq!(
            shape.params,
            ShapeParams::Circle(inkshape_core::CircleParams {
                center: Point::new(100.0, 100.0),
                radius: 50.0
            })
        );
        assert_eq!(shape.color, "#000000");
        assert_eq!(shape.width, 2.0);
        assert_eq!(shape.id, "shape-1");
    }

    #[test]
    fn square_beats_circle_and_snaps_sides() {
        let mut ids = SequentialIds::default();
        let r = ShapeRecognizer::default().recognize(&square(10.0, 10.0, 100.0), &mut ids);
        assert_eq!(r.shape_type, Some(ShapeType::Rectangle));
        let types: Vec<ShapeType> = r.all_candidates.iter().map(|c| c.shape_type).collect();
        assert_eq!(types, vec![ShapeType::Rectangle, ShapeType::Circle]);
        // ids follow evaluation order: circle ran before rectangle
        assert_eq!(r.all_candidates[0].shape.id, "shape-2");
        assert_eq!(r.all_candidates[1].shape.id, "shape-1");
        match r.shape.map(|s| s.params) {
            Some(ShapeParams::Rectangle(rect)) => {
                assert_eq!((rect.width, rect.height), (100.0, 100.0));
            }
            other => panic!("unexpected params {other:?}"),
        }
    }

    #[test]
    fn disabled_types_are_skipped() {
        let cfg = RecognitionConfig::default().with_enabled([ShapeType::Line]);
        let r = recognize_shape(&circle(0.0, 0.0, 50.0, 36), &cfg, &mut SequentialIds::default());
        assert!(!r.recognized);
        assert!(r.all_candidates.is_empty());
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn high_threshold_reports_near_miss() {
        let cfg = RecognitionConfig::default().with_min_confidence(1.0);
        let pts = square(0.0, 0.0, 100.0);
        let r = recognize_shape(&pts, &cfg, &mut SequentialIds::default());
        assert!(!r.recognized);
        assert!(r.shape.is_none());
        assert!(r.confidence > 0.9);
        assert_eq!(r.best().map(|c| c.shape_type), Some(ShapeType::Rectangle));
    }

    #[test]
    fn stroke_attributes_carry_over() {
        let stroke = Stroke::new("stroke-7", circle(0.0, 0.0, 50.0, 36), "#ff0000", 4.0, 1234);
        let r = ShapeRecognizer::default().recognize_stroke(&stroke, &mut SequentialIds::default());
        let shape = r.shape.expect("shape");
        assert_eq!(shape.color, "#ff0000");
        assert_eq!(shape.width, 4.0);
        assert_eq!(shape.original_stroke_id.as_deref(), Some("stroke-7"));
        assert_eq!(shape.timestamp, Some(1234));
        assert!(r
            .all_candidates
            .iter()
            .all(|c| c.shape.original_stroke_id.as_deref() == Some("stroke-7")));
    }
}
