//! JSON batch jobs: a list of strokes in, one report per stroke out.

use std::{
    fs,
    path::{Path, PathBuf},
};

use inkshape_core::{IdSource, Point, Stroke};
use inkshape_smooth::{smooth_stroke, SmoothingConfig, SmoothingConfigError};
use serde::{Deserialize, Serialize};

use crate::{
    extract_features, RecognitionConfig, RecognitionConfigError, RecognitionResult,
    ShapeRecognizer, StrokeFeatures,
};

#[derive(thiserror::Error, Debug)]
pub enum JobIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum JobConfigError {
    #[error(transparent)]
    Recognition(#[from] RecognitionConfigError),
    #[error(transparent)]
    Smoothing(#[from] SmoothingConfigError),
}

/// A stroke as found in a job file: either a full [`Stroke`] or bare points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrokeInput {
    Stroke(Stroke),
    Points { points: Vec<Point> },
}

impl StrokeInput {
    pub fn points(&self) -> &[Point] {
        match self {
            StrokeInput::Stroke(s) => &s.points,
            StrokeInput::Points { points } => points,
        }
    }

    pub fn stroke_id(&self) -> Option<&str> {
        match self {
            StrokeInput::Stroke(s) => Some(&s.id),
            StrokeInput::Points { .. } => None,
        }
    }
}

/// Batch recognition job.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecognizeJob {
    pub strokes: Vec<StrokeInput>,
    #[serde(default)]
    pub recognition: Option<RecognitionConfig>,
    /// When present, each report also records the smoothed point count.
    #[serde(default)]
    pub smoothing: Option<SmoothingConfig>,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl RecognizeJob {
    /// Load a JSON job from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, JobIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this job to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), JobIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("inkshape_report.json"))
    }

    pub fn recognition_config(&self) -> RecognitionConfig {
        self.recognition.clone().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), JobConfigError> {
        self.recognition_config().validate()?;
        if let Some(smoothing) = &self.smoothing {
            smoothing.validate()?;
        }
        Ok(())
    }

    /// Recognize every stroke in order, drawing shape ids from `ids`.
    pub fn run<I: IdSource + ?Sized>(&self, ids: &mut I) -> RecognizeReport {
        let recognizer = ShapeRecognizer::new(self.recognition_config());
        let strokes = self
            .strokes
            .iter()
            .map(|input| {
                let points = input.points();
                let result = match input {
                    StrokeInput::Stroke(stroke) => recognizer.recognize_stroke(stroke, ids),
                    StrokeInput::Points { .. } => recognizer.recognize(points, ids),
                };
                StrokeReport {
                    stroke_id: input.stroke_id().map(str::to_owned),
                    point_count: points.len(),
                    features: extract_features(points),
                    result,
                    smoothed_point_count: self
                        .smoothing
                        .as_ref()
                        .map(|cfg| smooth_stroke(points, cfg).len()),
                }
            })
            .collect();
        RecognizeReport { strokes }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_id: Option<String>,
    pub point_count: usize,
    pub features: StrokeFeatures,
    pub result: RecognitionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothed_point_count: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecognizeReport {
    pub strokes: Vec<StrokeReport>,
}

impl RecognizeReport {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, JobIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), JobIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn recognized_count(&self) -> usize {
        self.strokes.iter().filter(|s| s.result.recognized).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkshape_core::{SequentialIds, ShapeType};

    const JOB: &str = r##"{
        "strokes": [
            {"points": [{"x": 0, "y": 0}, {"x": 1, "y": 1}]},
            {
                "id": "s-1",
                "points": [
                    {"x": 0, "y": 0}, {"x": 25, "y": 0}, {"x": 50, "y": 0},
                    {"x": 75, "y": 0}, {"x": 100, "y": 0}
                ],
                "color": "#3366ff",
                "width": 3.0,
                "timestamp": 1700000000000
            }
        ],
        "recognition": {"min_confidence": 0.7},
        "smoothing": {"resolution": 4}
    }"##;

    #[test]
    fn parses_both_stroke_forms() {
        let job: RecognizeJob = serde_json::from_str(JOB).expect("parse job");
        assert_eq!(job.strokes.len(), 2);
        assert_eq!(job.strokes[0].stroke_id(), None);
        assert_eq!(job.strokes[1].stroke_id(), Some("s-1"));
        assert_eq!(job.recognition_config().min_confidence, 0.7);
        assert_eq!(job.output_path(), PathBuf::from("inkshape_report.json"));
        assert!(job.validate().is_ok());
    }

    #[test]
    fn run_reports_every_stroke() {
        let job: RecognizeJob = serde_json::from_str(JOB).expect("parse job");
        let report = job.run(&mut SequentialIds::default());
        assert_eq!(report.strokes.len(), 2);

        let first = &report.strokes[0];
        assert!(!first.result.recognized);
        assert_eq!(first.point_count, 2);
        assert_eq!(first.smoothed_point_count, Some(5));

        let second = &report.strokes[1];
        assert_eq!(second.result.shape_type, Some(ShapeType::Line));
        let shape = second.result.shape.as_ref().expect("shape");
        assert_eq!(shape.color, "#3366ff");
        assert_eq!(shape.original_stroke_id.as_deref(), Some("s-1"));
        assert_eq!(report.recognized_count(), 1);
    }

    #[test]
    fn validate_surfaces_config_errors() {
        let mut job: RecognizeJob = serde_json::from_str(JOB).expect("parse job");
        job.smoothing = Some(SmoothingConfig::default().with_resolution(0));
        assert_eq!(
            job.validate(),
            Err(JobConfigError::Smoothing(SmoothingConfigError::ZeroResolution))
        );
    }

    #[test]
    fn report_round_trips_through_disk() {
        let job: RecognizeJob = serde_json::from_str(JOB).expect("parse job");
        let report = job.run(&mut SequentialIds::default());
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");
        report.write_json(&path).expect("write");
        let back = RecognizeReport::load_json(&path).expect("load");
        assert_eq!(back.strokes.len(), 2);
        assert_eq!(back.strokes[1].result.shape_type, Some(ShapeType::Line));
        assert_eq!(back.strokes[1].stroke_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RecognizeJob::load_json("/nonexistent/job.json").expect_err("missing");
        assert!(matches!(err, JobIoError::Io(_)));
    }
}
