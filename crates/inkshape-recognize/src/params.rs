use std::collections::BTreeSet;

use inkshape_core::ShapeType;
use serde::{Deserialize, Serialize};

/// Bounds of the user-facing auto-correct threshold slider.
pub const USER_THRESHOLD_RANGE: (f64, f64) = (0.5, 0.95);

/// Parameters for [`ShapeRecognizer`](crate::ShapeRecognizer).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Top candidates below this confidence are reported but not recognized.
    pub min_confidence: f64,
    /// Detectors to run; types outside [`ShapeType::RECOGNIZABLE`] are ignored.
    pub enabled_shapes: BTreeSet<ShapeType>,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.65,
            enabled_shapes: ShapeType::RECOGNIZABLE.into_iter().collect(),
        }
    }
}

impl RecognitionConfig {
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Restrict recognition to `shapes`.
    pub fn with_enabled(mut self, shapes: impl IntoIterator<Item = ShapeType>) -> Self {
        self.enabled_shapes = shapes.into_iter().collect();
        self
    }

    /// Set `min_confidence` from the drawing settings, clamped to
    /// [`USER_THRESHOLD_RANGE`]. A non-finite value resets it to the default.
    pub fn with_user_threshold(self, threshold: f64) -> Self {
        if !threshold.is_finite() {
            return self.with_min_confidence(Self::default().min_confidence);
        }
        let (lo, hi) = USER_THRESHOLD_RANGE;
        self.with_min_confidence(threshold.clamp(lo, hi))
    }

    #[inline]
    pub fn is_enabled(&self, shape: ShapeType) -> bool {
        self.enabled_shapes.contains(&shape)
    }

    pub fn validate(&self) -> Result<(), RecognitionConfigError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(RecognitionConfigError::MinConfidence(self.min_confidence));
        }
        if !ShapeType::RECOGNIZABLE
            .iter()
            .any(|t| self.enabled_shapes.contains(t))
        {
            return Err(RecognitionConfigError::NothingEnabled);
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecognitionConfigError {
    #[error("min_confidence must lie in [0, 1] (got {0})")]
    MinConfidence(f64),
    #[error("no recognizable shape type is enabled")]
    NothingEnabled,
}
