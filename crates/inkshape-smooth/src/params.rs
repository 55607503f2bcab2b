use serde::{Deserialize, Serialize};

/// Configuration for [`smooth_stroke`](crate::smooth_stroke).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Interpolated samples per input segment.
    pub resolution: usize,
    /// Points closer than this to the previously kept point are dropped.
    pub min_point_distance: f64,
    /// Run Douglas-Peucker before the spline pass.
    pub simplify_first: bool,
    /// Douglas-Peucker tolerance, only read when `simplify_first` is set.
    pub simplify_epsilon: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            resolution: 8,
            min_point_distance: 2.0,
            simplify_first: false,
            simplify_epsilon: 1.5,
        }
    }
}

impl SmoothingConfig {
    /// Lighter settings for redrawing a stroke that is still being drawn.
    pub fn live_preview() -> Self {
        Self {
            resolution: 4,
            ..Self::default()
        }
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn validate(&self) -> Result<(), SmoothingConfigError> {
        if self.resolution == 0 {
            return Err(SmoothingConfigError::ZeroResolution);
        }
        if !self.min_point_distance.is_finite() || self.min_point_distance < 0.0 {
            return Err(SmoothingConfigError::MinPointDistance(
                self.min_point_distance,
            ));
        }
        if !self.simplify_epsilon.is_finite() || self.simplify_epsilon < 0.0 {
            return Err(SmoothingConfigError::SimplifyEpsilon(self.simplify_epsilon));
        }
        Ok(())
    }
}

/// Rejected smoothing settings.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SmoothingConfigError {
    #[error("resolution must be at least 1")]
    ZeroResolution,
    #[error("min_point_distance must be a finite, non-negative number (got {0})")]
    MinPointDistance(f64),
    #[error("simplify_epsilon must be a finite, non-negative number (got {0})")]
    SimplifyEpsilon(f64),
}
