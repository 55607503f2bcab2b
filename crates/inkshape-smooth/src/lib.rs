//! Display-side stroke smoothing.
//!
//! Two independent smoothers, both pure:
//! - [`smooth_stroke`]: Catmull-Rom resampling through the captured points,
//!   used for the live preview and for the final stroke.
//! - [`moving_average_smooth`]: cheap per-point averaging that keeps the
//!   point count.
//!
//! ## Quickstart
//!
//! ```
//! use inkshape_core::Point;
//! use inkshape_smooth::{smooth_stroke, SmoothingConfig};
//!
//! let raw = [Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(20.0, 5.0)];
//! let smooth = smooth_stroke(&raw, &SmoothingConfig::default());
//! assert_eq!(smooth.len(), 2 * 8 + 1);
//! ```

mod params;
mod smoother;

pub use params::{SmoothingConfig, SmoothingConfigError};
pub use smoother::{catmull_rom, moving_average_smooth, smooth_stroke, DEFAULT_WINDOW_SIZE};
