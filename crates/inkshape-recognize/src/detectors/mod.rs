//! Per-shape detectors.
//!
//! Every detector is a pure function of the stroke's [`StrokeFeatures`]
//! (and, for the shapes that need local structure, the raw points). A
//! detection carries a confidence in `[0, 1]` and, only when the detector's
//! confidence threshold *and* its structural gates both pass, the raw shape
//! parameters. The matching `optimize_*` function snaps those parameters to
//! the values actually drawn.
//!
//! [`StrokeFeatures`]: crate::StrokeFeatures

mod arrow;
mod circle;
mod line;
mod rectangle;
mod symbol;
mod triangle;

pub use arrow::{detect_arrow, optimize_arrow, ARROW_HEAD_WINDOW_MAX};
pub use circle::{detect_circle, optimize_circle};
pub use line::{detect_line, optimize_line, LINE_SNAP_TOLERANCE_DEG};
pub use rectangle::{
    detect_rectangle, is_square, optimize_rectangle, RectangleMatch, SQUARE_DETECT_TOLERANCE,
    SQUARE_SNAP_TOLERANCE,
};
pub use symbol::{detect_symbol, optimize_symbol, SymbolKind, SymbolMatch, SYMBOL_MAX_SIZE};
pub use triangle::{detect_triangle, optimize_triangle};

use inkshape_core::Point;
use serde::Serialize;

/// Outcome of one detector.
///
/// `params` is present exactly when the stroke was detected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Detection<P> {
    pub confidence: f64,
    pub params: Option<P>,
}

impl<P> Detection<P> {
    pub fn hit(confidence: f64, params: P) -> Self {
        Self {
            confidence,
            params: Some(params),
        }
    }

    /// Scored but not detected.
    pub fn miss(confidence: f64) -> Self {
        Self {
            confidence,
            params: None,
        }
    }

    /// Rejected before scoring.
    pub fn rejected() -> Self {
        Self::miss(0.0)
    }

    #[inline]
    pub fn detected(&self) -> bool {
        self.params.is_some()
    }
}

/// `1` above `full`, otherwise the linear ramp `value / full`.
#[inline]
pub(crate) fn saturating_score(value: f64, full: f64) -> f64 {
    if value > full {
        1.0
    } else {
        value / full
    }
}

/// Round to the pixel grid, dropping pressure and timestamp.
#[inline]
pub(crate) fn round_point(p: &Point) -> Point {
    Point::new(p.x.round(), p.y.round())
}
