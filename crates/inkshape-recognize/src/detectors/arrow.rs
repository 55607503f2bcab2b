use inkshape_core::{distance, to_degrees, vector_angle, vector_from_points, ArrowParams, Point};

use super::{round_point, saturating_score, Detection};
use crate::features::StrokeFeatures;

/// Upper bound on the number of trailing points inspected for a head.
pub const ARROW_HEAD_WINDOW_MAX: usize = 20;

const HEAD_WINDOW_FRACTION: f64 = 0.3;
const MIN_BODY_LENGTH: f64 = 30.0;
const HEAD_SIZE_MIN: f64 = 10.0;
const HEAD_SIZE_MAX: f64 = 30.0;

#[derive(Debug, Default)]
struct HeadCheck {
    sharp_turns: usize,
    confidence: f64,
    start: Point,
    end: Point,
    head_size: f64,
}

impl HeadCheck {
    fn found(&self) -> bool {
        self.sharp_turns >= 1
    }
}

pub fn detect_arrow(features: &StrokeFeatures, points: &[Point]) -> Detection<ArrowParams> {
    if features.is_closed || !(1..=4).contains(&features.corner_count) {
        return Detection::rejected();
    }

    let at_end = check_head(points);
    let reversed: Vec<Point> = points.iter().rev().copied().collect();
    let at_start = check_head(&reversed);
    // ties go to the head drawn first
    let head = if at_end.confidence > at_start.confidence {
        at_end
    } else {
        at_start
    };

    let body_score = saturating_score(features.path_length, MIN_BODY_LENGTH);
    let confidence = 0.2 + 0.6 * head.confidence + 0.2 * body_score;

    if confidence > 0.6 && head.found() {
        Detection::hit(
            confidence,
            ArrowParams {
                start: head.start,
                end: head.end,
                head_size: head.head_size,
            },
        )
    } else {
        Detection::miss(confidence)
    }
}

/// Count sharp heading changes (30°–150°) inside the trailing window.
fn check_head(points: &[Point]) -> HeadCheck {
    let n = points.len();
    if n < 5 {
        return HeadCheck::default();
    }

    let window_len =
        ((n as f64 * HEAD_WINDOW_FRACTION).floor() as usize).min(ARROW_HEAD_WINDOW_MAX);
    if window_len < 3 {
        return HeadCheck::default();
    }
    let window = &points[n - window_len..];

    let sharp_turns = window
        .windows(3)
        .filter(|w| {
            let h1 = to_degrees(vector_angle(&vector_from_points(&w[0], &w[1])));
            let h2 = to_degrees(vector_angle(&vector_from_points(&w[1], &w[2])));
            let diff = (h2 - h1).abs();
            diff > 30.0 && diff < 150.0
        })
        .count();

    let end = points[n - 1];
    HeadCheck {
        sharp_turns,
        confidence: (sharp_turns as f64 / 2.0).min(1.0),
        start: points[0],
        end,
        head_size: (0.8 * distance(&window[0], &end)).clamp(HEAD_SIZE_MIN, HEAD_SIZE_MAX),
    }
}

pub fn optimize_arrow(start: &Point, end: &Point, head_size: f64) -> ArrowParams {
    ArrowParams {
        start: round_point(start),
        end: round_point(end),
        head_size: head_size.round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::fixtures::{polyline, square};
    use crate::extract_features;
    use approx::assert_relative_eq;

    /// Shaft to the right, then both barbs drawn from the tip.
    fn arrow_stroke() -> Vec<Point> {
        let mut pts = polyline(&[(0.0, 50.0), (100.0, 50.0)], 10.0);
        pts.extend(
            [(93.0, 43.0), (86.0, 36.0), (93.0, 43.0), (100.0, 50.0), (93.0, 57.0), (86.0, 64.0)]
                .map(Point::from),
        );
        pts
    }

    #[test]
    fn arrow_with_head_at_end() {
        let pts = arrow_stroke();
        let det = detect_arrow(&extract_features(&pts), &pts);
        assert!(det.detected());
        assert_relative_eq!(det.confidence, 0.7, epsilon = 1e-12);
        let a = det.params.expect("arrow");
        assert_eq!(a.start, Point::new(0.0, 50.0));
        assert_eq!(a.end, Point::new(86.0, 64.0));
        assert_relative_eq!(a.head_size, 22.4, epsilon = 1e-9);
    }

    #[test]
    fn head_drawn_first_is_found_by_reversal() {
        let mut pts = arrow_stroke();
        pts.reverse();
        let det = detect_arrow(&extract_features(&pts), &pts);
        assert!(det.detected());
        // the head side always ends up at `end`
        let a = det.params.expect("arrow");
        assert_eq!(a.start, Point::new(0.0, 50.0));
        assert_eq!(a.end, Point::new(86.0, 64.0));
    }

    #[test]
    fn closed_or_cornerless_strokes_are_rejected() {
        let sq = square(0.0, 0.0, 100.0);
        let det = detect_arrow(&extract_features(&sq), &sq);
        assert_eq!(det, Detection::rejected());

        let line = polyline(&[(0.0, 0.0), (100.0, 0.0)], 10.0);
        let det = detect_arrow(&extract_features(&line), &line);
        assert_eq!(det.confidence, 0.0);
    }

    #[test]
    fn short_input_has_no_head() {
        let pts = polyline(&[(0.0, 0.0), (30.0, 0.0)], 10.0);
        assert!(!check_head(&pts).found());
    }

    #[test]
    fn optimize_rounds_everything() {
        let a = optimize_arrow(&Point::new(0.4, 49.6), &Point::new(86.2, 63.8), 22.4);
        assert_eq!(a.start, Point::new(0.0, 50.0));
        assert_eq!(a.end, Point::new(86.0, 64.0));
        assert_eq!(a.head_size, 22.0);
    }
}
