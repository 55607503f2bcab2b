use inkshape_core::{distance, lerp, simplify_path, Point};
use log::trace;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::params::SmoothingConfig;

/// Window used by [`moving_average_smooth`] when the caller has no preference.
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Uniform Catmull-Rom interpolation between `p1` and `p2` at `t ∈ [0, 1]`.
///
/// Pressure is interpolated linearly between `p1` and `p2` when both carry
/// it; timestamps are not carried over.
pub fn catmull_rom(p0: &Point, p1: &Point, p2: &Point, p3: &Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;

    let blend = |a: f64, b: f64, c: f64, d: f64| {
        0.5 * (2.0 * b
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };

    let mut out = Point::new(blend(p0.x, p1.x, p2.x, p3.x), blend(p0.y, p1.y, p2.y, p3.y));
    if let (Some(a), Some(b)) = (p1.pressure, p2.pressure) {
        out.pressure = Some(a + (b - a) * t);
    }
    out
}

/// Resample `points` along a Catmull-Rom spline for display.
///
/// - fewer than 2 points: returned unchanged;
/// - exactly 2 points: `resolution + 1` evenly spaced points on the segment;
/// - otherwise points closer than `min_point_distance` to the previously
///   kept point are dropped (the true last point is always kept) and every
///   remaining segment is sampled `resolution` times, followed by the final
///   point.
///
/// A `resolution` of 0 is treated as 1.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(points, config), fields(n = points.len()))
)]
pub fn smooth_stroke(points: &[Point], config: &SmoothingConfig) -> Vec<Point> {
    let resolution = config.resolution.max(1);

    if points.len() < 2 {
        return points.to_vec();
    }
    if points.len() == 2 {
        return interpolate_linear(&points[0], &points[1], resolution);
    }

    let simplified;
    let source = if config.simplify_first {
        simplified = simplify_path(points, config.simplify_epsilon);
        &simplified[..]
    } else {
        points
    };

    let filtered = filter_close_points(source, config.min_point_distance);
    trace!(
        "smoothing {} points ({} after filtering), resolution {}",
        points.len(),
        filtered.len(),
        resolution
    );

    match filtered.len() {
        0 | 1 => return points.to_vec(),
        2 => return interpolate_linear(&filtered[0], &filtered[1], resolution),
        _ => {}
    }

    let last = filtered.len() - 1;
    let mut out = Vec::with_capacity(last * resolution + 1);
    for i in 0..last {
        let p0 = &filtered[i.saturating_sub(1)];
        let p1 = &filtered[i];
        let p2 = &filtered[i + 1];
        let p3 = &filtered[(i + 2).min(last)];

        for j in 0..resolution {
            let t = j as f64 / resolution as f64;
            out.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
    out.push(filtered[last]);
    out
}

/// Replace every point by the mean of its neighbours within `window_size / 2`
/// positions on either side (fewer at the ends).
///
/// Keeps the point count as well as each point's own pressure and timestamp.
/// Input shorter than `window_size` is returned unchanged.
pub fn moving_average_smooth(points: &[Point], window_size: usize) -> Vec<Point> {
    if points.len() < window_size {
        return points.to_vec();
    }

    let half = window_size / 2;
    let last = points.len() - 1;
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let window = &points[i.saturating_sub(half)..=(i + half).min(last)];
            let n = window.len() as f64;
            let (sx, sy) = window
                .iter()
                .fold((0.0, 0.0), |(sx, sy), q| (sx + q.x, sy + q.y));
            Point {
                x: sx / n,
                y: sy / n,
                ..*p
            }
        })
        .collect()
}

fn filter_close_points(points: &[Point], min_distance: f64) -> Vec<Point> {
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut out = vec![*first];
    let mut kept_last = rest.is_empty();
    for p in rest {
        kept_last = out
            .last()
            .is_some_and(|prev| distance(prev, p) >= min_distance);
        if kept_last {
            out.push(*p);
        }
    }
    if !kept_last {
        out.push(points[points.len() - 1]);
    }
    out
}

fn interpolate_linear(start: &Point, end: &Point, steps: usize) -> Vec<Point> {
    (0..=steps)
        .map(|i| lerp(start, end, i as f64 / steps as f64))
        .collect()
}
