//! Parameter and closest-point search along a rendered edge path.
//!
//! Both searches work in arc-length space through [`PathSampler`], so they run
//! unchanged against the in-crate [`SampledCubic`](crate::geometry::sampler::SampledCubic)
//! or a host-provided sampler. They assume the distance to the query is
//! unimodal along the searched window; on paths that loop back toward the
//! query they can settle on a local minimum.

use crate::config::LocatorConfig;
use crate::error::{ensure_finite, ensure_finite_point, GeometryError};
use crate::geometry::cubic::CubicBezier;
use crate::geometry::sampler::PathSampler;
use crate::geometry::tolerance::{
    clamp01, EPS_LEN, MAX_BISECT_ITERS, MAX_REFINE_ITERS, MAX_SCAN_SAMPLES, RAD_TO_DEG,
};
use crate::model::Point;
use serde::{Deserialize, Serialize};

/// Result of a closest-point query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClosestPoint {
    pub point: Point,
    /// Arc-length position of `point`.
    pub length: f32,
    /// `length / total_length`.
    pub t: f32,
    /// Direction of travel at `point`, degrees.
    pub tangent_angle: f32,
    pub distance: f32,
}

fn checked_length<S: PathSampler + ?Sized>(path: &S) -> Result<f32, GeometryError> {
    let total = path.total_length();
    if !total.is_finite() || total <= EPS_LEN {
        return Err(GeometryError::ZeroLength);
    }
    Ok(total)
}

/// Arc-length fraction in [0, 1] whose point is closest to `query`.
///
/// Narrows `[lower, upper]` by comparing the distance at both ends and at the
/// middle until the window is at most `tolerance` long.
pub fn closest_parameter<S: PathSampler + ?Sized>(
    path: &S,
    query: Point,
    tolerance: f32,
) -> Result<f32, GeometryError> {
    ensure_finite_point("query", query)?;
    ensure_finite("tolerance", tolerance)?;
    if tolerance <= 0.0 {
        return Err(GeometryError::OutOfRange { param: "tolerance", min: 0.0, max: f32::MAX, got: tolerance });
    }
    let total = checked_length(path)?;

    let mut lower = 0.0f32;
    let mut upper = total;
    let mut closest = (upper + lower) / 2.0;
    let mut iters = 0u32;

    while upper - lower > tolerance {
        if iters >= MAX_BISECT_ITERS {
            log::warn!(
                "closest_parameter: stopped after {} iterations (window {:.4})",
                iters,
                upper - lower
            );
            break;
        }
        iters += 1;

        let midpoint = (upper + lower) / 2.0;
        let d1 = path.point_at_length(lower).distance(query);
        let d2 = path.point_at_length(midpoint).distance(query);
        let d3 = path.point_at_length(upper).distance(query);

        if d1 < d2 && d1 < d3 {
            upper = midpoint;
        } else if d2 < d1 && d2 < d3 {
            lower += (midpoint - lower) / 2.0;
            upper -= (upper - midpoint) / 2.0;
        } else {
            lower = midpoint;
        }

        closest = (upper + lower) / 2.0;
    }

    log::debug!("closest_parameter: {} iterations, length {:.3} of {:.3}", iters, closest, total);
    Ok(clamp01(closest / total))
}

/// Point at arc-length fraction `t` (clamped to [0, 1]).
pub fn point_at_parameter<S: PathSampler + ?Sized>(path: &S, t: f32) -> Point {
    let total = path.total_length();
    if !total.is_finite() {
        return path.point_at_length(0.0);
    }
    let t = if t.is_nan() { 0.0 } else { clamp01(t) };
    if t >= 1.0 {
        return path.point_at_length(total);
    }
    path.point_at_length(t * total)
}

/// Tangent direction of the cubic at curve parameter `t`, degrees.
pub fn tangent_angle_at(curve: &CubicBezier, t: f32) -> f32 {
    curve.tangent_angle(t)
}

/// Closest point on the path to `query`.
///
/// Scans at `scan_step`, then repeatedly tries one half-step to either side of
/// the best sample, halving the step whenever neither side improves.
pub fn closest_point_on_curve<S: PathSampler + ?Sized>(
    path: &S,
    query: Point,
    config: &LocatorConfig,
) -> Result<ClosestPoint, GeometryError> {
    ensure_finite_point("query", query)?;
    config.validate()?;
    let total = checked_length(path)?;

    let distance2 = |p: Point| p.distance_sq(query);

    let mut precision = config.scan_step;
    let mut samples = (total / precision).ceil();
    if samples > MAX_SCAN_SAMPLES as f32 {
        samples = MAX_SCAN_SAMPLES as f32;
        precision = total / samples;
        log::warn!(
            "closest_point_on_curve: scan step widened to {:.3} on a path of length {:.3}",
            precision,
            total
        );
    }

    let mut best = path.point_at_length(0.0);
    let mut best_length = 0.0f32;
    let mut best_distance = distance2(best);

    // Last sample is clamped onto the end of the path
    for i in 1..=samples as u32 {
        let scan_length = (i as f32 * precision).min(total);
        let scan = path.point_at_length(scan_length);
        let d = distance2(scan);
        if d < best_distance {
            best = scan;
            best_length = scan_length;
            best_distance = d;
        }
    }

    precision /= 2.0;
    let mut iters = 0u32;
    while precision > config.min_step {
        if iters >= MAX_REFINE_ITERS {
            log::warn!("closest_point_on_curve: refinement stopped after {} iterations", iters);
            break;
        }
        iters += 1;

        let before_length = best_length - precision;
        let after_length = best_length + precision;
        if before_length >= 0.0 {
            let before = path.point_at_length(before_length);
            let d = distance2(before);
            if d < best_distance {
                best = before;
                best_length = before_length;
                best_distance = d;
                continue;
            }
        }
        if after_length <= total {
            let after = path.point_at_length(after_length);
            let d = distance2(after);
            if d < best_distance {
                best = after;
                best_length = after_length;
                best_distance = d;
                continue;
            }
        }
        precision /= 2.0;
    }

    let tangent_angle = finite_difference_angle(path, best, best_length, total, config.tangent_delta);

    Ok(ClosestPoint {
        point: best,
        length: best_length,
        t: clamp01(best_length / total),
        tangent_angle,
        distance: best_distance.sqrt(),
    })
}

// Look ahead by `delta` along the path; at the very end, look behind instead.
fn finite_difference_angle<S: PathSampler + ?Sized>(
    path: &S,
    at: Point,
    length: f32,
    total: f32,
    delta: f32,
) -> f32 {
    let (from, to) = if length + delta > total {
        (path.point_at_length(length - delta), at)
    } else {
        (at, path.point_at_length(length + delta))
    };
    (to.y - from.y).atan2(to.x - from.x) * RAD_TO_DEG
}
