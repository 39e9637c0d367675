//! Arc-length sampling of rendered edge paths.
//!
//! The host renderer exposes "total length" and "point at length" for the
//! paths it draws. [`PathSampler`] is that capability; [`SampledCubic`] is the
//! in-crate implementation for a single cubic segment, backed by a cumulative
//! arc-length table so every lookup is a binary search plus one evaluation.

use crate::geometry::cubic::CubicBezier;
use crate::geometry::tolerance::{safe_div, DEFAULT_ARC_SAMPLES};
use crate::model::Point;

/// Read-only length queries against a rendered path.
pub trait PathSampler {
    /// Total arc length of the path.
    fn total_length(&self) -> f32;

    /// Point at `length` units from the start, clamped to the path.
    fn point_at_length(&self, length: f32) -> Point;
}

/// A cubic with a precomputed cumulative arc-length table.
#[derive(Clone, Debug)]
pub struct SampledCubic {
    curve: CubicBezier,
    // cumulative[i] = length from t=0 to t=i/n
    cumulative: Vec<f32>,
}

impl SampledCubic {
    pub fn new(curve: CubicBezier) -> Self {
        Self::with_resolution(curve, DEFAULT_ARC_SAMPLES)
    }

    pub fn with_resolution(curve: CubicBezier, samples: usize) -> Self {
        let n = samples.max(1);
        let mut cumulative = Vec::with_capacity(n + 1);
        cumulative.push(0.0f32);

        let mut prev = curve.p0;
        let mut total = 0.0f32;
        for i in 1..=n {
            let p = curve.eval(i as f32 / n as f32);
            total += prev.distance(p);
            cumulative.push(total);
            prev = p;
        }

        Self { curve, cumulative }
    }

    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    /// Curve parameter at a given arc length.
    pub fn parameter_at_length(&self, length: f32) -> f32 {
        let total = self.total_length();
        if !length.is_finite() || !total.is_finite() || length <= 0.0 || total <= 0.0 {
            return 0.0;
        }
        if length >= total {
            return 1.0;
        }

        // First table entry strictly greater than `length`
        let hi = self.cumulative.partition_point(|&c| c <= length);
        if hi == 0 {
            return 0.0;
        }
        if hi >= self.cumulative.len() {
            return 1.0;
        }
        let lo = hi - 1;
        let seg = self.cumulative[hi] - self.cumulative[lo];
        let local = safe_div(length - self.cumulative[lo], seg, 0.0);
        let n = (self.cumulative.len() - 1) as f32;
        (lo as f32 + local) / n
    }

    /// Arc length from the start up to parameter t.
    pub fn length_at_parameter(&self, t: f32) -> f32 {
        let n = self.cumulative.len() - 1;
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return self.total_length();
        }
        let scaled = t * n as f32;
        let lo = (scaled.floor() as usize).min(n - 1);
        let frac = scaled - lo as f32;
        self.cumulative[lo] + frac * (self.cumulative[lo + 1] - self.cumulative[lo])
    }
}

impl PathSampler for SampledCubic {
    fn total_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn point_at_length(&self, length: f32) -> Point {
        if length <= 0.0 {
            return self.curve.p0;
        }
        if length >= self.total_length() {
            return self.curve.p3;
        }
        self.curve.eval(self.parameter_at_length(length))
    }
}

impl From<CubicBezier> for SampledCubic {
    fn from(curve: CubicBezier) -> Self {
        SampledCubic::new(curve)
    }
}
