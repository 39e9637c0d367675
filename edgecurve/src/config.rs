//! Tunables for routing, path search and label placement.
//!
//! All sections deserialize with defaults, so a host can send a partial JSON
//! document such as `{"curve": {"skew": {"dx": 0, "dy": 0}}}`.

use crate::error::{ConfigError, GeometryError};
use crate::geometry::limits::in_width_bounds;
use crate::geometry::tolerance::{
    DEFAULT_ARC_SAMPLES, DEFAULT_MIN_STEP, DEFAULT_SCAN_STEP, DEFAULT_TANGENT_DELTA,
    DEFAULT_TOLERANCE,
};
use serde::{Deserialize, Serialize};

/// Fixed shift applied to both bezier control points after routing.
///
/// `P1` is shifted by `(+dx, -dy)` and `P2` by `(+dx, +dy)` to counter a
/// curvature bias of the host renderer. The values are empirical.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlSkew {
    pub dx: f32,
    pub dy: f32,
}

impl ControlSkew {
    pub const NONE: ControlSkew = ControlSkew { dx: 0.0, dy: 0.0 };
}

impl Default for ControlSkew {
    fn default() -> Self {
        ControlSkew { dx: 100.0, dy: 50.0 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub skew: ControlSkew,
}

impl CurveConfig {
    pub fn unskewed() -> Self {
        CurveConfig { skew: ControlSkew::NONE }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Bisection stops once the arc-length window is this small.
    pub tolerance: f32,
    /// Coarse scan step for the closest-point search.
    pub scan_step: f32,
    /// Refinement stops once the step falls to this size.
    pub min_step: f32,
    /// Arc-length look-ahead used for the finite-difference tangent.
    pub tangent_delta: f32,
    /// Resolution of the arc-length table built for each path.
    pub arc_samples: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        LocatorConfig {
            tolerance: DEFAULT_TOLERANCE,
            scan_step: DEFAULT_SCAN_STEP,
            min_step: DEFAULT_MIN_STEP,
            tangent_delta: DEFAULT_TANGENT_DELTA,
            arc_samples: DEFAULT_ARC_SAMPLES,
        }
    }
}

impl LocatorConfig {
    pub fn validate(&self) -> Result<(), GeometryError> {
        positive("tolerance", self.tolerance)?;
        positive("scan_step", self.scan_step)?;
        positive("min_step", self.min_step)?;
        positive("tangent_delta", self.tangent_delta)?;
        if self.min_step > self.scan_step {
            return Err(GeometryError::OutOfRange {
                param: "min_step",
                min: 0.0,
                max: self.scan_step,
                got: self.min_step,
            });
        }
        if self.arc_samples == 0 {
            return Err(GeometryError::OutOfRange {
                param: "arc_samples",
                min: 1.0,
                max: f32::MAX,
                got: 0.0,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Added to half the label width for the horizontal offset.
    pub margin_x: f32,
    /// Vertical offset magnitude.
    pub offset_y: f32,
    /// Pointer must be farther than this from the curve to pick a side.
    pub side_threshold: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig { margin_x: 15.0, offset_y: 20.0, side_threshold: 20.0 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub curve: CurveConfig,
    pub locator: LocatorConfig,
    pub label: LabelConfig,
}

impl Config {
    pub fn from_json(s: &str) -> Result<Config, ConfigError> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Config, ConfigError> {
        let cfg: Config = serde_json::from_value(v)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Plain numeric struct; serialization cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if !self.curve.skew.dx.is_finite() {
            return Err(GeometryError::NonFinite { param: "skew.dx" });
        }
        if !self.curve.skew.dy.is_finite() {
            return Err(GeometryError::NonFinite { param: "skew.dy" });
        }
        self.locator.validate()?;
        if !in_width_bounds(self.label.margin_x) {
            return Err(GeometryError::NonFinite { param: "margin_x" });
        }
        if !in_width_bounds(self.label.offset_y) {
            return Err(GeometryError::NonFinite { param: "offset_y" });
        }
        if !in_width_bounds(self.label.side_threshold) {
            return Err(GeometryError::NonFinite { param: "side_threshold" });
        }
        Ok(())
    }
}

fn positive(param: &'static str, v: f32) -> Result<(), GeometryError> {
    if !v.is_finite() {
        return Err(GeometryError::NonFinite { param });
    }
    if v <= 0.0 {
        return Err(GeometryError::OutOfRange { param, min: 0.0, max: f32::MAX, got: v });
    }
    Ok(())
}
