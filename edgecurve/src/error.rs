use crate::model::Side;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("path has zero length")]
    ZeroLength,
    #[error("parameter '{param}' must be finite")]
    NonFinite { param: &'static str },
    #[error("parameter '{param}' out of range [{min}, {max}]: {got}")]
    OutOfRange {
        param: &'static str,
        min: f32,
        max: f32,
        got: f32,
    },
    #[error("no curve rule for {from} -> {to}")]
    UnmatchedSides { from: Side, to: Side },
    #[error("parse error: {0}")]
    Parse(String),
}

impl GeometryError {
    /// Stable code exposed to the JS binding.
    pub fn code(&self) -> &'static str {
        match self {
            GeometryError::ZeroLength => "zero_length",
            GeometryError::NonFinite { .. } => "non_finite",
            GeometryError::OutOfRange { .. } => "out_of_range",
            GeometryError::UnmatchedSides { .. } => "unmatched_sides",
            GeometryError::Parse(_) => "parse",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value: {0}")]
    Invalid(#[from] GeometryError),
}

pub(crate) fn ensure_finite(param: &'static str, v: f32) -> Result<f32, GeometryError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GeometryError::NonFinite { param })
    }
}

pub(crate) fn ensure_finite_point(
    param: &'static str,
    p: crate::model::Point,
) -> Result<crate::model::Point, GeometryError> {
    if p.is_finite() {
        Ok(p)
    } else {
        Err(GeometryError::NonFinite { param })
    }
}
