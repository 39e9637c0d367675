use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        self.distance_sq(other).sqrt()
    }

    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(self.x + t * (other.x - self.x), self.y + t * (other.y - self.y))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Face of a node an edge handle sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Wire code used by the JS binding (0:Top, 1:Right, 2:Bottom, 3:Left).
    pub fn from_code(code: u8) -> Option<Side> {
        match code {
            0 => Some(Side::Top),
            1 => Some(Side::Right),
            2 => Some(Side::Bottom),
            3 => Some(Side::Left),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Side::Top),
            "right" => Ok(Side::Right),
            "bottom" => Ok(Side::Bottom),
            "left" => Ok(Side::Left),
            other => Err(GeometryError::Parse(format!("unknown side '{}'", other))),
        }
    }
}

/// Which side of the curve a label is pushed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSide {
    #[default]
    Right = 0,
    Center = 1,
    Left = 2,
}

impl LabelSide {
    pub fn from_code(code: u8) -> Option<LabelSide> {
        match code {
            0 => Some(LabelSide::Right),
            1 => Some(LabelSide::Center),
            2 => Some(LabelSide::Left),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parses_names_and_codes() {
        assert_eq!("Top".parse::<Side>().unwrap(), Side::Top);
        assert_eq!(" left ".parse::<Side>().unwrap(), Side::Left);
        assert!("north".parse::<Side>().is_err());
        for side in Side::ALL {
            assert_eq!(Side::from_code(side as u8), Some(side));
        }
        assert_eq!(Side::from_code(4), None);
    }

    #[test]
    fn point_helpers() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.midpoint(b), Point::new(1.5, 2.0));
        assert_eq!(a.lerp(b, 1.0), b);
        assert!(!Point::new(f32::NAN, 0.0).is_finite());
    }
}
