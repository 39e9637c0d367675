//! Cubic Bézier evaluation, subdivision and arc length.
//!
//! Edge paths are always a single cubic segment, so these helpers work on the
//! four control points directly.

use crate::geometry::tolerance::{MAX_ARC_DEPTH, RAD_TO_DEG};
use crate::model::Point;
use serde::{Deserialize, Serialize};

/// Control points of a cubic Bézier curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Point, // Start point
    pub p1: Point, // First control point
    pub p2: Point, // Second control point
    pub p3: Point, // End point
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    pub fn points(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    pub fn is_finite(&self) -> bool {
        self.points().iter().all(|p| p.is_finite())
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        Point {
            x: mt3 * self.p0.x + 3.0 * mt2 * t * self.p1.x + 3.0 * mt * t2 * self.p2.x + t3 * self.p3.x,
            y: mt3 * self.p0.y + 3.0 * mt2 * t * self.p1.y + 3.0 * mt * t2 * self.p2.y + t3 * self.p3.y,
        }
    }

    /// Derivative dP/dt at parameter t.
    pub fn tangent(&self, t: f32) -> Point {
        let t2 = t * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;

        Point {
            x: 3.0 * mt2 * (self.p1.x - self.p0.x)
                + 6.0 * mt * t * (self.p2.x - self.p1.x)
                + 3.0 * t2 * (self.p3.x - self.p2.x),
            y: 3.0 * mt2 * (self.p1.y - self.p0.y)
                + 6.0 * mt * t * (self.p2.y - self.p1.y)
                + 3.0 * t2 * (self.p3.y - self.p2.y),
        }
    }

    /// Direction of the tangent at t in degrees, `atan2(dy, dx)`.
    pub fn tangent_angle(&self, t: f32) -> f32 {
        let d = self.tangent(t);
        d.y.atan2(d.x) * RAD_TO_DEG
    }

    /// Split the curve at parameter t using de Casteljau subdivision.
    ///
    /// Returns two cubic curves: the first from 0..t, the second from t..1.
    pub fn split_at(&self, t: f32) -> (CubicBezier, CubicBezier) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);

        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);

        let p0123 = p012.lerp(p123, t); // The split point

        let first = CubicBezier::new(self.p0, p01, p012, p0123);
        let second = CubicBezier::new(p0123, p123, p23, self.p3);

        (first, second)
    }

    /// Approximate arc length using adaptive subdivision.
    pub fn arc_length(&self, tolerance: f32) -> f32 {
        arc_length_recursive(self, tolerance, 0)
    }
}

fn arc_length_recursive(c: &CubicBezier, tolerance: f32, depth: u32) -> f32 {
    let chord = c.p0.distance(c.p3);
    let poly_len = c.p0.distance(c.p1) + c.p1.distance(c.p2) + c.p2.distance(c.p3);

    // Flat enough: average of chord and control polygon
    if depth >= MAX_ARC_DEPTH || (poly_len - chord).abs() < tolerance {
        return (chord + poly_len) * 0.5;
    }

    let (left, right) = c.split_at(0.5);
    arc_length_recursive(&left, tolerance, depth + 1) + arc_length_recursive(&right, tolerance, depth + 1)
}
