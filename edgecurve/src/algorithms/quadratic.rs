//! Quadratic curve with an on-curve drag handle.
//!
//! The handle the user drags sits on the curve at t = 0.5; the real control
//! point is derived from it. Pointer positions arrive in client pixels and are
//! projected into the SVG view box first.

use crate::error::{ensure_finite_point, GeometryError};
use crate::model::Point;
use serde::{Deserialize, Serialize};

/// Maps host input coordinates into diagram coordinates.
pub trait Projection {
    fn project(&self, client: Point) -> Point;
}

/// Client rectangle of an SVG element and its `viewBox`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewBoxProjection {
    pub rect_left: f32,
    pub rect_top: f32,
    pub rect_width: f32,
    pub rect_height: f32,
    pub view_x: f32,
    pub view_y: f32,
    pub view_width: f32,
    pub view_height: f32,
}

impl ViewBoxProjection {
    pub fn new(rect: [f32; 4], view_box: [f32; 4]) -> Result<Self, GeometryError> {
        for (param, v) in [("rect_width", rect[2]), ("rect_height", rect[3])] {
            if !v.is_finite() || v <= 0.0 {
                return Err(GeometryError::OutOfRange { param, min: 0.0, max: f32::MAX, got: v });
            }
        }
        if rect.iter().chain(view_box.iter()).any(|v| !v.is_finite()) {
            return Err(GeometryError::NonFinite { param: "view_box" });
        }
        Ok(Self {
            rect_left: rect[0],
            rect_top: rect[1],
            rect_width: rect[2],
            rect_height: rect[3],
            view_x: view_box[0],
            view_y: view_box[1],
            view_width: view_box[2],
            view_height: view_box[3],
        })
    }
}

impl Projection for ViewBoxProjection {
    /// Rounded to whole view-box units.
    fn project(&self, client: Point) -> Point {
        Point::new(
            ((client.x - self.rect_left) * self.view_width / self.rect_width + self.view_x).round(),
            ((client.y - self.rect_top) * self.view_height / self.rect_height + self.view_y).round(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuadHandle {
    Start,
    Mid,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadraticHandle {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl Default for QuadraticHandle {
    fn default() -> Self {
        Self {
            start: Point::new(-400.0, 0.0),
            control: Point::new(0.0, 0.0),
            end: Point::new(400.0, 0.0),
        }
    }
}

impl QuadraticHandle {
    /// Build from the three visible handles (mid handle on the curve).
    pub fn from_handles(start: Point, mid: Point, end: Point) -> Self {
        let mut q = Self { start, control: mid, end };
        q.control = q.control_for_mid(mid);
        q
    }

    fn control_for_mid(&self, mid: Point) -> Point {
        let chord_mid = self.start.midpoint(self.end);
        Point::new(2.0 * mid.x - chord_mid.x, 2.0 * mid.y - chord_mid.y)
    }

    /// Curve point at t = 0.5, where the mid handle is drawn.
    pub fn mid_handle(&self) -> Point {
        self.control.midpoint(self.start.midpoint(self.end))
    }

    pub fn eval(&self, t: f32) -> Point {
        let mt = 1.0 - t;
        Point::new(
            mt * mt * self.start.x + 2.0 * mt * t * self.control.x + t * t * self.end.x,
            mt * mt * self.start.y + 2.0 * mt * t * self.control.y + t * t * self.end.y,
        )
    }

    /// Move one handle to `p` (diagram coordinates).
    ///
    /// Endpoints keep the control point; the mid handle is re-derived.
    pub fn move_handle(&mut self, handle: QuadHandle, p: Point) -> Result<(), GeometryError> {
        ensure_finite_point("handle", p)?;
        match handle {
            QuadHandle::Start => self.start = p,
            QuadHandle::End => self.end = p,
            QuadHandle::Mid => self.control = self.control_for_mid(p),
        }
        Ok(())
    }

    pub fn to_svg_path(&self) -> String {
        format!(
            "M{} {} Q{} {}, {} {}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }
}

/// Tracks which handle, if any, is being dragged.
#[derive(Clone, Debug, Default)]
pub struct QuadraticDrag {
    pub curve: QuadraticHandle,
    dragged: Option<QuadHandle>,
}

impl QuadraticDrag {
    pub fn new(curve: QuadraticHandle) -> Self {
        Self { curve, dragged: None }
    }

    pub fn dragged(&self) -> Option<QuadHandle> {
        self.dragged
    }

    pub fn press(&mut self, handle: QuadHandle) {
        self.dragged = Some(handle);
    }

    pub fn release(&mut self) {
        self.dragged = None;
    }

    /// Returns whether the curve changed.
    pub fn pointer_move<P: Projection>(&mut self, projection: &P, client: Point) -> Result<bool, GeometryError> {
        let Some(handle) = self.dragged else {
            return Ok(false);
        };
        let p = projection.project(client);
        self.curve.move_handle(handle, p)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proj() -> ViewBoxProjection {
        // 800x400 px element showing viewBox -400 -200 800 400
        ViewBoxProjection::new([10.0, 20.0, 800.0, 400.0], [-400.0, -200.0, 800.0, 400.0]).unwrap()
    }

    #[test]
    fn projection_maps_and_rounds() {
        let p = proj();
        assert_eq!(p.project(Point::new(10.0, 20.0)), Point::new(-400.0, -200.0));
        assert_eq!(p.project(Point::new(410.4, 220.6)), Point::new(0.0, 1.0));
    }

    #[test]
    fn projection_rejects_empty_rect() {
        assert!(ViewBoxProjection::new([0.0, 0.0, 0.0, 10.0], [0.0, 0.0, 1.0, 1.0]).is_err());
    }

    #[test]
    fn mid_handle_is_on_curve() {
        let q = QuadraticHandle::from_handles(Point::new(-400.0, 0.0), Point::new(0.0, -100.0), Point::new(400.0, 0.0));
        assert_eq!(q.control, Point::new(0.0, -200.0));
        assert_eq!(q.mid_handle(), Point::new(0.0, -100.0));
        assert_eq!(q.eval(0.5), q.mid_handle());
    }

    #[test]
    fn moving_endpoint_keeps_control() {
        let mut q = QuadraticHandle::from_handles(Point::new(-400.0, 0.0), Point::new(0.0, -100.0), Point::new(400.0, 0.0));
        q.move_handle(QuadHandle::End, Point::new(400.0, 200.0)).unwrap();
        assert_eq!(q.control, Point::new(0.0, -200.0));
        assert_eq!(q.mid_handle(), Point::new(0.0, -50.0));
    }

    #[test]
    fn drag_session() {
        let mut d = QuadraticDrag::new(QuadraticHandle::default());
        assert!(!d.pointer_move(&proj(), Point::new(100.0, 100.0)).unwrap());

        d.press(QuadHandle::Mid);
        assert!(d.pointer_move(&proj(), Point::new(410.0, 120.0)).unwrap());
        // Pointer at view (0, -100): handle there, control twice as far from the chord
        assert_eq!(d.curve.control, Point::new(0.0, -200.0));
        assert_eq!(d.curve.to_svg_path(), "M-400 0 Q0 -200, 400 0");

        d.release();
        assert_eq!(d.dragged(), None);
    }
}
