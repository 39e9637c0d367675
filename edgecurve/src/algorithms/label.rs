//! Edge label placement.
//!
//! A label sits at a point on the curve and is pushed sideways so it does not
//! cover the stroke. The push direction depends on the curve's tangent octant
//! and on which side of the curve the user dragged the label to.

use crate::config::{LabelConfig, LocatorConfig};
use crate::error::GeometryError;
use crate::algorithms::locate::{closest_parameter, closest_point_on_curve, point_at_parameter};
use crate::geometry::limits::in_width_bounds;
use crate::geometry::sampler::{PathSampler, SampledCubic};
use crate::geometry::tolerance::RAD_TO_DEG;
use crate::model::{LabelSide, Point};
use serde::{Deserialize, Serialize};

/// Sideways offset for a label beside a curve heading `angle` degrees.
///
/// The eight octant bands are closed on their lower bound: exactly 10° already
/// belongs to the 10..80 band.
pub fn label_offset(angle: f32, side: LabelSide, label_width: f32, config: &LabelConfig) -> (f32, f32) {
    if side == LabelSide::Center {
        return (0.0, 0.0);
    }
    let xv = label_width / 2.0 + config.margin_x;
    let yv = config.offset_y;

    let (x, y) = if (-10.0..10.0).contains(&angle) {
        (0.0, -yv)
    } else if (10.0..80.0).contains(&angle) {
        (xv, -yv)
    } else if (80.0..100.0).contains(&angle) {
        (xv, 0.0)
    } else if (100.0..170.0).contains(&angle) {
        (xv, yv)
    } else if angle >= 170.0 || angle < -170.0 {
        (0.0, yv)
    } else if (-170.0..-100.0).contains(&angle) {
        (-xv, yv)
    } else if (-100.0..-80.0).contains(&angle) {
        (-xv, 0.0)
    } else if (-80.0..-10.0).contains(&angle) {
        (-xv, -yv)
    } else {
        // NaN
        (0.0, 0.0)
    };

    match side {
        LabelSide::Left => (-x, -y),
        _ => (x, y),
    }
}

/// Compass bearing of a screen vector: 0° up, 90° right, clockwise.
pub fn compass_bearing(v: Point) -> f32 {
    let deg = v.y.atan2(v.x) * RAD_TO_DEG;
    (450.0 - deg).rem_euclid(360.0)
}

/// Side of the curve the pointer is on, or `Center` when it is close to the curve.
pub fn choose_label_side(
    start: Point,
    end: Point,
    on_curve: Point,
    pointer: Point,
    distance: f32,
    config: &LabelConfig,
) -> LabelSide {
    let bearing = compass_bearing(Point::new(pointer.x - on_curve.x, pointer.y - on_curve.y));
    let source_over_target = start.y < end.y;

    if distance <= config.side_threshold {
        return LabelSide::Center;
    }
    if bearing > 0.0 && bearing < 180.0 {
        if source_over_target { LabelSide::Right } else { LabelSide::Left }
    } else if bearing > 180.0 {
        if source_over_target { LabelSide::Left } else { LabelSide::Right }
    } else {
        LabelSide::Center
    }
}

/// A draggable edge label.
///
/// `t` is the committed arc-length fraction; `anchor` follows the pointer while
/// dragging and `position` is the anchor plus the sideways offset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeLabel {
    pub t: f32,
    pub anchor: Point,
    pub position: Point,
    pub side: LabelSide,
    pub width: f32,
    pub dragging: bool,
}

impl EdgeLabel {
    pub fn new(width: f32) -> Self {
        Self {
            t: 0.5,
            anchor: Point::default(),
            position: Point::default(),
            side: LabelSide::Right,
            width: if in_width_bounds(width) { width } else { 0.0 },
            dragging: false,
        }
    }

    fn offset(&self, path: &SampledCubic, config: &LabelConfig) -> (f32, f32) {
        let curve_t = path.parameter_at_length(self.t * path.total_length());
        let angle = path.curve().tangent_angle(curve_t);
        label_offset(angle, self.side, self.width, config)
    }

    /// Re-place the label on a freshly routed path, keeping `t` and `side`.
    pub fn attach(&mut self, path: &SampledCubic, config: &LabelConfig) {
        self.anchor = point_at_parameter(path, self.t);
        let (dx, dy) = self.offset(path, config);
        self.position = Point::new(self.anchor.x + dx, self.anchor.y + dy);
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Follow the pointer (already projected into diagram space).
    ///
    /// No-op unless a drag is in progress.
    pub fn drag_to(
        &mut self,
        path: &SampledCubic,
        pointer: Point,
        locator: &LocatorConfig,
        config: &LabelConfig,
    ) -> Result<(), GeometryError> {
        if !self.dragging {
            return Ok(());
        }
        let hit = closest_point_on_curve(path, pointer, locator)?;
        let start = path.point_at_length(0.0);
        let end = path.point_at_length(path.total_length());
        self.side = choose_label_side(start, end, hit.point, pointer, hit.distance, config);

        let (dx, dy) = self.offset(path, config);
        let (lo, hi) = if start.y <= end.y { (start.y, end.y) } else { (end.y, start.y) };
        let anchor = Point::new(hit.point.x, hit.point.y.clamp(lo, hi));

        self.anchor = anchor;
        self.position = Point::new(anchor.x + dx, anchor.y + dy);
        Ok(())
    }

    /// End the drag and commit `t` from the current anchor.
    pub fn release(&mut self, path: &SampledCubic, locator: &LocatorConfig) -> Result<f32, GeometryError> {
        self.dragging = false;
        self.t = closest_parameter(path, self.anchor, locator.tolerance)?;
        Ok(self.t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::cubic::CubicBezier;

    fn cfg() -> LabelConfig {
        LabelConfig::default()
    }

    #[test]
    fn octant_table() {
        let w = 50.0; // xv = 40, yv = 20
        let cases = [
            (0.0, (0.0, -20.0)),
            (9.5, (0.0, -20.0)),
            (10.0, (40.0, -20.0)),
            (45.0, (40.0, -20.0)),
            (80.0, (40.0, 0.0)),
            (99.0, (40.0, 0.0)),
            (100.0, (40.0, 20.0)),
            (169.0, (40.0, 20.0)),
            (170.0, (0.0, 20.0)),
            (180.0, (0.0, 20.0)),
            (-171.0, (0.0, 20.0)),
            (-170.0, (-40.0, 20.0)),
            (-100.0, (-40.0, 0.0)),
            (-90.0, (-40.0, 0.0)),
            (-80.0, (-40.0, -20.0)),
            (-45.0, (-40.0, -20.0)),
            (-10.0, (0.0, -20.0)),
        ];
        for (angle, expected) in cases {
            assert_eq!(label_offset(angle, LabelSide::Right, w, &cfg()), expected, "angle {}", angle);
        }
    }

    #[test]
    fn left_negates_and_center_is_zero() {
        let r = label_offset(45.0, LabelSide::Right, 30.0, &cfg());
        let l = label_offset(45.0, LabelSide::Left, 30.0, &cfg());
        assert_eq!(l, (-r.0, -r.1));
        assert_eq!(label_offset(45.0, LabelSide::Center, 30.0, &cfg()), (0.0, 0.0));
    }

    #[test]
    fn compass_bearings() {
        assert!((compass_bearing(Point::new(0.0, -1.0)) - 180.0).abs() < 1e-4);
        assert!((compass_bearing(Point::new(1.0, 0.0)) - 90.0).abs() < 1e-4);
        let down = compass_bearing(Point::new(0.0, 1.0));
        assert!(down < 1e-3 || down > 360.0 - 1e-3, "down = {}", down);
        assert!((compass_bearing(Point::new(-1.0, 0.0)) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn side_choice() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(0.0, 200.0);
        let on = Point::new(0.0, 100.0);
        let c = cfg();
        // Close to the curve
        assert_eq!(choose_label_side(start, end, on, Point::new(10.0, 100.0), 10.0, &c), LabelSide::Center);
        // Pointer to the right, source above target
        assert_eq!(choose_label_side(start, end, on, Point::new(50.0, 100.0), 50.0, &c), LabelSide::Right);
        assert_eq!(choose_label_side(start, end, on, Point::new(-50.0, 100.0), 50.0, &c), LabelSide::Left);
        // Reversed edge flips the answer
        assert_eq!(choose_label_side(end, start, on, Point::new(50.0, 100.0), 50.0, &c), LabelSide::Left);
    }

    fn vertical_path() -> SampledCubic {
        SampledCubic::new(CubicBezier::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 50.0),
            Point::new(0.0, 150.0),
            Point::new(0.0, 200.0),
        ))
    }

    #[test]
    fn attach_places_label_beside_midpoint() {
        let path = vertical_path();
        let mut label = EdgeLabel::new(40.0);
        label.attach(&path, &cfg());
        assert!((label.anchor.y - 100.0).abs() < 0.01);
        // Heading straight down (90°) pushes the label right by half width + margin
        assert!((label.position.x - 35.0).abs() < 1e-3, "{:?}", label);
        assert!((label.position.y - label.anchor.y).abs() < 1e-3);
    }

    #[test]
    fn drag_and_release_commits_parameter() {
        let path = vertical_path();
        let locator = LocatorConfig::default();
        let mut label = EdgeLabel::new(40.0);
        label.attach(&path, &cfg());

        // Ignored before begin_drag
        label.drag_to(&path, Point::new(-60.0, 50.0), &locator, &cfg()).unwrap();
        assert!((label.anchor.y - 100.0).abs() < 0.01);

        label.begin_drag();
        label.drag_to(&path, Point::new(-60.0, 50.0), &locator, &cfg()).unwrap();
        assert_eq!(label.side, LabelSide::Left);
        assert!((label.anchor.y - 50.0).abs() < 0.5, "{:?}", label);

        let t = label.release(&path, &locator).unwrap();
        assert!((t - 0.25).abs() < 0.01, "t = {}", t);
        assert!(!label.dragging);
    }

    #[test]
    fn release_rejects_non_finite_anchor() {
        let path = vertical_path();
        let mut label = EdgeLabel::new(40.0);
        label.begin_drag();
        label.anchor = Point::new(0.0, f32::NAN);
        assert_eq!(
            label.release(&path, &LocatorConfig::default()),
            Err(GeometryError::NonFinite { param: "query" })
        );
        assert!(!label.dragging);
    }
}
