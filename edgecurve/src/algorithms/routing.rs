//! Bezier routing between two node handles.
//!
//! Each ordered `(source side, target side)` pair has one [`CurveRule`] in
//! [`CURVE_RULES`]. A rule decides how far the control points are pushed out
//! (the *factor* applied to the endpoint distance) and where each control point
//! is anchored before the push.

use crate::config::CurveConfig;
use crate::error::{ensure_finite_point, GeometryError};
use crate::geometry::cubic::CubicBezier;
use crate::geometry::limits;
use crate::model::{Point, Side};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, p: Point) -> f32 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

/// How the offset factor is chosen for a side pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FactorRule {
    /// Both handles on the same face: 0.4, widened to 0.6 when the vertical
    /// separation exceeds 50.
    SameSide,
    /// Handles facing each other along `axis`. `sign` turns the raw
    /// `target - source` displacement into "toward" displacement.
    Facing { axis: Axis, sign: f32 },
    /// One vertical and one horizontal handle; `sign` as for `Facing`, always on y.
    Cornering { sign: f32 },
}

impl FactorRule {
    pub fn factor(self, source: Point, target: Point) -> f32 {
        match self {
            FactorRule::SameSide => {
                if (target.y - source.y).abs() > 50.0 {
                    0.6
                } else {
                    0.4
                }
            }
            FactorRule::Facing { axis, sign } => {
                let toward = sign * (axis.of(target) - axis.of(source));
                if toward < -100.0 {
                    0.1
                } else if toward > 120.0 {
                    0.8
                } else if toward > 60.0 {
                    0.6
                } else if toward > 0.0 {
                    0.4
                } else {
                    0.2
                }
            }
            FactorRule::Cornering { sign } => {
                if sign * (target.y - source.y) > 60.0 {
                    0.6
                } else {
                    0.4
                }
            }
        }
    }
}

/// Which coordinate a control point is pushed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// The endpoint's own coordinate on the pushed axis.
    Endpoint,
    /// The edge center's coordinate on the pushed axis.
    Center,
}

/// Placement of one control point: anchored coordinate, pushed toward `toward`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub anchor: Anchor,
    pub toward: Side,
}

impl Placement {
    const fn new(anchor: Anchor, toward: Side) -> Self {
        Self { anchor, toward }
    }

    fn place(self, endpoint: Point, center: Point, offset: f32) -> Point {
        let base = match self.anchor {
            Anchor::Endpoint => endpoint,
            Anchor::Center => center,
        };
        match self.toward {
            Side::Top => Point::new(endpoint.x, base.y - offset),
            Side::Bottom => Point::new(endpoint.x, base.y + offset),
            Side::Left => Point::new(base.x - offset, endpoint.y),
            Side::Right => Point::new(base.x + offset, endpoint.y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveRule {
    pub source: Side,
    pub target: Side,
    pub factor: FactorRule,
    pub first: Placement,
    pub second: Placement,
}

const fn rule(source: Side, target: Side, factor: FactorRule, first: Placement, second: Placement) -> CurveRule {
    CurveRule { source, target, factor, first, second }
}

use Anchor::{Center as C, Endpoint as E};
use Side::{Bottom, Left, Right, Top};

const fn at(anchor: Anchor, toward: Side) -> Placement {
    Placement::new(anchor, toward)
}

const SAME: FactorRule = FactorRule::SameSide;
const DOWN: FactorRule = FactorRule::Cornering { sign: 1.0 };
const UP: FactorRule = FactorRule::Cornering { sign: -1.0 };

pub const CURVE_RULES: [CurveRule; 16] = [
    rule(Top, Top, SAME, at(C, Top), at(C, Top)),
    rule(Top, Right, DOWN, at(E, Top), at(E, Right)),
    rule(Top, Bottom, FactorRule::Facing { axis: Axis::Y, sign: 1.0 }, at(C, Top), at(C, Bottom)),
    rule(Top, Left, DOWN, at(E, Top), at(E, Left)),
    rule(Right, Top, DOWN, at(E, Right), at(E, Top)),
    rule(Right, Right, SAME, at(C, Right), at(C, Right)),
    rule(Right, Bottom, UP, at(E, Right), at(E, Bottom)),
    rule(Right, Left, FactorRule::Facing { axis: Axis::X, sign: -1.0 }, at(C, Right), at(C, Left)),
    rule(Bottom, Top, FactorRule::Facing { axis: Axis::Y, sign: -1.0 }, at(C, Bottom), at(C, Top)),
    rule(Bottom, Right, UP, at(C, Bottom), at(E, Right)),
    rule(Bottom, Bottom, SAME, at(C, Bottom), at(C, Bottom)),
    rule(Bottom, Left, UP, at(C, Bottom), at(E, Left)),
    rule(Left, Top, DOWN, at(E, Left), at(E, Top)),
    rule(Left, Right, FactorRule::Facing { axis: Axis::X, sign: 1.0 }, at(C, Left), at(C, Right)),
    rule(Left, Bottom, UP, at(E, Left), at(E, Bottom)),
    rule(Left, Left, SAME, at(C, Left), at(C, Left)),
];

pub fn rule_for(source: Side, target: Side) -> Option<&'static CurveRule> {
    CURVE_RULES.iter().find(|r| r.source == source && r.target == target)
}

/// A routed edge: the cubic plus the numbers that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeCurve {
    pub bezier: CubicBezier,
    pub center: Point,
    pub factor: f32,
    pub offset: f32,
}

impl EdgeCurve {
    /// Straight control polygon `P1 = source, P2 = target` with factor 0.
    pub fn straight(source: Point, target: Point, center: Point) -> Self {
        EdgeCurve { bezier: CubicBezier::new(source, source, target, target), center, factor: 0.0, offset: 0.0 }
    }

    /// `[P0, P1, P2, P3]` as handed to label placement.
    pub fn control_polygon(&self) -> [Point; 4] {
        self.bezier.points()
    }

    /// Point at curve parameter t via de Casteljau subdivision.
    pub fn label_anchor(&self, t: f32) -> Point {
        let (first, _) = self.bezier.split_at(t.clamp(0.0, 1.0));
        first.p3
    }
}

fn ensure_in_bounds(param: &'static str, p: Point) -> Result<Point, GeometryError> {
    ensure_finite_point(param, p)?;
    for v in [p.x, p.y] {
        if !limits::in_coord_bounds(v) {
            return Err(GeometryError::OutOfRange { param, min: limits::COORD_MIN, max: limits::COORD_MAX, got: v });
        }
    }
    Ok(p)
}

/// Route a cubic from `source` to `target`.
///
/// `center` overrides the midpoint used by center-anchored rules. A side pair
/// missing from [`CURVE_RULES`] is reported as `UnmatchedSides`; callers draw
/// [`EdgeCurve::straight`] in its place.
pub fn compute_path(
    source: Point,
    source_side: Side,
    target: Point,
    target_side: Side,
    center: Option<Point>,
    config: &CurveConfig,
) -> Result<EdgeCurve, GeometryError> {
    ensure_in_bounds("source", source)?;
    ensure_in_bounds("target", target)?;
    let center = match center {
        Some(c) => ensure_in_bounds("center", c)?,
        None => source.midpoint(target),
    };

    let distance = source.distance(target);

    let Some(rule) = rule_for(source_side, target_side) else {
        log::warn!("no curve rule for {} -> {}", source_side, target_side);
        return Err(GeometryError::UnmatchedSides { from: source_side, to: target_side });
    };

    let factor = rule.factor.factor(source, target);
    let offset = distance * factor;
    log::debug!(
        "route {} -> {}: distance={:.2} factor={} offset={:.2}",
        source_side,
        target_side,
        distance,
        factor,
        offset
    );

    let c1 = rule.first.place(source, center, offset);
    let c2 = rule.second.place(target, center, offset);
    let skew = config.skew;
    let bezier = CubicBezier::new(
        source,
        Point::new(c1.x + skew.dx, c1.y - skew.dy),
        Point::new(c2.x + skew.dx, c2.y + skew.dy),
        target,
    );
    if !bezier.is_finite() {
        return Err(GeometryError::NonFinite { param: "control points" });
    }

    Ok(EdgeCurve { bezier, center, factor, offset })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(s: Point, ss: Side, t: Point, ts: Side) -> EdgeCurve {
        compute_path(s, ss, t, ts, None, &CurveConfig::unskewed()).unwrap()
    }

    #[test]
    fn every_side_pair_has_exactly_one_rule() {
        for s in Side::ALL {
            for t in Side::ALL {
                let n = CURVE_RULES.iter().filter(|r| r.source == s && r.target == t).count();
                assert_eq!(n, 1, "{} -> {}", s, t);
            }
        }
    }

    #[test]
    fn top_to_bottom_far_below_uses_widest_factor() {
        let s = Point::new(150.0, 100.0);
        let t = Point::new(250.0, 400.0);
        let e = route(s, Side::Top, t, Side::Bottom);
        assert_eq!(e.factor, 0.8);
        assert_eq!(e.offset, s.distance(t) * 0.8);
        // Center anchored on y, endpoint x kept
        assert_eq!(e.bezier.p1, Point::new(150.0, 250.0 - e.offset));
        assert_eq!(e.bezier.p2, Point::new(250.0, 250.0 + e.offset));
    }

    #[test]
    fn facing_bands() {
        let s = Point::new(0.0, 0.0);
        let cases = [
            (Point::new(0.0, -101.0), 0.1),
            (Point::new(0.0, -100.0), 0.2),
            (Point::new(0.0, 0.0), 0.2),
            (Point::new(0.0, 1.0), 0.4),
            (Point::new(0.0, 60.0), 0.4),
            (Point::new(0.0, 61.0), 0.6),
            (Point::new(0.0, 120.0), 0.6),
            (Point::new(0.0, 121.0), 0.8),
        ];
        for (t, f) in cases {
            assert_eq!(route(s, Side::Top, t, Side::Bottom).factor, f, "target {:?}", t);
            // Mirrored pair reads the displacement the other way round
            assert_eq!(route(t, Side::Bottom, s, Side::Top).factor, f, "mirrored {:?}", t);
        }
        assert_eq!(route(s, Side::Left, Point::new(130.0, 0.0), Side::Right).factor, 0.8);
        assert_eq!(route(Point::new(130.0, 0.0), Side::Right, s, Side::Left).factor, 0.8);
        assert_eq!(route(s, Side::Right, Point::new(130.0, 0.0), Side::Left).factor, 0.1);
    }

    #[test]
    fn same_side_widens_on_vertical_separation() {
        let s = Point::new(0.0, 0.0);
        assert_eq!(route(s, Side::Top, Point::new(300.0, 50.0), Side::Top).factor, 0.4);
        assert_eq!(route(s, Side::Top, Point::new(0.0, 51.0), Side::Top).factor, 0.6);
        assert_eq!(route(s, Side::Left, Point::new(0.0, -51.0), Side::Left).factor, 0.6);
    }

    #[test]
    fn cornering_factor() {
        let s = Point::new(0.0, 0.0);
        assert_eq!(route(s, Side::Top, Point::new(10.0, 61.0), Side::Left).factor, 0.6);
        assert_eq!(route(s, Side::Top, Point::new(10.0, 60.0), Side::Left).factor, 0.4);
        assert_eq!(route(s, Side::Bottom, Point::new(10.0, -61.0), Side::Right).factor, 0.6);
        assert_eq!(route(s, Side::Right, Point::new(10.0, -61.0), Side::Bottom).factor, 0.6);
        assert_eq!(route(s, Side::Left, Point::new(10.0, 61.0), Side::Top).factor, 0.6);
        assert_eq!(route(s, Side::Left, Point::new(10.0, 61.0), Side::Bottom).factor, 0.4);
    }

    #[test]
    fn control_points_bow_out_of_each_face() {
        let s = Point::new(0.0, 0.0);
        let t = Point::new(200.0, 100.0);
        let e = route(s, Side::Right, t, Side::Top);
        assert!(e.bezier.p1.x > s.x && e.bezier.p1.y == s.y);
        assert!(e.bezier.p2.y < t.y && e.bezier.p2.x == t.x);

        let e = route(s, Side::Left, t, Side::Left);
        assert_eq!(e.bezier.p1, Point::new(e.center.x - e.offset, s.y));
        assert_eq!(e.bezier.p2, Point::new(e.center.x - e.offset, t.y));
    }

    #[test]
    fn skew_shifts_both_control_points() {
        let s = Point::new(0.0, 0.0);
        let t = Point::new(200.0, 100.0);
        let plain = route(s, Side::Bottom, t, Side::Top);
        let skewed = compute_path(s, Side::Bottom, t, Side::Top, None, &CurveConfig::default()).unwrap();
        assert_eq!(skewed.bezier.p0, plain.bezier.p0);
        assert_eq!(skewed.bezier.p3, plain.bezier.p3);
        assert_eq!(skewed.bezier.p1, Point::new(plain.bezier.p1.x + 100.0, plain.bezier.p1.y - 50.0));
        assert_eq!(skewed.bezier.p2, Point::new(plain.bezier.p2.x + 100.0, plain.bezier.p2.y + 50.0));
    }

    #[test]
    fn explicit_center_overrides_midpoint() {
        let s = Point::new(0.0, 0.0);
        let t = Point::new(0.0, 200.0);
        let c = Point::new(0.0, 40.0);
        let e = compute_path(s, Side::Bottom, t, Side::Top, Some(c), &CurveConfig::unskewed()).unwrap();
        assert_eq!(e.center, c);
        assert_eq!(e.bezier.p1.y, 40.0 + e.offset);
    }

    #[test]
    fn coincident_endpoints_give_zero_offset() {
        let p = Point::new(250.0, 0.0);
        let e = compute_path(p, Side::Bottom, p, Side::Top, None, &CurveConfig::default()).unwrap();
        assert_eq!(e.offset, 0.0);
        assert!(e.bezier.is_finite());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let r = compute_path(
            Point::new(f32::NAN, 0.0),
            Side::Top,
            Point::new(1.0, 1.0),
            Side::Top,
            None,
            &CurveConfig::default(),
        );
        assert_eq!(r, Err(GeometryError::NonFinite { param: "source" }));
    }

    #[test]
    fn huge_coordinates_are_out_of_range() {
        let r = compute_path(
            Point::new(-3e38, 0.0),
            Side::Right,
            Point::new(3e38, 0.0),
            Side::Left,
            None,
            &CurveConfig::default(),
        );
        assert!(matches!(r, Err(GeometryError::OutOfRange { param: "source", got, .. }) if got == -3e38));

        let r = compute_path(
            Point::new(0.0, 0.0),
            Side::Right,
            Point::new(10.0, 0.0),
            Side::Left,
            Some(Point::new(0.0, 2e7)),
            &CurveConfig::default(),
        );
        assert!(matches!(r, Err(GeometryError::OutOfRange { param: "center", .. })));
    }

    #[test]
    fn coordinate_bounds_route_finite_curves() {
        let e = compute_path(
            Point::new(limits::COORD_MIN, limits::COORD_MIN),
            Side::Top,
            Point::new(limits::COORD_MAX, limits::COORD_MAX),
            Side::Bottom,
            None,
            &CurveConfig::default(),
        )
        .unwrap();
        assert!(e.bezier.is_finite());
    }

    #[test]
    fn straight_fallback_keeps_endpoints() {
        let s = Point::new(0.0, 0.0);
        let t = Point::new(40.0, 30.0);
        let e = EdgeCurve::straight(s, t, s.midpoint(t));
        assert_eq!(e.control_polygon(), [s, s, t, t]);
        assert_eq!(e.factor, 0.0);
        assert_eq!(GeometryError::UnmatchedSides { from: Side::Top, to: Side::Left }.code(), "unmatched_sides");
    }

    #[test]
    fn label_anchor_is_curve_point() {
        let e = route(Point::new(0.0, 0.0), Side::Right, Point::new(300.0, 120.0), Side::Left);
        let a = e.label_anchor(0.5);
        let b = e.bezier.eval(0.5);
        assert!((a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3);
        assert_eq!(e.control_polygon()[0], Point::new(0.0, 0.0));
    }
}
