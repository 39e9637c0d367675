use crate::error;
use crate::interop::{arr_points, new_obj, set_kv, xy};
use crate::{Curve, KeyPress, Label, QuadraticDemo};
use edgecurve::algorithms::label::EdgeLabel;
use edgecurve::algorithms::quadratic::{QuadHandle, QuadraticDrag, QuadraticHandle, ViewBoxProjection};
use edgecurve::geometry::limits;
use edgecurve::keys::KeyEvent;
use edgecurve::{
    closest_parameter, closest_point_on_curve, compute_path, parse_cubic_path, point_at_parameter,
    tangent_angle_at, Config, CubicBezier, EdgeCurve, LabelSide, PathSampler, Point, SampledCubic,
    Side,
};
use log::LevelFilter;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// `level` is one of `off`, `error`, `warn`, `info`, `debug`, `trace`.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> JsValue {
    match level.parse::<LevelFilter>() {
        Ok(filter) => {
            crate::logging::init(filter);
            error::ok(JsValue::UNDEFINED)
        }
        Err(_) => error::err("config", format!("unknown log level '{}'", level), None),
    }
}

#[wasm_bindgen]
pub fn default_config() -> JsValue {
    error::ok_serde(&Config::default())
}

/// Defaults as a JSON string, the form every `config_json` argument takes.
#[wasm_bindgen]
pub fn default_config_json() -> Result<String, JsValue> {
    serde_json::to_string(&Config::default()).map_err(|e| error::err("serialize", e.to_string(), None))
}

fn parse_config(config_json: Option<String>) -> Result<Config, JsValue> {
    match config_json {
        None => Ok(Config::default()),
        Some(s) => Config::from_json(&s).map_err(|e| error::config(&e)),
    }
}

fn side(param: &str, code: u8) -> Result<Side, JsValue> {
    Side::from_code(code).ok_or_else(|| error::invalid_side(param, code))
}

#[allow(clippy::too_many_arguments)]
fn route(
    sx: f32,
    sy: f32,
    source_side: u8,
    tx: f32,
    ty: f32,
    target_side: u8,
    center: Option<Point>,
    config: &Config,
) -> Result<EdgeCurve, JsValue> {
    let ss = side("source_side", source_side)?;
    let ts = side("target_side", target_side)?;
    compute_path(Point::new(sx, sy), ss, Point::new(tx, ty), ts, center, &config.curve)
        .map_err(|e| error::geometry(&e))
}

fn edge_obj(edge: &EdgeCurve) -> JsValue {
    let o = new_obj();
    set_kv(&o, "d", &JsValue::from_str(&edge.to_svg_path()));
    set_kv(&o, "points", &arr_points(&edge.control_polygon()).into());
    set_kv(&o, "center", &arr_points(&[edge.center]).into());
    set_kv(&o, "factor", &JsValue::from_f64(edge.factor as f64));
    set_kv(&o, "offset", &JsValue::from_f64(edge.offset as f64));
    o.into()
}

/// Route an edge between two handles. Sides: 0 top, 1 right, 2 bottom, 3 left.
#[wasm_bindgen]
pub fn compute_edge_path(
    sx: f32,
    sy: f32,
    source_side: u8,
    tx: f32,
    ty: f32,
    target_side: u8,
    config_json: Option<String>,
) -> JsValue {
    let config = match parse_config(config_json) {
        Ok(c) => c,
        Err(e) => return e,
    };
    match route(sx, sy, source_side, tx, ty, target_side, None, &config) {
        Ok(edge) => error::ok(edge_obj(&edge)),
        Err(e) => e,
    }
}

#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn compute_edge_path_centered(
    sx: f32,
    sy: f32,
    source_side: u8,
    tx: f32,
    ty: f32,
    target_side: u8,
    cx: f32,
    cy: f32,
    config_json: Option<String>,
) -> JsValue {
    let config = match parse_config(config_json) {
        Ok(c) => c,
        Err(e) => return e,
    };
    match route(sx, sy, source_side, tx, ty, target_side, Some(Point::new(cx, cy)), &config) {
        Ok(edge) => error::ok(edge_obj(&edge)),
        Err(e) => e,
    }
}

#[wasm_bindgen]
pub fn label_offset(angle: f32, label_side: u8, label_width: f32, config_json: Option<String>) -> JsValue {
    if !angle.is_finite() {
        return error::non_finite("angle");
    }
    if !label_width.is_finite() {
        return error::non_finite("label_width");
    }
    let Some(s) = LabelSide::from_code(label_side) else {
        return error::out_of_range("label_side", 0.0, 2.0, label_side as f32);
    };
    let config = match parse_config(config_json) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let (x, y) = edgecurve::label_offset(angle, s, label_width, &config.label);
    error::ok(crate::interop::arr_f32(&[x, y]).into())
}

fn sampled(bezier: CubicBezier, config: &Config) -> SampledCubic {
    SampledCubic::with_resolution(bezier, config.locator.arc_samples)
}

#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
impl Curve {
    /// Routed curve; see `compute_edge_path`. Throws the error object on failure.
    pub fn from_route(
        sx: f32,
        sy: f32,
        source_side: u8,
        tx: f32,
        ty: f32,
        target_side: u8,
        config_json: Option<String>,
    ) -> Result<Curve, JsValue> {
        let config = parse_config(config_json)?;
        let edge = route(sx, sy, source_side, tx, ty, target_side, None, &config)?;
        let path = sampled(edge.bezier, &config);
        Ok(Curve::rs_new(path, Some(edge), config))
    }
    pub fn from_route_res(
        sx: f32,
        sy: f32,
        source_side: u8,
        tx: f32,
        ty: f32,
        target_side: u8,
        config_json: Option<String>,
    ) -> JsValue {
        match Curve::from_route(sx, sy, source_side, tx, ty, target_side, config_json) {
            Ok(c) => error::ok(c.into()),
            Err(e) => e,
        }
    }

    /// Curve from a rendered `M x,y C x1,y1 x2,y2 x,y` string.
    pub fn from_svg_path(d: &str, config_json: Option<String>) -> Result<Curve, JsValue> {
        let config = parse_config(config_json)?;
        let bezier = parse_cubic_path(d).map_err(|e| error::geometry(&e))?;
        Ok(Curve::rs_new(sampled(bezier, &config), None, config))
    }
    pub fn from_svg_path_res(d: &str, config_json: Option<String>) -> JsValue {
        match Curve::from_svg_path(d, config_json) {
            Ok(c) => error::ok(c.into()),
            Err(e) => e,
        }
    }

    /// `points` is `[x0, y0, x1, y1, x2, y2, x3, y3]`.
    pub fn from_points(points: Vec<f32>, config_json: Option<String>) -> Result<Curve, JsValue> {
        if points.len() != 8 {
            return Err(error::out_of_range("points.length", 8.0, 8.0, points.len() as f32));
        }
        if points.iter().any(|v| !v.is_finite()) {
            return Err(error::non_finite("points"));
        }
        if let Some(&v) = points.iter().find(|&&v| !limits::in_coord_bounds(v)) {
            return Err(error::out_of_range("points", limits::COORD_MIN, limits::COORD_MAX, v));
        }
        let config = parse_config(config_json)?;
        let p = |i: usize| Point::new(points[2 * i], points[2 * i + 1]);
        let bezier = CubicBezier::new(p(0), p(1), p(2), p(3));
        Ok(Curve::rs_new(sampled(bezier, &config), None, config))
    }
    pub fn from_points_res(points: Vec<f32>, config_json: Option<String>) -> JsValue {
        match Curve::from_points(points, config_json) {
            Ok(c) => error::ok(c.into()),
            Err(e) => e,
        }
    }

    pub fn total_length(&self) -> f32 {
        self.path.total_length()
    }

    pub fn to_svg_path(&self) -> String {
        edgecurve::svg::cubic_to_svg_path(self.path.curve())
    }

    pub fn control_points(&self) -> js_sys::Float32Array {
        arr_points(&self.path.curve().points())
    }

    /// Factor chosen by the router, if this curve was routed.
    pub fn factor(&self) -> Option<f32> {
        self.routed.map(|e| e.factor)
    }

    /// `[x, y]` at arc-length fraction `t` (clamped).
    pub fn point_at_parameter(&self, t: f32) -> Vec<f32> {
        xy(point_at_parameter(&self.path, t))
    }
    pub fn point_at_parameter_res(&self, t: f32) -> JsValue {
        if !t.is_finite() {
            return error::non_finite("t");
        }
        error::ok(arr_points(&[point_at_parameter(&self.path, t)]).into())
    }

    pub fn closest_parameter(&self, x: f32, y: f32) -> Option<f32> {
        closest_parameter(&self.path, Point::new(x, y), self.config.locator.tolerance).ok()
    }
    pub fn closest_parameter_res(&self, x: f32, y: f32) -> JsValue {
        match closest_parameter(&self.path, Point::new(x, y), self.config.locator.tolerance) {
            Ok(t) => error::ok(JsValue::from_f64(t as f64)),
            Err(e) => error::geometry(&e),
        }
    }

    /// `{ point: {x, y}, length, t, tangent_angle, distance }`.
    pub fn closest_point_res(&self, x: f32, y: f32) -> JsValue {
        match closest_point_on_curve(&self.path, Point::new(x, y), &self.config.locator) {
            Ok(hit) => error::ok_serde(&hit),
            Err(e) => error::geometry(&e),
        }
    }

    /// Tangent direction in degrees at curve parameter `t`.
    pub fn tangent_angle(&self, t: f32) -> f32 {
        tangent_angle_at(self.path.curve(), t)
    }

    pub fn label_anchor(&self, t: f32) -> Vec<f32> {
        let (first, _) = self.path.curve().split_at(t.clamp(0.0, 1.0));
        xy(first.p3)
    }
}

#[wasm_bindgen]
impl Label {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32) -> Label {
        Label { inner: EdgeLabel::new(width) }
    }

    pub fn attach(&mut self, curve: &Curve) {
        self.inner.attach(&curve.path, &curve.config.label);
    }

    pub fn begin_drag(&mut self) {
        self.inner.begin_drag();
    }

    pub fn drag_to_res(&mut self, curve: &Curve, x: f32, y: f32) -> JsValue {
        match self.inner.drag_to(&curve.path, Point::new(x, y), &curve.config.locator, &curve.config.label) {
            Ok(()) => error::ok(arr_points(&[self.inner.position]).into()),
            Err(e) => error::geometry(&e),
        }
    }

    pub fn release_res(&mut self, curve: &Curve) -> JsValue {
        match self.inner.release(&curve.path, &curve.config.locator) {
            Ok(t) => error::ok(JsValue::from_f64(t as f64)),
            Err(e) => error::geometry(&e),
        }
    }

    pub fn t(&self) -> f32 {
        self.inner.t
    }

    /// 0 right, 1 center, 2 left.
    pub fn side(&self) -> u8 {
        self.inner.side as u8
    }

    pub fn position(&self) -> Vec<f32> {
        xy(self.inner.position)
    }

    pub fn anchor(&self) -> Vec<f32> {
        xy(self.inner.anchor)
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.dragging
    }
}

#[wasm_bindgen]
impl KeyPress {
    /// `bindings` like `["Backspace", "Meta+d"]`.
    #[wasm_bindgen(constructor)]
    pub fn new(bindings: Vec<String>, act_inside_input_with_modifier: Option<bool>) -> KeyPress {
        let mut k = KeyPress::rs_new(&bindings);
        if let Some(yes) = act_inside_input_with_modifier {
            k.inner = k.inner.act_inside_input_with_modifier(yes);
        }
        k
    }

    /// `event` is `{ key, code, ctrl, meta, shift, in_input }`; returns the outcome name.
    pub fn key_down(&mut self, event: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<KeyEvent>(event) {
            Ok(ev) => error::ok_serde(&self.inner.key_down(&ev)),
            Err(e) => error::err("parse", e.to_string(), None),
        }
    }

    pub fn key_up(&mut self, event: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<KeyEvent>(event) {
            Ok(ev) => error::ok_serde(&self.inner.key_up(&ev)),
            Err(e) => error::err("parse", e.to_string(), None),
        }
    }

    pub fn blur(&mut self) {
        self.inner.blur();
    }

    pub fn is_pressed(&self) -> bool {
        self.inner.is_pressed()
    }
}

fn quad_handle(code: u8) -> Option<QuadHandle> {
    match code {
        0 => Some(QuadHandle::Start),
        1 => Some(QuadHandle::Mid),
        2 => Some(QuadHandle::End),
        _ => None,
    }
}

#[wasm_bindgen]
impl QuadraticDemo {
    #[wasm_bindgen(constructor)]
    pub fn new() -> QuadraticDemo {
        QuadraticDemo { inner: QuadraticDrag::new(QuadraticHandle::default()), projection: None }
    }

    /// `rect` from `getBoundingClientRect()`, `view_box` from the SVG `viewBox`; both `[x, y, w, h]`.
    pub fn set_view_res(&mut self, rect: Vec<f32>, view_box: Vec<f32>) -> JsValue {
        if rect.len() != 4 {
            return error::out_of_range("rect.length", 4.0, 4.0, rect.len() as f32);
        }
        if view_box.len() != 4 {
            return error::out_of_range("view_box.length", 4.0, 4.0, view_box.len() as f32);
        }
        let r = [rect[0], rect[1], rect[2], rect[3]];
        let v = [view_box[0], view_box[1], view_box[2], view_box[3]];
        match ViewBoxProjection::new(r, v) {
            Ok(p) => {
                self.projection = Some(p);
                error::ok(JsValue::UNDEFINED)
            }
            Err(e) => error::geometry(&e),
        }
    }

    /// 0 start, 1 mid, 2 end.
    pub fn press_res(&mut self, handle: u8) -> JsValue {
        match quad_handle(handle) {
            Some(h) => {
                self.inner.press(h);
                error::ok(JsValue::UNDEFINED)
            }
            None => error::out_of_range("handle", 0.0, 2.0, handle as f32),
        }
    }

    pub fn release(&mut self) {
        self.inner.release();
    }

    /// Pointer position in client pixels; `ok(true)` when the curve moved.
    pub fn pointer_move_res(&mut self, x: f32, y: f32) -> JsValue {
        let Some(projection) = self.projection else {
            return error::err("config", "set_view must be called before pointer_move", None);
        };
        match self.inner.pointer_move(&projection, Point::new(x, y)) {
            Ok(moved) => error::ok(JsValue::from_bool(moved)),
            Err(e) => error::geometry(&e),
        }
    }

    pub fn path(&self) -> String {
        self.inner.curve.to_svg_path()
    }

    /// `[sx, sy, mx, my, ex, ey]` of the three visible handles.
    pub fn handles(&self) -> js_sys::Float32Array {
        let c = &self.inner.curve;
        arr_points(&[c.start, c.mid_handle(), c.end])
    }
}

impl Default for QuadraticDemo {
    fn default() -> Self {
        Self::new()
    }
}
