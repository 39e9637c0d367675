use edgecurve::{ConfigError, GeometryError};
use js_sys::Object;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::interop::{new_obj, set_kv};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

/// `ok(value)` for anything serde can hand to JS.
pub fn ok_serde<T: Serialize>(v: &T) -> JsValue {
    match serde_wasm_bindgen::to_value(v) {
        Ok(js) => ok(js),
        Err(e) => err("serialize", e.to_string(), None),
    }
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

fn param_obj(param: &str) -> Object {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    d
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    err("non_finite", format!("parameter '{}' must be finite", param), Some(param_obj(param).into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f32, max: f32, got: f32) -> JsValue {
    let d = param_obj(param);
    set_kv(&d, "min", &JsValue::from_f64(min as f64));
    set_kv(&d, "max", &JsValue::from_f64(max as f64));
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_side(param: &str, got: u8) -> JsValue {
    out_of_range(param, 0.0, 3.0, got as f32)
}

pub fn geometry(e: &GeometryError) -> JsValue {
    match e {
        GeometryError::NonFinite { param } => non_finite(param),
        GeometryError::OutOfRange { param, min, max, got } => out_of_range(param, *min, *max, *got),
        GeometryError::UnmatchedSides { from, to } => {
            let d = new_obj();
            set_kv(&d, "source", &JsValue::from_str(from.as_str()));
            set_kv(&d, "target", &JsValue::from_str(to.as_str()));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        GeometryError::ZeroLength | GeometryError::Parse(_) => err(e.code(), e.to_string(), None),
    }
}

pub fn config(e: &ConfigError) -> JsValue {
    match e {
        ConfigError::Invalid(g) => geometry(g),
        ConfigError::Json(_) => err("config", e.to_string(), None),
    }
}
