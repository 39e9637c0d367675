use edgecurve::Point;
use js_sys::{Float32Array, Object, Reflect};
use wasm_bindgen::prelude::*;

pub fn new_obj() -> Object { Object::new() }

pub fn set_kv(obj: &Object, key: &str, val: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), val);
}

pub fn arr_f32(data: &[f32]) -> Float32Array { Float32Array::from(data) }

/// Flattened `[x0, y0, x1, y1, ...]`.
pub fn arr_points(points: &[Point]) -> Float32Array {
    let flat: Vec<f32> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    arr_f32(&flat)
}

pub fn xy(p: Point) -> Vec<f32> { vec![p.x, p.y] }
