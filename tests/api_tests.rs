#![cfg(target_arch = "wasm32")]

use edgecurve_wasm::{compute_edge_path, init_logging, label_offset, Curve, KeyPress, Label, QuadraticDemo};
use js_sys::{Float32Array, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(v: &JsValue, k: &str) -> JsValue {
    Reflect::get(v, &JsValue::from_str(k)).unwrap()
}

fn value(v: JsValue) -> JsValue {
    assert_eq!(get(&v, "ok").as_bool(), Some(true), "expected ok result");
    get(&v, "value")
}

fn is_err(v: &JsValue, code: &str) -> bool {
    if get(v, "ok").as_bool() != Some(false) {
        return false;
    }
    get(&get(v, "error"), "code").as_string().map_or(false, |s| s == code)
}

#[wasm_bindgen_test]
fn routes_top_to_bottom() {
    let r = value(compute_edge_path(150.0, 100.0, 0, 250.0, 400.0, 2, None));
    assert_eq!(get(&r, "factor").as_f64(), Some(0.8f32 as f64));
    let pts = Float32Array::new(&get(&r, "points"));
    assert_eq!(pts.length(), 8);
    assert_eq!(pts.get_index(0), 150.0);
    assert_eq!(pts.get_index(7), 400.0);
    assert!(get(&r, "d").as_string().unwrap().starts_with("M150,100 C"));
}

#[wasm_bindgen_test]
fn routing_errors_are_typed() {
    assert!(is_err(&compute_edge_path(0.0, 0.0, 9, 1.0, 1.0, 0, None), "out_of_range"));
    assert!(is_err(&compute_edge_path(f32::NAN, 0.0, 0, 1.0, 1.0, 0, None), "non_finite"));
    assert!(is_err(&compute_edge_path(0.0, 0.0, 0, 1.0, 1.0, 0, Some("{bad".into())), "config"));
    assert!(is_err(
        &compute_edge_path(0.0, 0.0, 0, 1.0, 1.0, 0, Some(r#"{"locator":{"tolerance":-1}}"#.into())),
        "out_of_range"
    ));
}

#[wasm_bindgen_test]
fn curve_queries() {
    init_logging("debug");
    let c = Curve::from_svg_path("M0,0 C100,0 200,0 300,0", None).unwrap();
    assert!((c.total_length() - 300.0).abs() < 1e-2);
    assert_eq!(c.point_at_parameter(0.0), vec![0.0, 0.0]);
    assert_eq!(c.point_at_parameter(1.0), vec![300.0, 0.0]);
    let t = c.closest_parameter(90.0, 10.0).unwrap();
    assert!((t - 0.3).abs() < 1e-3);
    let hit = value(c.closest_point_res(0.0, 0.0));
    assert!(get(&hit, "distance").as_f64().unwrap() < 1e-3);
    assert!(is_err(&c.point_at_parameter_res(f32::NAN), "non_finite"));

    let mut label = Label::new(40.0);
    label.attach(&c);
    assert!((label.anchor()[0] - 150.0).abs() < 0.1);
    label.begin_drag();
    value(label.drag_to_res(&c, 60.0, -40.0));
    let committed = value(label.release_res(&c)).as_f64().unwrap();
    assert!((committed - 0.2).abs() < 0.01);
}

#[wasm_bindgen_test]
fn zero_length_curve_is_rejected() {
    let c = Curve::from_points(vec![5.0; 8], None).unwrap();
    assert!(is_err(&c.closest_parameter_res(0.0, 0.0), "zero_length"));
    assert!(is_err(&Curve::from_svg_path_res("L0,0", None), "parse"));
    assert!(is_err(&Curve::from_points_res(vec![1.0; 6], None), "out_of_range"));
    assert!(is_err(&Curve::from_points_res(vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3e8, 0.0], None), "out_of_range"));
    assert!(is_err(&compute_edge_path(-3e38, 0.0, 1, 3e38, 0.0, 3, None), "out_of_range"));
}

#[wasm_bindgen_test]
fn label_offsets_and_keys() {
    let off = Float32Array::new(&value(label_offset(10.0, 0, 30.0, None)));
    assert_eq!(off.to_vec(), vec![30.0, -20.0]);
    assert!(is_err(&label_offset(10.0, 7, 30.0, None), "out_of_range"));

    let mut keys = KeyPress::new(vec!["d+s".to_string()], None);
    let ev = |k: &str, c: &str| {
        let o = js_sys::Object::new();
        Reflect::set(&o, &"key".into(), &k.into()).unwrap();
        Reflect::set(&o, &"code".into(), &c.into()).unwrap();
        JsValue::from(o)
    };
    assert_eq!(value(keys.key_down(ev("d", "KeyD"))).as_string().as_deref(), Some("tracked"));
    assert_eq!(value(keys.key_down(ev("s", "KeyS"))).as_string().as_deref(), Some("matched"));
    assert!(keys.is_pressed());
    keys.blur();
    assert!(!keys.is_pressed());
}

#[wasm_bindgen_test]
fn quadratic_demo_needs_view() {
    let mut q = QuadraticDemo::new();
    value(q.press_res(1));
    assert!(is_err(&q.pointer_move_res(0.0, 0.0), "config"));
    value(q.set_view_res(vec![0.0, 0.0, 800.0, 400.0], vec![-400.0, -200.0, 800.0, 400.0]));
    assert_eq!(value(q.pointer_move_res(400.0, 100.0)).as_bool(), Some(true));
    assert_eq!(q.path(), "M-400 0 Q0 -200, 400 0");
}
