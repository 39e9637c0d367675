use edgecurve::algorithms::quadratic::{QuadraticDrag, ViewBoxProjection};
use edgecurve::keys::{KeyCombos, KeyPressTracker};
use edgecurve::{Config, EdgeCurve, SampledCubic};
use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logging;

/// A rendered edge path plus the tunables used to search it.
#[wasm_bindgen]
pub struct Curve {
    pub(crate) path: SampledCubic,
    pub(crate) routed: Option<EdgeCurve>,
    pub(crate) config: Config,
}

impl Curve {
    pub(crate) fn rs_new(path: SampledCubic, routed: Option<EdgeCurve>, config: Config) -> Curve {
        Curve { path, routed, config }
    }
}

#[wasm_bindgen]
pub struct Label {
    pub(crate) inner: edgecurve::EdgeLabel,
}

#[wasm_bindgen]
pub struct KeyPress {
    pub(crate) inner: KeyPressTracker,
}

impl KeyPress {
    pub fn rs_new(bindings: &[String]) -> KeyPress {
        KeyPress { inner: KeyPressTracker::new(KeyCombos::parse(bindings)) }
    }
}

#[wasm_bindgen]
pub struct QuadraticDemo {
    pub(crate) inner: QuadraticDrag,
    pub(crate) projection: Option<ViewBoxProjection>,
}
