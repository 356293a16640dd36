//! Bindings to the two JavaScript libraries the app leans on: pdf.js for
//! rasterizing pages and ZXing for decoding camera frames. The thin shims in
//! `js/` keep the raw library APIs out of Rust.

pub mod pdfjs;
pub mod zxing;

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text of a rejected promise or thrown value.
pub fn js_error_text(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `name` of a thrown JS error (`NotAllowedError`, `NotFoundException`, ...).
pub fn js_error_name(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.name()))
        .unwrap_or_default()
}
