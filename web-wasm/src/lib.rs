//! Photo Predict Web App (WASM)
//!
//! 既存のHTMLに画像入力・プレビュー・結果欄があり、それをidで束ねる。

mod api;
mod app;
mod components;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = app::mount() {
        web_sys::console::error_2(&JsValue::from_str("photo-predict: mount failed"), &err);
    }
}
