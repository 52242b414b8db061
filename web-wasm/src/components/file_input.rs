//! ファイル入力の読み込み

use std::cell::Cell;

use js_sys::Uint8Array;
use photo_predict_common::ImageFile;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

/// 入力欄で現在選ばれているファイル（未選択なら `None`）
pub fn selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files().and_then(|files| files.get(0))
}

/// Fileの中身を読み込む
pub async fn read_file(file: &File) -> Result<ImageFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(ImageFile::new(file.name(), file.type_(), bytes))
}

/// 入力欄ごとの読み込み世代
///
/// `change` のたびに進める。読み込み完了時に世代が変わっていれば、その結果は捨てる。
#[derive(Debug, Default)]
pub struct ReadGeneration(Cell<u64>);

impl ReadGeneration {
    pub fn begin(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.get() == generation
    }
}
