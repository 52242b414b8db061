//! 予測サービス呼び出し（fetch + FormData）

use async_trait::async_trait;
use js_sys::{Array, Uint8Array};
use photo_predict_common::{FormPart, HttpReply, PredictionRequest, PredictionTransport, TransportError};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, Response};

pub struct FetchTransport;

#[async_trait(?Send)]
impl PredictionTransport for FetchTransport {
    async fn send(&self, request: &PredictionRequest) -> Result<HttpReply, TransportError> {
        post_form(request).await.map_err(js_error)
    }
}

async fn post_form(request: &PredictionRequest) -> Result<HttpReply, JsValue> {
    let form = FormData::new()?;
    for part in &request.parts {
        append_part(&form, part)?;
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&form);

    let req = Request::new_with_str_and_init(&request.endpoint, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&req)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let status = resp.status();
    let body = JsFuture::from(resp.text()?).await?.as_string().unwrap_or_default();

    Ok(HttpReply { status, body })
}

/// ファイル名とMIMEタイプ付きのBlobとして追加
fn append_part(form: &FormData, part: &FormPart) -> Result<(), JsValue> {
    let bytes = Uint8Array::from(part.file.bytes.as_slice());
    let chunks = Array::of1(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(&part.file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)?;

    form.append_with_blob_and_filename(part.name, &blob, &part.file.file_name)
}

/// fetchのTypeErrorなどをメッセージに変換
pub fn js_error(value: JsValue) -> TransportError {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return TransportError(String::from(error.message()));
    }
    TransportError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
