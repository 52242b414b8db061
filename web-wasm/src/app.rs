//! ページへの組み込み
//!
//! `imageInput2` があれば2枚比較、なければ1枚分類。
//! エンドポイントは予測ボタンの `data-endpoint` 属性で上書きできる。

use std::rc::Rc;

use photo_predict_common::{
    ClientConfig, ClientVariant, PredictOutcome, PredictionClient, Slot, UiState, DEFAULT_ENDPOINT,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::api::fetch::{js_error, FetchTransport};
use crate::components::dom_view::{element, DomView};
use crate::components::file_input::{read_file, selected_file, ReadGeneration};

type Client = PredictionClient<DomView, FetchTransport>;

pub fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("document is not available"))?;

    let variant = detect_variant(&document);
    let button = element(&document, "predictButton")?;
    let config = ClientConfig::new(variant).with_endpoint(endpoint_or_default(button.get_attribute("data-endpoint")));
    config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let view = DomView::bind(&document, variant)?;
    let client = Rc::new(PredictionClient::new(config, view, FetchTransport));

    for slot in variant.slots() {
        bind_input(&document, &client, *slot)?;
    }
    bind_predict_button(&button, &client)?;

    Ok(())
}

fn detect_variant(document: &Document) -> ClientVariant {
    if document.get_element_by_id("imageInput2").is_some() {
        ClientVariant::Compare
    } else {
        ClientVariant::Single
    }
}

fn endpoint_or_default(attribute: Option<String>) -> String {
    attribute
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

fn bind_input(document: &Document, client: &Rc<Client>, slot: Slot) -> Result<(), JsValue> {
    let input = element(document, &format!("imageInput{}", slot.index()))?
        .dyn_into::<HtmlInputElement>()
        .map_err(JsValue::from)?;

    let client = Rc::clone(client);
    let reads = Rc::new(ReadGeneration::default());
    let target = input.clone();
    let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        let client = Rc::clone(&client);
        let reads = Rc::clone(&reads);
        let generation = reads.begin();
        let file = selected_file(&target);
        spawn_local(async move {
            let Some(file) = file else {
                client.on_file_selected(slot, None);
                return;
            };
            let read = read_file(&file).await;
            // 読み込み中に選び直された
            if !reads.is_current(generation) {
                return;
            }
            match read {
                Ok(image) => client.on_file_selected(slot, Some(image)),
                Err(err) => {
                    web_sys::console::error_1(&JsValue::from_str(&js_error(err).to_string()));
                    client.reject_file(slot, &file.name());
                }
            }
        });
    });

    input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn bind_predict_button(button: &Element, client: &Rc<Client>) -> Result<(), JsValue> {
    let client = Rc::clone(client);
    let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        let client = Rc::clone(&client);
        spawn_local(async move {
            if let PredictOutcome::Completed(UiState::Error(message)) = client.on_predict().await {
                web_sys::console::error_1(&JsValue::from_str(&format!("Prediction failed: {}", message)));
            }
        });
    });

    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
