//! DOMビュー
//!
//! 表示切り替えはすべて `hidden` クラスで行う。

use photo_predict_common::{ClientVariant, PredictionView, ResultField, Slot};
use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlImageElement};

const HIDDEN: &str = "hidden";

/// スロットごとのプレビュー要素
struct Preview {
    image: HtmlImageElement,
    container: Element,
}

pub struct DomView {
    previews: BTreeMap<Slot, Preview>,
    result_container: Element,
    loading_indicator: Element,
    error_container: Element,
    error_message: Element,
    fields: BTreeMap<ResultField, Element>,
}

impl DomView {
    /// 必要な要素がひとつでも欠けていればエラー
    pub fn bind(document: &Document, variant: ClientVariant) -> Result<Self, JsValue> {
        let mut previews = BTreeMap::new();
        for slot in variant.slots() {
            let image = element(document, &format!("imagePreview{}", slot.index()))?
                .dyn_into::<HtmlImageElement>()
                .map_err(JsValue::from)?;
            let container = element(document, &format!("imagePreviewContainer{}", slot.index()))?;
            previews.insert(*slot, Preview { image, container });
        }

        let mut fields = BTreeMap::new();
        for field in ResultField::for_variant(variant) {
            fields.insert(field, element(document, &field.element_id())?);
        }

        Ok(Self {
            previews,
            result_container: element(document, "resultContainer")?,
            loading_indicator: element(document, "loadingIndicator")?,
            error_container: element(document, "errorContainer")?,
            error_message: element(document, "errorMessage")?,
            fields,
        })
    }
}

pub fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))
}

fn set_visible(element: &Element, visible: bool) {
    let classes = element.class_list();
    let toggled = if visible {
        classes.remove_1(HIDDEN)
    } else {
        classes.add_1(HIDDEN)
    };
    if let Err(err) = toggled {
        web_sys::console::error_1(&err);
    }
}

impl PredictionView for DomView {
    fn show_preview(&self, slot: Slot, data_url: &str) {
        if let Some(preview) = self.previews.get(&slot) {
            preview.image.set_src(data_url);
            set_visible(&preview.container, true);
        }
    }

    fn hide_preview(&self, slot: Slot) {
        if let Some(preview) = self.previews.get(&slot) {
            set_visible(&preview.container, false);
            preview.image.set_src("");
        }
    }

    fn set_loading(&self, visible: bool) {
        set_visible(&self.loading_indicator, visible);
    }

    fn set_results_visible(&self, visible: bool) {
        set_visible(&self.result_container, visible);
    }

    fn set_field(&self, field: ResultField, text: &str) {
        if let Some(element) = self.fields.get(&field) {
            element.set_text_content(Some(text));
        }
    }

    fn show_error(&self, message: &str) {
        self.error_message.set_text_content(Some(message));
        set_visible(&self.error_container, true);
    }

    fn hide_error(&self) {
        set_visible(&self.error_container, false);
        self.error_message.set_text_content(Some(""));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const COMPARE_PAGE: &str = r#"
        <div id="imagePreviewContainer1" class="hidden"><img id="imagePreview1"></div>
        <div id="imagePreviewContainer2" class="hidden"><img id="imagePreview2"></div>
        <div id="loadingIndicator" class="hidden"></div>
        <div id="errorContainer" class="hidden"><p id="errorMessage"></p></div>
        <div id="resultContainer" class="hidden">
            <p id="result1Text"></p><p id="confidence1Text"></p>
            <p id="result2Text"></p><p id="confidence2Text"></p>
            <p id="similarityScoreText"></p><p id="analysisText"></p>
        </div>
    "#;

    fn page(html: &str) -> Document {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().set_inner_html(html);
        document
    }

    fn is_hidden(document: &Document, id: &str) -> bool {
        element(document, id).unwrap().class_list().contains(HIDDEN)
    }

    fn text(document: &Document, id: &str) -> String {
        element(document, id).unwrap().text_content().unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn test_loading_and_results_toggle_hidden_class() {
        let document = page(COMPARE_PAGE);
        let view = DomView::bind(&document, ClientVariant::Compare).unwrap();

        view.set_loading(true);
        assert!(!is_hidden(&document, "loadingIndicator"));
        view.set_loading(false);
        assert!(is_hidden(&document, "loadingIndicator"));

        view.set_results_visible(true);
        assert!(!is_hidden(&document, "resultContainer"));
        view.set_results_visible(false);
        assert!(is_hidden(&document, "resultContainer"));
    }

    #[wasm_bindgen_test]
    fn test_fields_write_text_content() {
        let document = page(COMPARE_PAGE);
        let view = DomView::bind(&document, ClientVariant::Compare).unwrap();

        view.set_field(ResultField::Label(Slot::Second), "Image 2 Label: dog");
        view.set_field(ResultField::Analysis, "Analysis: different");

        assert_eq!(text(&document, "result2Text"), "Image 2 Label: dog");
        assert_eq!(text(&document, "analysisText"), "Analysis: different");
        assert_eq!(text(&document, "result1Text"), "");
    }

    #[wasm_bindgen_test]
    fn test_error_shown_then_cleared() {
        let document = page(COMPARE_PAGE);
        let view = DomView::bind(&document, ClientVariant::Compare).unwrap();

        view.show_error("Backend Error: model not loaded");
        assert!(!is_hidden(&document, "errorContainer"));
        assert_eq!(text(&document, "errorMessage"), "Backend Error: model not loaded");

        view.hide_error();
        assert!(is_hidden(&document, "errorContainer"));
        assert_eq!(text(&document, "errorMessage"), "");
    }

    #[wasm_bindgen_test]
    fn test_preview_source_set_and_cleared() {
        let document = page(COMPARE_PAGE);
        let view = DomView::bind(&document, ClientVariant::Compare).unwrap();
        let image = element(&document, "imagePreview1").unwrap();

        view.show_preview(Slot::First, "data:image/gif;base64,R0lGODlh");
        assert!(!is_hidden(&document, "imagePreviewContainer1"));
        assert_eq!(
            image.get_attribute("src").as_deref(),
            Some("data:image/gif;base64,R0lGODlh")
        );
        assert!(is_hidden(&document, "imagePreviewContainer2"));

        view.hide_preview(Slot::First);
        assert!(is_hidden(&document, "imagePreviewContainer1"));
        assert_eq!(image.get_attribute("src").as_deref(), Some(""));
    }

    #[wasm_bindgen_test]
    fn test_bind_fails_without_loading_indicator() {
        let document = page(&COMPARE_PAGE.replace(r#"<div id="loadingIndicator" class="hidden"></div>"#, ""));
        assert!(DomView::bind(&document, ClientVariant::Compare).is_err());
    }

    #[wasm_bindgen_test]
    fn test_single_page_binds_without_second_slot() {
        let document = page(
            r#"
            <div id="imagePreviewContainer1" class="hidden"><img id="imagePreview1"></div>
            <div id="loadingIndicator" class="hidden"></div>
            <div id="errorContainer" class="hidden"><p id="errorMessage"></p></div>
            <div id="resultContainer" class="hidden">
                <p id="result1Text"></p><p id="confidence1Text"></p>
            </div>
        "#,
        );
        let view = DomView::bind(&document, ClientVariant::Single).unwrap();
        view.show_preview(Slot::Second, "data:image/png;base64,");
        assert!(DomView::bind(&document, ClientVariant::Compare).is_err());
    }
}
