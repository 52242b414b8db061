//! 画面バインディング
//!
//! コントローラは表示・非表示とテキストだけを書き込む。レイアウトは実装側の責務。

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::types::{ClientVariant, Slot};

/// 結果表示欄
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResultField {
    Label(Slot),
    Confidence(Slot),
    SimilarityScore,
    Analysis,
}

impl ResultField {
    /// 表示順に並べた欄
    pub fn for_variant(variant: ClientVariant) -> Vec<ResultField> {
        let mut fields = Vec::new();
        for slot in variant.slots() {
            fields.push(ResultField::Label(*slot));
            fields.push(ResultField::Confidence(*slot));
        }
        if variant == ClientVariant::Compare {
            fields.push(ResultField::SimilarityScore);
            fields.push(ResultField::Analysis);
        }
        fields
    }

    /// 対応するDOM要素のid
    pub fn element_id(&self) -> String {
        match self {
            ResultField::Label(slot) => format!("result{}Text", slot.index()),
            ResultField::Confidence(slot) => format!("confidence{}Text", slot.index()),
            ResultField::SimilarityScore => "similarityScoreText".to_string(),
            ResultField::Analysis => "analysisText".to_string(),
        }
    }
}

/// コントローラから見た画面
///
/// すべて `&self`。DOMもテスト用の実装も内部可変。
pub trait PredictionView {
    fn show_preview(&self, slot: Slot, data_url: &str);
    fn hide_preview(&self, slot: Slot);
    fn set_loading(&self, visible: bool);
    fn set_results_visible(&self, visible: bool);
    fn set_field(&self, field: ResultField, text: &str);
    fn show_error(&self, message: &str);
    fn hide_error(&self);
}

/// 表示状態のスナップショット
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub previews: BTreeMap<Slot, String>,
    pub loading: bool,
    pub results_visible: bool,
    pub fields: BTreeMap<ResultField, String>,
    pub error: Option<String>,
    /// `set_loading(true)` が呼ばれた回数
    pub loading_shown: usize,
}

impl ViewSnapshot {
    pub fn field(&self, field: ResultField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    /// 空でない結果テキスト（表示順）
    pub fn rendered_text(&self) -> Vec<&str> {
        ResultField::for_variant(ClientVariant::Compare)
            .into_iter()
            .map(|field| self.field(field))
            .filter(|text| !text.is_empty())
            .collect()
    }
}

/// 呼び出しを記録するだけのビュー（テスト・ヘッドレス用）
#[derive(Debug, Default)]
pub struct RecordingView {
    state: RefCell<ViewSnapshot>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.borrow().clone()
    }
}

impl PredictionView for RecordingView {
    fn show_preview(&self, slot: Slot, data_url: &str) {
        self.state.borrow_mut().previews.insert(slot, data_url.to_string());
    }

    fn hide_preview(&self, slot: Slot) {
        self.state.borrow_mut().previews.remove(&slot);
    }

    fn set_loading(&self, visible: bool) {
        let mut state = self.state.borrow_mut();
        state.loading = visible;
        if visible {
            state.loading_shown += 1;
        }
    }

    fn set_results_visible(&self, visible: bool) {
        self.state.borrow_mut().results_visible = visible;
    }

    fn set_field(&self, field: ResultField, text: &str) {
        self.state.borrow_mut().fields.insert(field, text.to_string());
    }

    fn show_error(&self, message: &str) {
        self.state.borrow_mut().error = Some(message.to_string());
    }

    fn hide_error(&self) {
        self.state.borrow_mut().error = None;
    }
}
