//! ターミナル用のビュー
//!
//! ローディングはスピナー、結果とエラーは最後にまとめて出力する。

use indicatif::{ProgressBar, ProgressStyle};
use photo_predict_common::{ClientVariant, PredictionView, ResultField, Slot};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Default)]
pub struct TerminalView {
    spinner: RefCell<Option<ProgressBar>>,
    fields: RefCell<BTreeMap<ResultField, String>>,
    results_visible: RefCell<bool>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表示中の結果テキスト（表示順）
    pub fn result_lines(&self, variant: ClientVariant) -> Vec<String> {
        if !*self.results_visible.borrow() {
            return Vec::new();
        }
        let fields = self.fields.borrow();
        ResultField::for_variant(variant)
            .into_iter()
            .filter_map(|field| fields.get(&field).cloned())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

/// Data URLのbase64部分から元のバイト数を求める
fn decoded_len(data_url: &str) -> usize {
    let payload = data_url.split_once(',').map(|(_, p)| p).unwrap_or("");
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
    (payload.len() / 4 * 3).saturating_sub(padding)
}

fn preview_message(slot: Slot, data_url: &str) -> String {
    format!("✔ 画像{}を読み込みました（{} bytes）", slot.index(), decoded_len(data_url))
}

impl PredictionView for TerminalView {
    fn show_preview(&self, slot: Slot, data_url: &str) {
        println!("{}", preview_message(slot, data_url));
    }

    fn hide_preview(&self, _slot: Slot) {}

    fn set_loading(&self, visible: bool) {
        let mut spinner = self.spinner.borrow_mut();
        if visible {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                pb.set_style(style);
            }
            pb.set_message("予測中...");
            pb.enable_steady_tick(Duration::from_millis(100));
            *spinner = Some(pb);
        } else if let Some(pb) = spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn set_results_visible(&self, visible: bool) {
        *self.results_visible.borrow_mut() = visible;
    }

    fn set_field(&self, field: ResultField, text: &str) {
        self.fields.borrow_mut().insert(field, text.to_string());
    }

    /// エラーは最終状態からまとめて出力する
    fn show_error(&self, _message: &str) {}

    fn hide_error(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_results_are_not_printed() {
        let view = TerminalView::new();
        view.set_field(ResultField::Label(Slot::First), "Predicted Label: cat");
        assert!(view.result_lines(ClientVariant::Single).is_empty());

        view.set_results_visible(true);
        assert_eq!(view.result_lines(ClientVariant::Single), vec!["Predicted Label: cat"]);
    }

    #[test]
    fn test_preview_reports_file_size() {
        // "GIF89a" は6バイト
        assert_eq!(
            preview_message(Slot::First, "data:image/gif;base64,R0lGODlh"),
            "✔ 画像1を読み込みました（6 bytes）"
        );
        // パディング付き: 4バイト / 5バイト
        assert_eq!(decoded_len("data:image/png;base64,iVBORw=="), 4);
        assert_eq!(decoded_len("data:image/png;base64,iVBORw0="), 5);
        assert_eq!(decoded_len("data:image/png;base64,"), 0);
    }

    #[test]
    fn test_spinner_lifecycle() {
        let view = TerminalView::new();
        view.set_loading(true);
        assert!(view.spinner.borrow().is_some());
        view.set_loading(false);
        assert!(view.spinner.borrow().is_none());
    }
}
