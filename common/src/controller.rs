//! 予測クライアント本体
//!
//! 状態遷移:
//! - Idle --(画像選択)--> Idle（前回の結果・エラーを消す）
//! - Idle --(予測クリック、選択OK)--> Loading --(成功)--> Result
//! - Loading --(サーバーエラー・通信失敗)--> Error
//! - Result / Error は次の操作まで保持
//!
//! 送信中の再クリックは無視する。

use std::cell::{Cell, RefCell};

use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::protocol::{interpret_reply, PredictionRequest};
use crate::render::render_fields;
use crate::transport::PredictionTransport;
use crate::types::{ImageFile, PredictionResponse, Selection, Slot, UiState};
use crate::view::{PredictionView, ResultField};

/// `on_predict` の結果
#[derive(Debug, Clone, PartialEq)]
pub enum PredictOutcome {
    /// 送信中だったので何もしなかった
    Ignored,
    Completed(UiState),
}

pub struct PredictionClient<V, T> {
    config: ClientConfig,
    view: V,
    transport: T,
    selection: RefCell<Selection>,
    state: RefCell<UiState>,
    in_flight: Cell<bool>,
}

impl<V: PredictionView, T: PredictionTransport> PredictionClient<V, T> {
    pub fn new(config: ClientConfig, view: V, transport: T) -> Self {
        Self {
            config,
            view,
            transport,
            selection: RefCell::new(Selection::default()),
            state: RefCell::new(UiState::Idle),
            in_flight: Cell::new(false),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn selection(&self) -> Selection {
        self.selection.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// ファイル入力の変更。`None` は選択解除。
    pub fn on_file_selected(&self, slot: Slot, file: Option<ImageFile>) {
        if !self.config.variant.uses_slot(slot) {
            warn!(slot = slot.index(), variant = self.config.variant.as_str(), "slot not used by this client");
            return;
        }

        match file {
            Some(file) => {
                if let Err(err) = file.validate() {
                    warn!(file = %file.file_name, mime = %file.mime_type, "rejected selected file");
                    self.reject_slot(slot, err);
                    return;
                }

                debug!(slot = slot.index(), file = %file.file_name, bytes = file.bytes.len(), "file selected");
                let data_url = file.to_data_url();
                self.selection.borrow_mut().set(slot, Some(file));
                self.view.show_preview(slot, &data_url);
            }
            None => {
                debug!(slot = slot.index(), "file selection cleared");
                self.clear_slot(slot);
            }
        }

        self.reset_display();
    }

    /// ブラウザ側で読み込みに失敗したファイル
    pub fn reject_file(&self, slot: Slot, file_name: &str) {
        if !self.config.variant.uses_slot(slot) {
            return;
        }
        self.reject_slot(slot, Error::UnreadableImage(file_name.to_string()));
    }

    /// 予測ボタン
    pub async fn on_predict(&self) -> PredictOutcome {
        if self.in_flight.get() {
            warn!("prediction already in flight; click ignored");
            return PredictOutcome::Ignored;
        }

        self.view.hide_error();
        self.view.set_results_visible(false);

        let request = PredictionRequest::build(&self.config, &self.selection.borrow());
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                self.enter_error(err.to_string());
                return PredictOutcome::Completed(self.state());
            }
        };

        let outcome = {
            let _busy = BusyGuard::acquire(self);
            self.enter_loading();
            match self.transport.send(&request).await {
                Ok(reply) => {
                    debug!(status = reply.status, "prediction service replied");
                    interpret_reply(self.config.variant, &reply)
                }
                Err(err) => Err(Error::Transport(err.to_string())),
            }
        };

        match outcome {
            Ok(response) => {
                info!(variant = self.config.variant.as_str(), "prediction completed");
                self.enter_result(response);
            }
            Err(err) => {
                error!("Prediction failed: {}", err);
                self.enter_error(err.to_string());
            }
        }

        PredictOutcome::Completed(self.state())
    }

    /// 送信中はスロットを空けるだけ。エラー表示は応答の描画とぶつかる。
    fn reject_slot(&self, slot: Slot, err: Error) {
        self.clear_slot(slot);
        if self.in_flight.get() {
            warn!(slot = slot.index(), "{} (prediction in flight, not displayed)", err);
            return;
        }
        self.enter_error(err.to_string());
    }

    fn clear_slot(&self, slot: Slot) {
        self.selection.borrow_mut().set(slot, None);
        self.view.hide_preview(slot);
    }

    /// 送信中は結果表示に触らない
    fn reset_display(&self) {
        if self.in_flight.get() {
            return;
        }
        self.view.hide_error();
        self.view.set_results_visible(false);
        *self.state.borrow_mut() = UiState::Idle;
    }

    fn enter_loading(&self) {
        self.view.set_loading(true);
        self.view.set_results_visible(true);
        for field in ResultField::for_variant(self.config.variant) {
            self.view.set_field(field, "");
        }
        *self.state.borrow_mut() = UiState::Loading;
    }

    fn enter_result(&self, response: PredictionResponse) {
        for (field, text) in render_fields(&response) {
            self.view.set_field(field, &text);
        }
        self.view.hide_error();
        self.view.set_results_visible(true);
        *self.state.borrow_mut() = UiState::Result(response);
    }

    fn enter_error(&self, message: String) {
        self.view.show_error(&message);
        self.view.set_results_visible(false);
        *self.state.borrow_mut() = UiState::Error(message);
    }
}

/// 送信中フラグとローディング表示を、どの経路で抜けても解除する
struct BusyGuard<'a, V: PredictionView, T> {
    client: &'a PredictionClient<V, T>,
}

impl<'a, V: PredictionView, T> BusyGuard<'a, V, T> {
    fn acquire(client: &'a PredictionClient<V, T>) -> Self {
        client.in_flight.set(true);
        Self { client }
    }
}

impl<V: PredictionView, T> Drop for BusyGuard<'_, V, T> {
    fn drop(&mut self) {
        self.client.in_flight.set(false);
        self.client.view.set_loading(false);
    }
}
