//! 予測クライアントの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ClientVariant / Slot: 1枚分類か2枚比較か、どの入力欄か
//! - ImageFile / Selection: ユーザーが選んだ画像
//! - PredictionResponse: 予測サービスの成功レスポンス
//! - UiState: 画面状態

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// クライアントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientVariant {
    /// 1枚の画像を分類（パート名 `file`）
    Single,
    /// 2枚の画像を比較（パート名 `file1` / `file2`）
    #[default]
    Compare,
}

impl ClientVariant {
    pub fn slots(&self) -> &'static [Slot] {
        match self {
            ClientVariant::Single => &[Slot::First],
            ClientVariant::Compare => &[Slot::First, Slot::Second],
        }
    }

    pub fn uses_slot(&self, slot: Slot) -> bool {
        self.slots().contains(&slot)
    }

    /// multipartのパート名
    pub fn part_name(&self, slot: Slot) -> &'static str {
        match (self, slot) {
            (ClientVariant::Single, _) => "file",
            (ClientVariant::Compare, Slot::First) => "file1",
            (ClientVariant::Compare, Slot::Second) => "file2",
        }
    }

    /// 画像未選択時のメッセージ
    pub fn validation_message(&self) -> &'static str {
        match self {
            ClientVariant::Single => "Please select an image file first.",
            ClientVariant::Compare => "Please select two image files before comparing.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientVariant::Single => "single",
            ClientVariant::Compare => "compare",
        }
    }
}

/// 画像入力欄
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    /// 1始まりの番号（DOMのid `imageInput1` などに対応）
    pub fn index(&self) -> u8 {
        match self {
            Slot::First => 1,
            Slot::Second => 2,
        }
    }
}

/// 選択された画像ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// 空ファイルと `image/*` 以外は受け付けない
    pub fn validate(&self) -> Result<()> {
        if self.bytes.is_empty() || !self.mime_type.starts_with("image/") {
            return Err(Error::UnreadableImage(self.file_name.clone()));
        }
        Ok(())
    }

    /// プレビュー用のData URL（`data:image/png;base64,...`）
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// スロットごとの選択状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    first: Option<ImageFile>,
    second: Option<ImageFile>,
}

impl Selection {
    pub fn get(&self, slot: Slot) -> Option<&ImageFile> {
        match slot {
            Slot::First => self.first.as_ref(),
            Slot::Second => self.second.as_ref(),
        }
    }

    pub fn set(&mut self, slot: Slot, file: Option<ImageFile>) {
        match slot {
            Slot::First => self.first = file,
            Slot::Second => self.second = file,
        }
    }

    /// 必要なスロットがすべて埋まっているか
    pub fn is_complete(&self, variant: ClientVariant) -> bool {
        variant.slots().iter().all(|slot| self.get(*slot).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }
}

/// 1枚分の予測結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelResult {
    pub label: String,
    pub confidence: f64,
}

/// 2枚比較の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub similarity_score: f64,
    pub analysis: String,
}

/// 予測サービスの成功レスポンス
///
/// シリアライズするとサービスが返したJSONと同じ形になる。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Single(LabelResult),
    Compare {
        image1_result: LabelResult,
        image2_result: LabelResult,
        comparison: Comparison,
    },
}

impl PredictionResponse {
    pub fn result_for(&self, slot: Slot) -> Option<&LabelResult> {
        match (self, slot) {
            (PredictionResponse::Single(result), Slot::First) => Some(result),
            (PredictionResponse::Single(_), Slot::Second) => None,
            (PredictionResponse::Compare { image1_result, .. }, Slot::First) => Some(image1_result),
            (PredictionResponse::Compare { image2_result, .. }, Slot::Second) => Some(image2_result),
        }
    }

    pub fn comparison(&self) -> Option<&Comparison> {
        match self {
            PredictionResponse::Compare { comparison, .. } => Some(comparison),
            PredictionResponse::Single(_) => None,
        }
    }
}

/// 画面状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Result(PredictionResponse),
    Error(String),
}

impl UiState {
    pub fn is_error(&self) -> bool {
        matches!(self, UiState::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }
}
