//! 結果テキストの整形

use crate::types::{PredictionResponse, Slot};
use crate::view::ResultField;

/// `0.97` -> `"97.00%"`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn label_text(label: &str) -> String {
    format!("Predicted Label: {}", label)
}

pub fn confidence_text(confidence: f64) -> String {
    format!("Confidence: {}", format_percent(confidence))
}

pub fn similarity_text(similarity_score: f64) -> String {
    format!("Similarity Score: {}", format_percent(similarity_score))
}

pub fn analysis_text(analysis: &str) -> String {
    format!("Analysis: {}", analysis)
}

/// 各欄に書き込むテキストを表示順で返す
pub fn render_fields(response: &PredictionResponse) -> Vec<(ResultField, String)> {
    let mut fields = Vec::new();

    for slot in [Slot::First, Slot::Second] {
        if let Some(result) = response.result_for(slot) {
            fields.push((ResultField::Label(slot), label_text(&result.label)));
            fields.push((ResultField::Confidence(slot), confidence_text(result.confidence)));
        }
    }

    if let Some(comparison) = response.comparison() {
        fields.push((ResultField::SimilarityScore, similarity_text(comparison.similarity_score)));
        fields.push((ResultField::Analysis, analysis_text(&comparison.analysis)));
    }

    fields
}
