//! 予測サービスとのHTTP契約
//!
//! リクエスト: `POST <endpoint>`、multipart/form-data、スロットごとに1パート。
//! レスポンス: 成功JSON、`{error}` を含むJSON、それ以外。

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{ClientVariant, Comparison, ImageFile, LabelResult, PredictionResponse, Selection};

/// multipartの1パート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: &'static str,
    pub file: ImageFile,
}

/// クリックごとに組み立てるリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub endpoint: String,
    pub parts: Vec<FormPart>,
}

impl PredictionRequest {
    /// 必要なスロットが欠けていれば `Error::Validation`
    pub fn build(config: &ClientConfig, selection: &Selection) -> Result<Self> {
        let variant = config.variant;
        if !selection.is_complete(variant) {
            return Err(Error::Validation(variant.validation_message().to_string()));
        }

        let parts: Vec<FormPart> = variant
            .slots()
            .iter()
            .filter_map(|slot| {
                selection.get(*slot).map(|file| FormPart {
                    name: variant.part_name(*slot),
                    file: file.clone(),
                })
            })
            .collect();

        debug!(
            endpoint = %config.endpoint,
            parts = parts.len(),
            "prediction request built"
        );

        Ok(Self {
            endpoint: config.endpoint.clone(),
            parts,
        })
    }
}

/// トランスポートが返す生のHTTPレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Deserialize)]
struct CompareBody {
    image1_result: LabelResult,
    image2_result: LabelResult,
    comparison: Comparison,
}

/// レスポンスを解釈する
///
/// 優先順位:
/// 1. ステータスに関係なく `error` があればバックエンドエラー
/// 2. 2xx以外はHTTPステータスエラー
/// 3. 2xxでもJSONとして読めなければパースエラー
pub fn interpret_reply(variant: ClientVariant, reply: &HttpReply) -> Result<PredictionResponse> {
    let parsed = serde_json::from_str::<Value>(&reply.body);

    if let Some(message) = parsed.as_ref().ok().and_then(backend_error) {
        return Err(Error::Backend(message));
    }

    if !reply.is_success() {
        return Err(Error::HttpStatus(reply.status));
    }

    let value = parsed.map_err(|e| Error::Parse(e.to_string()))?;

    let response = match variant {
        ClientVariant::Single => {
            PredictionResponse::Single(LabelResult::deserialize(value).map_err(parse_error)?)
        }
        ClientVariant::Compare => {
            let body = CompareBody::deserialize(value).map_err(parse_error)?;
            PredictionResponse::Compare {
                image1_result: body.image1_result,
                image2_result: body.image2_result,
                comparison: body.comparison,
            }
        }
    };

    Ok(response)
}

fn parse_error(e: serde_json::Error) -> Error {
    Error::Parse(e.to_string())
}

/// 空文字・null・false はエラー扱いしない
fn backend_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Slot;

    fn selection_with(slots: &[Slot]) -> Selection {
        let mut selection = Selection::default();
        for slot in slots {
            let name = format!("image{}.jpg", slot.index());
            selection.set(*slot, Some(ImageFile::new(name, "image/jpeg", vec![0xff, 0xd8])));
        }
        selection
    }

    #[test]
    fn test_build_compare_request() {
        let config = ClientConfig::new(ClientVariant::Compare);
        let request =
            PredictionRequest::build(&config, &selection_with(&[Slot::First, Slot::Second])).unwrap();

        assert_eq!(request.endpoint, "http://localhost:5000/predict");
        let names: Vec<_> = request.parts.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["file1", "file2"]);
        assert_eq!(request.parts[1].file.file_name, "image2.jpg");
    }

    #[test]
    fn test_build_single_request_uses_file_part() {
        let config = ClientConfig::new(ClientVariant::Single).with_endpoint("http://svc/predict");
        let request = PredictionRequest::build(&config, &selection_with(&[Slot::First])).unwrap();
        assert_eq!(request.endpoint, "http://svc/predict");
        assert_eq!(request.parts.len(), 1);
        assert_eq!(request.parts[0].name, "file");
    }

    #[test]
    fn test_build_missing_slot_is_validation_error() {
        let config = ClientConfig::new(ClientVariant::Compare);
        let err = PredictionRequest::build(&config, &selection_with(&[Slot::Second])).unwrap_err();
        assert_eq!(
            err,
            Error::Validation("Please select two image files before comparing.".into())
        );
    }

    #[test]
    fn test_single_success() {
        let reply = HttpReply::new(200, r#"{"label":"tabby","confidence":0.91}"#);
        let response = interpret_reply(ClientVariant::Single, &reply).unwrap();
        assert_eq!(
            response,
            PredictionResponse::Single(LabelResult { label: "tabby".into(), confidence: 0.91 })
        );
    }

    #[test]
    fn test_compare_success() {
        let body = r#"{
            "image1_result": {"label": "cat", "confidence": 0.97},
            "image2_result": {"label": "dog", "confidence": 0.88},
            "comparison": {"similarity_score": 0.12, "analysis": "different"}
        }"#;
        let response = interpret_reply(ClientVariant::Compare, &HttpReply::new(200, body)).unwrap();
        assert_eq!(response.result_for(Slot::Second).unwrap().label, "dog");
        assert_eq!(response.comparison().unwrap().analysis, "different");
    }

    #[test]
    fn test_error_field_on_success_status() {
        let reply = HttpReply::new(200, r#"{"error":"model not loaded"}"#);
        let err = interpret_reply(ClientVariant::Single, &reply).unwrap_err();
        assert_eq!(err, Error::Backend("model not loaded".into()));
    }

    #[test]
    fn test_error_field_on_bad_request() {
        let reply = HttpReply::new(400, r#"{"error":"Two files are required"}"#);
        let err = interpret_reply(ClientVariant::Compare, &reply).unwrap_err();
        assert_eq!(err.to_string(), "Backend Error: Two files are required");
    }

    #[test]
    fn test_non_json_error_status_uses_status_line() {
        let reply = HttpReply::new(502, "<html>Bad Gateway</html>");
        let err = interpret_reply(ClientVariant::Compare, &reply).unwrap_err();
        assert_eq!(err, Error::HttpStatus(502));
    }

    #[test]
    fn test_json_error_status_without_error_field() {
        let reply = HttpReply::new(500, r#"{"detail":"boom"}"#);
        let err = interpret_reply(ClientVariant::Single, &reply).unwrap_err();
        assert_eq!(err, Error::HttpStatus(500));
    }

    #[test]
    fn test_success_with_garbage_body_is_parse_error() {
        let reply = HttpReply::new(200, "not json");
        let err = interpret_reply(ClientVariant::Single, &reply).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_success_missing_comparison_is_parse_error() {
        let body = r#"{"image1_result":{"label":"a","confidence":1.0},"image2_result":{"label":"b","confidence":1.0}}"#;
        let err = interpret_reply(ClientVariant::Compare, &HttpReply::new(200, body)).unwrap_err();
        match err {
            Error::Parse(detail) => assert!(detail.contains("comparison")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_or_null_error_field_is_ignored() {
        let reply = HttpReply::new(200, r#"{"error":null,"label":"cat","confidence":0.5}"#);
        assert!(interpret_reply(ClientVariant::Single, &reply).is_ok());

        let reply = HttpReply::new(200, r#"{"error":"","label":"cat","confidence":0.5}"#);
        assert!(interpret_reply(ClientVariant::Single, &reply).is_ok());
    }
}
