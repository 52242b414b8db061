use crate::error::{PhotoPredictError, Result};
use photo_predict_common::ImageFile;
use std::path::Path;

/// 判定できないファイルのMIMEタイプ（選択時に弾かれる）
const UNKNOWN_MIME: &str = "application/octet-stream";

/// 画像ファイルを読み込む
///
/// MIMEタイプは拡張子ではなく先頭バイトから判定する。
pub fn load_image(path: &Path) -> Result<ImageFile> {
    if !path.is_file() {
        return Err(PhotoPredictError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(ImageFile::new(file_name, detect_mime_type(&bytes), bytes))
}

pub fn detect_mime_type(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}
