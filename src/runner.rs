//! CLIからの予測実行
//!
//! ブラウザと同じコントローラを、ファイル選択→予測クリックの順に駆動する。

use crate::error::Result;
use crate::loader;
use crate::terminal::TerminalView;
use crate::transport::ReqwestTransport;
use photo_predict_common::{
    ClientConfig, PredictOutcome, PredictionClient, PredictionTransport, PredictionView, UiState,
};
use std::path::PathBuf;

/// 画像を選択して1回予測する。戻り値は最終状態。
pub async fn predict_with<V, T>(client: &PredictionClient<V, T>, images: &[PathBuf]) -> Result<UiState>
where
    V: PredictionView,
    T: PredictionTransport,
{
    let slots = client.config().variant.slots();
    for (slot, path) in slots.iter().zip(images) {
        let file = loader::load_image(path)?;
        client.on_file_selected(*slot, Some(file));
        if client.state().is_error() {
            return Ok(client.state());
        }
    }

    let state = match client.on_predict().await {
        PredictOutcome::Completed(state) => state,
        PredictOutcome::Ignored => client.state(),
    };
    Ok(state)
}

/// 予測して結果をターミナルに出力する
pub async fn run_prediction(config: ClientConfig, images: &[PathBuf], json: bool) -> Result<UiState> {
    config.validate()?;
    let transport = ReqwestTransport::new(&config)?;
    let variant = config.variant;
    let client = PredictionClient::new(config, TerminalView::new(), transport);

    let state = predict_with(&client, images).await?;

    match &state {
        UiState::Result(response) if json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        UiState::Result(_) => {
            for line in client.view().result_lines(variant) {
                println!("{}", line);
            }
        }
        UiState::Error(message) => {
            eprintln!("❌ {}", message);
        }
        UiState::Idle | UiState::Loading => {}
    }

    Ok(state)
}
