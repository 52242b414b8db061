use crate::error::{PhotoPredictError, Result};
use photo_predict_common::{ClientConfig, ClientVariant, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// エンドポイントを上書きする環境変数
pub const ENDPOINT_ENV: &str = "PHOTO_PREDICT_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PhotoPredictError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-predict").join("config.json"))
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        ClientConfig::default().with_endpoint(endpoint.as_str()).validate()?;
        self.endpoint = Some(endpoint);
        Ok(())
    }

    pub fn set_timeout(&mut self, timeout_seconds: u64) -> Result<()> {
        if timeout_seconds == 0 {
            return Err(PhotoPredictError::Config("タイムアウトは1秒以上にしてください".into()));
        }
        self.timeout_seconds = timeout_seconds;
        Ok(())
    }

    /// 優先順位: CLIフラグ > 環境変数 > 設定ファイル > 既定値
    pub fn resolve_endpoint(&self, cli_override: Option<&str>) -> String {
        let env = std::env::var(ENDPOINT_ENV).ok();
        self.resolve_endpoint_with(cli_override, env.as_deref())
    }

    pub fn resolve_endpoint_with(&self, cli_override: Option<&str>, env: Option<&str>) -> String {
        cli_override
            .or(env.filter(|value| !value.trim().is_empty()))
            .or(self.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string()
    }

    /// コントローラに注入する設定を作る
    pub fn client_config(&self, variant: ClientVariant, cli_override: Option<&str>) -> ClientConfig {
        ClientConfig::new(variant)
            .with_endpoint(self.resolve_endpoint(cli_override))
            .with_timeout(self.timeout_seconds)
    }
}
