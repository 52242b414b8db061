//! クライアント実行時設定
//!
//! コントローラ生成時に注入する。エンドポイントはここ以外に持たない。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ClientVariant;

/// 予測サービスの既定URL
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/predict";

/// HTTPタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub variant: ClientVariant,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl ClientConfig {
    pub fn new(variant: ClientVariant) -> Self {
        Self {
            variant,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::Config(format!(
                "endpoint must be an http(s) URL: {:?}",
                self.endpoint
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::Config("timeout must be at least 1 second".into()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ClientVariant::default())
    }
}
