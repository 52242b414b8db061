//! 予測サービスへの送信
//!
//! ブラウザのfetchはSendでないため `?Send`。

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use thiserror::Error;

use crate::protocol::{HttpReply, PredictionRequest};

/// ネットワーク障害（接続失敗・タイムアウト・ボディ読み込み失敗）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait(?Send)]
pub trait PredictionTransport {
    async fn send(&self, request: &PredictionRequest) -> Result<HttpReply, TransportError>;
}

/// 決められた応答を順に返すトランスポート
#[derive(Debug, Default)]
pub struct FakeTransport {
    replies: RefCell<VecDeque<Result<HttpReply, TransportError>>>,
    requests: RefCell<Vec<PredictionRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: HttpReply) -> Self {
        self.replies.borrow_mut().push_back(Ok(reply));
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError(message.into())));
        self
    }

    /// 送信されたリクエスト
    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PredictionTransport for FakeTransport {
    async fn send(&self, request: &PredictionRequest) -> Result<HttpReply, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".into())))
    }
}
