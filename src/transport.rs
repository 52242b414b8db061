//! reqwestによるmultipart送信

use crate::error::Result;
use async_trait::async_trait;
use photo_predict_common::{
    ClientConfig, HttpReply, PredictionRequest, PredictionTransport, TransportError,
};
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client })
    }

    fn build_form(request: &PredictionRequest) -> std::result::Result<Form, TransportError> {
        let mut form = Form::new();
        for part in &request.parts {
            let body = Part::bytes(part.file.bytes.clone())
                .file_name(part.file.file_name.clone())
                .mime_str(&part.file.mime_type)
                .map_err(transport_error)?;
            form = form.part(part.name, body);
        }
        Ok(form)
    }
}

#[async_trait(?Send)]
impl PredictionTransport for ReqwestTransport {
    async fn send(&self, request: &PredictionRequest) -> std::result::Result<HttpReply, TransportError> {
        let form = Self::build_form(request)?;
        debug!(endpoint = %request.endpoint, parts = request.parts.len(), "POST multipart");

        let response = self
            .client
            .post(&request.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(HttpReply { status, body })
    }
}

fn transport_error(e: reqwest::Error) -> TransportError {
    TransportError(e.to_string())
}
