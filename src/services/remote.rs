use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};

use crate::{
    models::{ChatRequest, ChatResponse},
    services::conversation::ChatApi,
};

/// Reaches a chat endpoint served by another process.
#[derive(Clone)]
pub struct RemoteChat {
    http: reqwest::Client,
    endpoint: String,
}

impl RemoteChat {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatApi for RemoteChat {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .wrap_err_with(|| format!("could not reach chat endpoint {}", self.endpoint))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("chat endpoint error: {status} - {text}");
            bail!("chat endpoint returned {status}");
        }

        resp.json()
            .await
            .wrap_err("could not decode chat endpoint response")
    }
}
