use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use super::{ChatCompletionRequest, CompletionProvider, ProviderReply};

/// OpenAI-compatible chat-completions client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> anyhow::Result<ProviderReply> {
        let url = self.completions_url();
        info!(
            "Calling completion provider at {} with model {}",
            url, request.model
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        info!("Received response status: {}", status);

        let text = response.text().await?;
        debug!("Response body: {}", text);

        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ProviderReply { status, body })
    }
}
