use std::time::Duration;

use async_trait::async_trait;

use crate::errors::SelfCheckResult;
use crate::reviewer::client::{InferenceClient, Prediction};

/// Client for a Flowise-style prediction endpoint: one POST with a
/// `{"question": ...}` body, answered with a JSON document.
pub struct FlowiseClient {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl FlowiseClient {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> SelfCheckResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            endpoint,
            api_key,
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl InferenceClient for FlowiseClient {
    fn name(&self) -> &str {
        "flowise"
    }

    async fn predict(&self, question: &str) -> SelfCheckResult<Prediction> {
        let body = serde_json::json!({ "question": question });

        tracing::debug!(
            endpoint = %self.endpoint,
            question_len = question.len(),
            "sending prediction request"
        );

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, body_len = body.len(), "prediction response received");
        Ok(Prediction { status, body })
    }
}
