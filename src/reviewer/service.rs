use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::SelfCheckResult;
use crate::reviewer::client::InferenceClient;
use crate::reviewer::extract::FenceExtractor;
use crate::reviewer::prompt::{AnalysisPrompt, PROBE_QUESTION};
use crate::reviewer::providers::flowise::FlowiseClient;
use crate::reviewer::types::{RequestStage, ReviewFailure, ReviewOutcome};

/// Sends a selection report to the inference endpoint and turns whatever
/// comes back into a [`ReviewOutcome`]. Never fails: every problem is
/// reported through the outcome.
pub struct Reviewer {
    client: Arc<dyn InferenceClient>,
    prompt: AnalysisPrompt,
    extractor: FenceExtractor,
    probe_connection: bool,
}

impl Reviewer {
    pub fn new(
        client: Arc<dyn InferenceClient>,
        prompt: AnalysisPrompt,
        probe_connection: bool,
    ) -> SelfCheckResult<Self> {
        Ok(Self {
            client,
            prompt,
            extractor: FenceExtractor::new()?,
            probe_connection,
        })
    }

    pub fn from_config(config: &AppConfig) -> SelfCheckResult<Self> {
        let client = FlowiseClient::new(
            config.reviewer.endpoint.clone(),
            config.reviewer.api_key.clone(),
            config.reviewer.timeout_secs.map(Duration::from_secs),
        )?;
        let prompt = AnalysisPrompt::from_config(&config.prompts)?;
        Self::new(Arc::new(client), prompt, config.reviewer.probe_connection)
    }

    pub async fn review(&self, report: &str) -> ReviewOutcome {
        if self.probe_connection {
            if let Err(failure) = self.ask(RequestStage::Probe, PROBE_QUESTION).await {
                return ReviewOutcome::Failed(failure);
            }
        }

        let question = self.prompt.render(report);
        tracing::debug!(report_len = report.len(), question_len = question.len(), "analysis prompt built");

        match self.ask(RequestStage::Analysis, &question).await {
            Ok(body) => self.extractor.parse_prediction(&body),
            Err(failure) => ReviewOutcome::Failed(failure),
        }
    }

    /// One round-trip; yields the response body on a success status.
    async fn ask(&self, stage: RequestStage, question: &str) -> Result<String, ReviewFailure> {
        match self.client.predict(question).await {
            Ok(prediction) if prediction.is_success() => {
                tracing::info!(
                    client = self.client.name(),
                    stage = ?stage,
                    status = prediction.status,
                    "prediction succeeded"
                );
                Ok(prediction.body)
            }
            Ok(prediction) => {
                tracing::warn!(
                    client = self.client.name(),
                    stage = ?stage,
                    status = prediction.status,
                    "prediction rejected"
                );
                Err(ReviewFailure::rejected(stage, prediction.status, prediction.body))
            }
            Err(e) => {
                tracing::error!(client = self.client.name(), stage = ?stage, error = %e, "prediction failed");
                Err(ReviewFailure::unreachable(stage, e.to_string()))
            }
        }
    }
}
