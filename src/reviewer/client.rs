use async_trait::async_trait;

use crate::errors::SelfCheckResult;

/// Raw answer from the inference endpoint. Non-success statuses are data,
/// not errors; the reviewer decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub status: u16,
    pub body: String,
}

impl Prediction {
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Remote question-answering endpoint.
/// Implementations return `Err` only when no response was received at all.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    async fn predict(&self, question: &str) -> SelfCheckResult<Prediction>;
}
