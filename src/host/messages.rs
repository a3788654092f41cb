use serde::{Deserialize, Serialize};

/// Requests arriving from the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostRequest {
    RequestSelection,
    RunAnalysis,
    ClosePlugin,
}

/// Events posted back to the host UI, shaped `{"type": ..., "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostEvent {
    SelectionInfo(String),
    AnalysisLoading(bool),
    AnalysisResult(serde_json::Value),
    AnalysisError(String),
}
