use serde::Serialize;
use serde_json::{json, Map, Value};

/// What a review request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewOutcome {
    /// Structured verdict parsed from the model's answer.
    Verdict(Value),
    /// The endpoint answered but the answer was not JSON at some stage.
    Unparsed(UnparsedReview),
    /// No usable answer: the endpoint was unreachable or rejected the request.
    Failed(ReviewFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStage {
    /// The HTTP body itself was not JSON.
    Response,
    /// The body was JSON but its `text` field held no parseable verdict.
    Verdict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsedReview {
    pub stage: ParseStage,
    pub raw_text: String,
    pub parse_error: String,
}

impl UnparsedReview {
    pub fn message(&self) -> &'static str {
        match self.stage {
            ParseStage::Response => "The endpoint response could not be parsed as JSON.",
            ParseStage::Verdict => "The analysis returned by the model could not be parsed as JSON.",
        }
    }

    /// Payload delivered to the host in place of a verdict.
    pub fn to_payload(&self) -> Value {
        let raw_key = match self.stage {
            ParseStage::Response => "raw_response",
            ParseStage::Verdict => "raw_analysis",
        };
        let mut payload = Map::new();
        payload.insert(raw_key.to_string(), Value::String(self.raw_text.clone()));
        payload.insert("parse_error".to_string(), json!(self.parse_error));
        payload.insert("message".to_string(), json!(self.message()));
        Value::Object(payload)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStage {
    /// Connectivity check sent before the real question.
    Probe,
    Analysis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewFailure {
    pub stage: RequestStage,
    /// HTTP status when the endpoint answered with an error.
    pub status: Option<u16>,
    pub detail: String,
}

impl ReviewFailure {
    pub fn rejected(stage: RequestStage, status: u16, body: String) -> Self {
        Self {
            stage,
            status: Some(status),
            detail: body,
        }
    }

    pub fn unreachable(stage: RequestStage, error: String) -> Self {
        Self {
            stage,
            status: None,
            detail: error,
        }
    }

    /// Human-readable diagnostic for the host.
    pub fn message(&self) -> String {
        match (self.stage, self.status) {
            (RequestStage::Probe, Some(status)) => format!(
                "Connection check failed ({status}):\n{}\n\nEven the short test request was rejected. Check the endpoint configuration.",
                self.detail
            ),
            (RequestStage::Analysis, Some(status)) => format!(
                "Analysis request failed ({status}):\n\nError details:\n{}\n\nThe prompt may be too large or the endpoint may be misconfigured.",
                self.detail
            ),
            (_, None) => format!(
                "Connection failed:\n{}\n\nPossible causes:\n1. Network connectivity\n2. Inference server unavailable\n3. Wrong endpoint URL",
                self.detail
            ),
        }
    }
}
