//! Two-stage unwrap of a prediction response: the HTTP body is JSON, and its
//! `text` field holds the model's answer, which is JSON again, usually inside
//! a markdown code fence.
use regex::Regex;
use serde_json::Value;

use crate::errors::SelfCheckResult;
use crate::reviewer::types::{ParseStage, ReviewOutcome, UnparsedReview};

pub struct FenceExtractor {
    tagged: Regex,
    untagged: Regex,
}

impl FenceExtractor {
    pub fn new() -> SelfCheckResult<Self> {
        Ok(Self {
            tagged: Regex::new(r"(?s)```json\s*(.*?)\s*```")?,
            untagged: Regex::new(r"(?s)```\s*(.*?)\s*```")?,
        })
    }

    /// Content of the first ```` ```json ```` fence, else of the first plain
    /// fence, else the whole text; always trimmed.
    pub fn extract_json_block<'a>(&self, text: &'a str) -> &'a str {
        for pattern in [&self.tagged, &self.untagged] {
            if let Some(inner) = pattern.captures(text).and_then(|c| c.get(1)) {
                return inner.as_str().trim();
            }
        }
        text.trim()
    }

    pub fn parse_prediction(&self, body: &str) -> ReviewOutcome {
        let response: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "prediction body is not JSON");
                return ReviewOutcome::Unparsed(UnparsedReview {
                    stage: ParseStage::Response,
                    raw_text: body.to_string(),
                    parse_error: e.to_string(),
                });
            }
        };

        let text = match response.get("text") {
            Some(Value::String(text)) if !text.is_empty() => text.as_str(),
            None | Some(Value::Null) | Some(Value::String(_)) => {
                tracing::info!("prediction has no text field; using whole response");
                return ReviewOutcome::Verdict(response);
            }
            Some(other) => {
                tracing::warn!("prediction text field is not a string");
                return ReviewOutcome::Unparsed(UnparsedReview {
                    stage: ParseStage::Verdict,
                    raw_text: other.to_string(),
                    parse_error: "text field is not a string".to_string(),
                });
            }
        };

        let candidate = self.extract_json_block(text);
        match serde_json::from_str::<Value>(candidate) {
            Ok(verdict) => {
                tracing::info!(len = candidate.len(), "verdict parsed");
                ReviewOutcome::Verdict(verdict)
            }
            Err(e) => {
                tracing::warn!(error = %e, "verdict text is not JSON");
                ReviewOutcome::Unparsed(UnparsedReview {
                    stage: ParseStage::Verdict,
                    raw_text: text.to_string(),
                    parse_error: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extractor() -> FenceExtractor {
        FenceExtractor::new().unwrap()
    }

    #[test]
    fn tagged_fence_wins_over_untagged() {
        let text = "```\nnot this\n```\nthen ```json\n{\"a\": 1}\n``` done";
        assert_eq!(extractor().extract_json_block(text), "{\"a\": 1}");
    }

    #[test]
    fn untagged_fence_then_raw_text() {
        let ex = extractor();
        assert_eq!(ex.extract_json_block("Here:\n```\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(ex.extract_json_block("  {\"plain\": true}\n"), "{\"plain\": true}");
    }

    #[test]
    fn fenced_json_inside_text_field_becomes_the_verdict() {
        let body = json!({ "text": "```json\n{\"summary\":\"ok\"}\n```" }).to_string();
        assert_eq!(
            extractor().parse_prediction(&body),
            ReviewOutcome::Verdict(json!({ "summary": "ok" }))
        );
    }

    #[test]
    fn response_without_text_is_used_whole() {
        let body = r#"{"json": {"summary": "direct"}}"#;
        assert_eq!(
            extractor().parse_prediction(body),
            ReviewOutcome::Verdict(json!({ "json": { "summary": "direct" } }))
        );
    }

    #[test]
    fn non_string_text_degrades_at_verdict_stage() {
        let body = json!({ "text": { "summary": "nested" } }).to_string();
        let outcome = extractor().parse_prediction(&body);
        let ReviewOutcome::Unparsed(unparsed) = outcome else {
            panic!("expected unparsed outcome, got {outcome:?}");
        };
        assert_eq!(unparsed.stage, ParseStage::Verdict);
        assert_eq!(unparsed.raw_text, r#"{"summary":"nested"}"#);
    }

    #[test]
    fn null_or_empty_text_uses_whole_response() {
        for body in [json!({ "text": null }), json!({ "text": "" })] {
            assert_eq!(
                extractor().parse_prediction(&body.to_string()),
                ReviewOutcome::Verdict(body)
            );
        }
    }

    #[test]
    fn non_json_body_degrades_at_response_stage() {
        let outcome = extractor().parse_prediction("Bad Gateway");
        let ReviewOutcome::Unparsed(unparsed) = outcome else {
            panic!("expected unparsed outcome, got {outcome:?}");
        };
        assert_eq!(unparsed.stage, ParseStage::Response);
        assert_eq!(unparsed.raw_text, "Bad Gateway");
        assert!(!unparsed.parse_error.is_empty());
    }

    #[test]
    fn prose_answer_degrades_at_verdict_stage() {
        let body = json!({ "text": "I think the design looks fine." }).to_string();
        let outcome = extractor().parse_prediction(&body);
        let ReviewOutcome::Unparsed(unparsed) = outcome else {
            panic!("expected unparsed outcome, got {outcome:?}");
        };
        assert_eq!(unparsed.stage, ParseStage::Verdict);
        assert_eq!(unparsed.raw_text, "I think the design looks fine.");
    }
}
