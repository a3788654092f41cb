use std::path::Path;

use crate::config::PromptsConfig;
use crate::errors::{SelfCheckError, SelfCheckResult};

/// Placeholder replaced by the selection report.
pub const REPORT_PLACEHOLDER: &str = "{report}";

/// Short question sent before the analysis to check the endpoint answers at all.
pub const PROBE_QUESTION: &str = "Hello. This is a short connectivity test.";

/// The twelve design principles every selection is scored against.
pub const PRINCIPLES: [&str; 12] = [
    "Simplicity",
    "Casual Concept",
    "Minimum Feature",
    "Less Policy",
    "One Thing per One Page",
    "Tap & Scroll",
    "Easy to Answer",
    "Value First, Cost Later",
    "No Ads Patterns",
    "Context-based",
    "No More Loading",
    "Sleek Experience",
];

const DEFAULT_TEMPLATE: &str = r#"Analyze the following design elements against our company's 12 design principles:

{report}

**Important: back every assessment with concrete evidence and its quantitative impact.**

Respond only with JSON in the following shape (no markdown fences):
{
  "summary": "1-2 sentence overall assessment",
  "violations": [
    ["element name", "principle", "problem", "severity", "fix", "expected quantitative impact"]
  ],
  "compliances": [
    ["element name", "principle", "what works", "impact", "quantitative effect seen in real cases"]
  ],
  "recommendations": [
    ["priority", "recommendation", "expected effect", "quantitative results of similar improvements"]
  ],
  "score": {
    "overall": 1-100,
    "principles": {
{principle_scores}
    }
  },
  "insights": {
    "impact_analysis": "concrete impact of ignoring these principles, with numbers",
    "success_factors": "why these principles matter, with success stories",
    "implementation_guide": "pitfalls and a checklist for implementation"
  }
}

Example:
{
  "summary": "The selected design shows serious violations of Simplicity and One Thing per One Page. Too much information on one screen raises the user's cognitive load considerably.",
  "violations": [
    ["Transfer screen", "Simplicity", "8 input fields and 3 tooltips share one screen", "high", "Keep the 3 core fields and move the rest under 'More options'", "Reducing input fields raised completion from 68% to 82% in earlier cases"]
  ],
  "compliances": [
    ["Main header", "Casual Concept", "Uses the familiar 'Send money' instead of 'Wire transfer'", "high", "A similar change cut new-user drop-off from 22% to 15%"]
  ],
  "recommendations": [
    ["high", "Simplify the transfer screen", "Higher user satisfaction", "Similar projects cut average task time from 46s to 29s"]
  ],
  "insights": {
    "impact_analysis": "Violating simplicity dropped transfer completion from 75% to 61%, increased task time by 81% and drop-off by 175%",
    "success_factors": "Plain wording and a simple UI lower the entry barrier for new users and lift conversion",
    "implementation_guide": "1) Key information must be recognisable within 3 seconds 2) Keep input fields to 3 or fewer 3) Replace jargon with everyday wording"
  }
}"#;

/// Question template wrapping a selection report.
#[derive(Debug, Clone)]
pub struct AnalysisPrompt {
    template: String,
}

impl AnalysisPrompt {
    pub fn builtin() -> Self {
        let scores = PRINCIPLES
            .iter()
            .map(|p| format!("      \"{p}\": 1-10"))
            .collect::<Vec<_>>()
            .join(",\n");
        Self {
            template: DEFAULT_TEMPLATE.replace("{principle_scores}", &scores),
        }
    }

    pub fn from_template(template: String) -> SelfCheckResult<Self> {
        if !template.contains(REPORT_PLACEHOLDER) {
            return Err(SelfCheckError::Config(format!(
                "analysis template has no {REPORT_PLACEHOLDER} placeholder"
            )));
        }
        Ok(Self { template })
    }

    pub fn from_file(path: &Path) -> SelfCheckResult<Self> {
        let template = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "analysis template loaded");
        Self::from_template(template)
    }

    pub fn from_config(config: &PromptsConfig) -> SelfCheckResult<Self> {
        match &config.analysis_template {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::builtin()),
        }
    }

    pub fn render(&self, report: &str) -> String {
        self.template.replace(REPORT_PLACEHOLDER, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_template_embeds_report_and_every_principle() {
        let question = AnalysisPrompt::builtin().render("=== FRAME: Card ===");
        assert!(question.contains("=== FRAME: Card ==="));
        assert!(!question.contains(REPORT_PLACEHOLDER));
        for principle in PRINCIPLES {
            assert!(question.contains(&format!("\"{principle}\": 1-10")), "{principle}");
        }
    }

    #[test]
    fn custom_template_requires_placeholder() {
        let err = AnalysisPrompt::from_template("no slot".into()).unwrap_err();
        assert!(matches!(err, SelfCheckError::Config(_)));

        let prompt = AnalysisPrompt::from_template("Review:\n{report}\nThanks".into()).unwrap();
        assert_eq!(prompt.render("X"), "Review:\nX\nThanks");
    }

    #[test]
    fn config_path_loads_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.md");
        std::fs::write(&path, "Critique this: {report}").unwrap();

        let config = PromptsConfig {
            analysis_template: Some(path.display().to_string()),
        };
        let prompt = AnalysisPrompt::from_config(&config).unwrap();
        assert_eq!(prompt.render("a button"), "Critique this: a button");
    }
}
