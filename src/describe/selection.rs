use std::fmt;

use crate::describe::element::describe_element;
use crate::describe::hierarchy::describe_hierarchy;
use crate::scene::types::VisualElement;

pub const EMPTY_SELECTION: &str = "No elements selected.";

/// Result of one description request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Nothing was selected. Renders as [`EMPTY_SELECTION`].
    Empty,
    Described(String),
}

impl Report {
    pub fn is_empty(&self) -> bool {
        matches!(self, Report::Empty)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Report::Empty => EMPTY_SELECTION,
            Report::Described(text) => text,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the report for everything selected on `page_name`.
///
/// A single selected element additionally gets a full hierarchy dump. The
/// closing analysis points are fixed and do not depend on the input.
pub fn describe_selection(page_name: &str, selection: &[VisualElement]) -> Report {
    if selection.is_empty() {
        return Report::Empty;
    }

    let mut lines = Vec::new();

    lines.push(format!("📋 Selected elements: {}", selection.len()));
    lines.push(format!("📄 Page: {page_name}"));
    lines.push(String::new());

    for (index, node) in selection.iter().enumerate() {
        lines.push(format!("🔍 Element {}:", index + 1));
        lines.push(describe_element(node));
        lines.push(String::new());
    }

    if let [only] = selection {
        lines.push("🌳 Hierarchy:".to_string());
        lines.push(describe_hierarchy(only, 0));
        lines.push(String::new());
    }

    lines.push("💡 Analysis points:".to_string());
    lines.push(format!("- Design consistency across {} element(s)", selection.len()));
    lines.push("- Style guide adherence (color, font, spacing)".to_string());
    lines.push("- Appropriateness of the layout structure".to_string());
    lines.push("- Accessibility from a user-experience perspective".to_string());
    lines.push("- Responsive design considerations".to_string());

    Report::Described(lines.join("\n"))
}
