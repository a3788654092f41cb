use crate::describe::format::{
    auto_layout, effects_to_string, number, paints_to_string, round_half_up, text_style,
};
use crate::scene::types::{ElementKind, VisualElement};

/// Describes one element: geometry, paints, kind-specific attributes,
/// effects, constraints and its direct children, one attribute per line.
pub fn describe_element(node: &VisualElement) -> String {
    let mut info = Vec::new();

    info.push(format!("=== {}: {} ===", node.kind.label(), node.name));
    info.push(format!(
        "Size: {}×{}px",
        round_half_up(node.width),
        round_half_up(node.height)
    ));
    info.push(format!(
        "Position: ({}, {})",
        round_half_up(node.x),
        round_half_up(node.y)
    ));

    if !node.visible {
        info.push("Visibility: hidden".to_string());
    }

    if let Some(opacity) = node.opacity {
        if opacity != 1.0 {
            info.push(format!("Opacity: {}%", round_half_up(opacity * 100.0)));
        }
    }

    if let Some(fills) = node.fills.as_deref().filter(|f| !f.is_empty()) {
        info.push(format!("Fill: {}", paints_to_string(fills)));
    }

    // A stroke without a known weight cannot be described meaningfully.
    if let (Some(strokes), Some(weight)) = (
        node.strokes.as_deref().filter(|s| !s.is_empty()),
        node.stroke_weight,
    ) {
        info.push(format!("Stroke: {}px {}", number(weight), paints_to_string(strokes)));
    }

    if let Some(radius) = node.corner_radius.filter(|r| *r != 0.0) {
        info.push(format!("Corner radius: {}px", number(radius)));
    }

    match &node.kind {
        ElementKind::Text(text) => {
            info.push(format!("Text content: \"{}\"", text.characters));
            info.push(format!("Text style: {}", text_style(text, node.fills.as_deref())));
        }
        ElementKind::Frame(frame) => {
            if let Some(layout) = auto_layout(frame) {
                info.push(format!("Auto layout: {layout}"));
            }
            if frame.clips_content {
                info.push("Clipping: enabled".to_string());
            }
        }
        _ => {}
    }

    let effects = effects_to_string(&node.effects);
    if !effects.is_empty() {
        info.push(format!("Effects: {effects}"));
    }

    if let Some(constraints) = &node.constraints {
        info.push(format!(
            "Constraints: horizontal({}), vertical({})",
            constraints.horizontal, constraints.vertical
        ));
    }

    let children = node.children();
    if !children.is_empty() {
        info.push(format!("Children: {}", children.len()));
        for (index, child) in children.iter().enumerate() {
            info.push(format!(
                "  {}. {}: {} ({}×{}px)",
                index + 1,
                child.kind.label(),
                child.name,
                round_half_up(child.width),
                round_half_up(child.height)
            ));
        }
    }

    info.join("\n")
}
