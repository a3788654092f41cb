//! Formatting rules shared by every part of the report: paints, effects,
//! text styles and auto-layout summaries.
use crate::scene::types::{
    Effect, FrameProperties, LayoutMode, LineHeight, Paint, TextProperties,
};

/// Rounds half-way values towards positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Shortest decimal rendering of a raw attribute value (`8`, `1.5`).
pub fn number(value: f64) -> String {
    if value == 0.0 {
        // folds -0 into 0
        "0".to_string()
    } else {
        value.to_string()
    }
}

pub fn paint_to_string(paint: &Paint) -> String {
    match paint {
        Paint::Solid { color, opacity } => format!(
            "rgba({}, {}, {}, {})",
            round_half_up(color.r * 255.0),
            round_half_up(color.g * 255.0),
            round_half_up(color.b * 255.0),
            number(opacity.unwrap_or(1.0)),
        ),
        Paint::LinearGradient { stop_count } => format!("linear-gradient ({stop_count} stops)"),
        Paint::RadialGradient { stop_count } => format!("radial-gradient ({stop_count} stops)"),
        Paint::Image => "image-fill".to_string(),
        Paint::Other(kind) => kind.to_lowercase(),
    }
}

pub fn paints_to_string(paints: &[Paint]) -> String {
    paints.iter().map(paint_to_string).collect::<Vec<_>>().join(", ")
}

pub fn effect_to_string(effect: &Effect) -> String {
    match effect {
        Effect::DropShadow { offset, radius } => format!(
            "drop shadow ({}, {}, blur: {})",
            number(offset.x),
            number(offset.y),
            number(*radius)
        ),
        Effect::InnerShadow { offset, radius } => format!(
            "inner shadow ({}, {}, blur: {})",
            number(offset.x),
            number(offset.y),
            number(*radius)
        ),
        Effect::LayerBlur { radius } => format!("layer blur ({})", number(*radius)),
        Effect::BackgroundBlur { radius } => format!("background blur ({})", number(*radius)),
        Effect::Other(kind) => kind.to_lowercase(),
    }
}

/// Empty when there are no effects.
pub fn effects_to_string(effects: &[Effect]) -> String {
    effects.iter().map(effect_to_string).collect::<Vec<_>>().join(", ")
}

/// Comma-joined style summary; sub-fields the node does not report are left out.
pub fn text_style(text: &TextProperties, fills: Option<&[Paint]>) -> String {
    let mut styles = Vec::new();

    if let Some(font) = &text.font {
        styles.push(format!("font: {} {}", font.family, font.style));
    }
    if let Some(size) = text.font_size {
        styles.push(format!("size: {}px", number(size)));
    }
    match text.line_height {
        Some(LineHeight::Pixels(v)) => styles.push(format!("line height: {}px", number(v))),
        Some(LineHeight::Percent(v)) => styles.push(format!("line height: {}%", number(v))),
        Some(LineHeight::Auto) | None => {}
    }
    if let Some(align) = &text.align_horizontal {
        styles.push(format!("align: {}", align.to_lowercase()));
    }
    if let Some(first) = fills.and_then(|f| f.first()) {
        styles.push(format!("color: {}", paint_to_string(first)));
    }

    styles.join(", ")
}

/// `None` when the frame does not use auto layout.
pub fn auto_layout(frame: &FrameProperties) -> Option<String> {
    let direction = match frame.layout_mode {
        LayoutMode::None => return None,
        LayoutMode::Horizontal => "horizontal",
        LayoutMode::Vertical => "vertical",
    };
    let p = &frame.padding;
    Some(
        [
            format!("direction: {direction}"),
            format!("spacing: {}px", number(frame.item_spacing)),
            format!(
                "padding: {}px {}px {}px {}px",
                number(p.top),
                number(p.right),
                number(p.bottom),
                number(p.left)
            ),
            format!("align: {}, {}", frame.primary_axis_align, frame.counter_axis_align),
        ]
        .join(", "),
    )
}
