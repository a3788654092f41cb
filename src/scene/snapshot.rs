//! Boundary between the host tool's JSON node objects and the domain tree.
//!
//! The host hands over a selection as a JSON document. The document is an
//! owned tree, so it cannot contain cycles; conversion additionally rejects
//! nesting deeper than [`MAX_TREE_DEPTH`] so every recursive walk over the
//! resulting [`VisualElement`]s terminates within a bounded stack.
//!
//! Each node costs two JSON nesting levels (its object and its `children`
//! array), and serde_json refuses documents nested past 128 levels, so the
//! limit sits well below `128 / 2`.
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::{SelfCheckError, SelfCheckResult};
use crate::scene::types::{
    Constraints, Effect, ElementKind, FontName, FrameProperties, LayoutMode,
    LineHeight, Offset, Padding, Paint, Rgb, TextProperties, VisualElement,
};

pub const MAX_TREE_DEPTH: usize = 48;

/// A selection captured from the host, together with the active page name.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub page_name: String,
    pub selection: Vec<VisualElement>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> SelfCheckResult<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        let selection = raw
            .selection
            .into_iter()
            .map(|node| node.into_element(0))
            .collect::<SelfCheckResult<Vec<_>>>()?;
        tracing::debug!(page = %raw.page_name, elements = selection.len(), "snapshot parsed");
        Ok(Self {
            page_name: raw.page_name,
            selection,
        })
    }

    pub fn load(path: &Path) -> SelfCheckResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), page = %snapshot.page_name, "snapshot loaded");
        Ok(snapshot)
    }
}

// ── Raw host shapes ─────────────────────────────────────────────────────────

/// Accepts any JSON value and keeps it only if it has the expected shape.
/// The host reports per-range values (e.g. mixed font sizes) with a sentinel
/// of a different type; those become absent attributes.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Like [`lenient`], but for paint and effect lists: a non-array becomes
/// absent while the entries of an array are kept as raw values and parsed
/// one by one, so a single malformed entry cannot hide its siblings.
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(Some(items)),
        _ => Ok(None),
    }
}

fn entry_kind(value: &Value) -> String {
    value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN")
        .to_string()
}

fn paint_from_value(value: Value) -> Paint {
    let kind = entry_kind(&value);
    match serde_json::from_value::<RawPaint>(value) {
        Ok(raw) => raw.into_paint(),
        Err(e) => {
            tracing::debug!(%kind, error = %e, "malformed paint kept as its kind");
            Paint::Other(kind)
        }
    }
}

fn effect_from_value(value: Value) -> Effect {
    let kind = entry_kind(&value);
    match serde_json::from_value::<RawEffect>(value) {
        Ok(raw) => raw.into_effect(),
        Err(e) => {
            tracing::debug!(%kind, error = %e, "malformed effect kept as its kind");
            Effect::Other(kind)
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    page_name: String,
    #[serde(default)]
    selection: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default, deserialize_with = "lenient")]
    opacity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list")]
    fills: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_list")]
    strokes: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    stroke_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    corner_radius: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    constraints: Option<RawConstraints>,
    #[serde(default, deserialize_with = "lenient_list")]
    effects: Option<Vec<Value>>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,

    // TEXT
    #[serde(default)]
    characters: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    font_name: Option<RawFontName>,
    #[serde(default, deserialize_with = "lenient")]
    font_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    line_height: Option<RawLineHeight>,
    #[serde(default, deserialize_with = "lenient")]
    text_align_horizontal: Option<String>,

    // FRAME
    #[serde(default)]
    layout_mode: Option<String>,
    #[serde(default)]
    item_spacing: Option<f64>,
    #[serde(default)]
    padding_top: Option<f64>,
    #[serde(default)]
    padding_right: Option<f64>,
    #[serde(default)]
    padding_bottom: Option<f64>,
    #[serde(default)]
    padding_left: Option<f64>,
    #[serde(default)]
    primary_axis_align_items: Option<String>,
    #[serde(default)]
    counter_axis_align_items: Option<String>,
    #[serde(default)]
    clips_content: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawRgb {
    r: f64,
    g: f64,
    b: f64,
}

impl From<&RawRgb> for Rgb {
    fn from(raw: &RawRgb) -> Self {
        Rgb { r: raw.r, g: raw.g, b: raw.b }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPaint {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    color: Option<RawRgb>,
    #[serde(default)]
    opacity: Option<f64>,
    #[serde(default)]
    gradient_stops: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawOffset {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct RawEffect {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    offset: Option<RawOffset>,
    #[serde(default)]
    radius: f64,
}

#[derive(Debug, Deserialize)]
struct RawConstraints {
    horizontal: String,
    vertical: String,
}

#[derive(Debug, Deserialize)]
struct RawFontName {
    family: String,
    style: String,
}

#[derive(Debug, Deserialize)]
struct RawLineHeight {
    unit: String,
    #[serde(default)]
    value: Option<f64>,
}

// ── Conversion ──────────────────────────────────────────────────────────────

impl RawNode {
    fn into_element(self, depth: usize) -> SelfCheckResult<VisualElement> {
        if depth >= MAX_TREE_DEPTH {
            return Err(SelfCheckError::Snapshot(format!(
                "node '{}' is nested deeper than {MAX_TREE_DEPTH} levels",
                self.name
            )));
        }

        let kind = match self.kind.as_str() {
            "TEXT" => ElementKind::Text(TextProperties {
                characters: self.characters.unwrap_or_default(),
                font: self.font_name.map(|f| FontName {
                    family: f.family,
                    style: f.style,
                }),
                font_size: self.font_size,
                line_height: self.line_height.and_then(RawLineHeight::into_line_height),
                align_horizontal: self.text_align_horizontal,
            }),
            "FRAME" => ElementKind::Frame(FrameProperties {
                // Any mode other than NONE and HORIZONTAL stacks vertically.
                layout_mode: match self.layout_mode.as_deref() {
                    None | Some("NONE") => LayoutMode::None,
                    Some("HORIZONTAL") => LayoutMode::Horizontal,
                    Some(_) => LayoutMode::Vertical,
                },
                item_spacing: self.item_spacing.unwrap_or_default(),
                padding: Padding {
                    top: self.padding_top.unwrap_or_default(),
                    right: self.padding_right.unwrap_or_default(),
                    bottom: self.padding_bottom.unwrap_or_default(),
                    left: self.padding_left.unwrap_or_default(),
                },
                primary_axis_align: self.primary_axis_align_items.unwrap_or_else(|| "MIN".into()),
                counter_axis_align: self.counter_axis_align_items.unwrap_or_else(|| "MIN".into()),
                clips_content: self.clips_content.unwrap_or(false),
            }),
            other => ElementKind::plain(other),
        };

        let children = match self.children {
            Some(nodes) => Some(
                nodes
                    .into_iter()
                    .map(|child| child.into_element(depth + 1))
                    .collect::<SelfCheckResult<Vec<_>>>()?,
            ),
            None => None,
        };

        Ok(VisualElement {
            kind,
            name: self.name,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            visible: self.visible,
            opacity: self.opacity,
            fills: self.fills.map(|paints| paints.into_iter().map(paint_from_value).collect()),
            strokes: self.strokes.map(|paints| paints.into_iter().map(paint_from_value).collect()),
            stroke_weight: self.stroke_weight,
            corner_radius: self.corner_radius,
            constraints: self.constraints.map(|c| Constraints {
                horizontal: c.horizontal,
                vertical: c.vertical,
            }),
            effects: self
                .effects
                .unwrap_or_default()
                .into_iter()
                .map(effect_from_value)
                .collect(),
            children,
        })
    }
}

impl RawPaint {
    fn into_paint(self) -> Paint {
        match self.kind.as_str() {
            "SOLID" => match &self.color {
                Some(color) => Paint::Solid {
                    color: Rgb::from(color),
                    opacity: self.opacity,
                },
                None => Paint::Other(self.kind),
            },
            "GRADIENT_LINEAR" => Paint::LinearGradient {
                stop_count: self.gradient_stops.len(),
            },
            "GRADIENT_RADIAL" => Paint::RadialGradient {
                stop_count: self.gradient_stops.len(),
            },
            "IMAGE" => Paint::Image,
            _ => Paint::Other(self.kind),
        }
    }
}

impl RawEffect {
    fn into_effect(self) -> Effect {
        let offset = self
            .offset
            .map(|o| Offset { x: o.x, y: o.y })
            .unwrap_or(Offset { x: 0.0, y: 0.0 });
        match self.kind.as_str() {
            "DROP_SHADOW" => Effect::DropShadow { offset, radius: self.radius },
            "INNER_SHADOW" => Effect::InnerShadow { offset, radius: self.radius },
            "LAYER_BLUR" => Effect::LayerBlur { radius: self.radius },
            "BACKGROUND_BLUR" => Effect::BackgroundBlur { radius: self.radius },
            _ => Effect::Other(self.kind),
        }
    }
}

impl RawLineHeight {
    fn into_line_height(self) -> Option<LineHeight> {
        match (self.unit.as_str(), self.value) {
            ("PIXELS", Some(v)) => Some(LineHeight::Pixels(v)),
            ("PERCENT", Some(v)) => Some(LineHeight::Percent(v)),
            ("AUTO", _) => Some(LineHeight::Auto),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frame_with_text_child() {
        let snapshot = Snapshot::from_json(
            r#"{
                "pageName": "Checkout",
                "selection": [{
                    "type": "FRAME",
                    "name": "Card",
                    "x": 10, "y": 20, "width": 320, "height": 200,
                    "opacity": 1,
                    "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1}, "opacity": 1}],
                    "layoutMode": "VERTICAL",
                    "itemSpacing": 8,
                    "paddingTop": 16, "paddingRight": 12, "paddingBottom": 16, "paddingLeft": 12,
                    "primaryAxisAlignItems": "CENTER",
                    "counterAxisAlignItems": "MIN",
                    "clipsContent": true,
                    "constraints": {"horizontal": "MIN", "vertical": "MIN"},
                    "children": [{
                        "type": "TEXT",
                        "name": "Title",
                        "width": 100, "height": 20,
                        "characters": "Pay now",
                        "fontName": {"family": "Inter", "style": "Bold"},
                        "fontSize": 16,
                        "lineHeight": {"unit": "PIXELS", "value": 24},
                        "textAlignHorizontal": "LEFT"
                    }]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.page_name, "Checkout");
        let card = &snapshot.selection[0];
        let ElementKind::Frame(frame) = &card.kind else {
            panic!("expected frame, got {:?}", card.kind);
        };
        assert_eq!(frame.layout_mode, LayoutMode::Vertical);
        assert_eq!(frame.padding.right, 12.0);
        assert!(frame.clips_content);

        let title = &card.children()[0];
        let ElementKind::Text(text) = &title.kind else {
            panic!("expected text, got {:?}", title.kind);
        };
        assert_eq!(text.characters, "Pay now");
        assert_eq!(text.line_height, Some(LineHeight::Pixels(24.0)));
        assert!(title.visible);
    }

    #[test]
    fn mixed_values_become_absent() {
        let snapshot = Snapshot::from_json(
            r#"{"pageName": "P", "selection": [{
                "type": "TEXT", "name": "Label",
                "fontSize": "mixed",
                "fontName": "mixed",
                "fills": "mixed",
                "cornerRadius": "mixed"
            }]}"#,
        )
        .unwrap();
        let label = &snapshot.selection[0];
        assert!(label.fills.is_none());
        assert!(label.corner_radius.is_none());
        let ElementKind::Text(text) = &label.kind else {
            panic!("expected text");
        };
        assert!(text.font_size.is_none());
        assert!(text.font.is_none());
    }

    #[test]
    fn unknown_kinds_map_to_other_arms() {
        let snapshot = Snapshot::from_json(
            r#"{"pageName": "P", "selection": [{
                "type": "STICKY", "name": "Note",
                "fills": [{"type": "GRADIENT_ANGULAR", "gradientStops": []}, {"type": "VIDEO"}],
                "effects": [{"type": "NOISE", "radius": 2}]
            }]}"#,
        )
        .unwrap();
        let note = &snapshot.selection[0];
        assert_eq!(note.kind, ElementKind::Other("STICKY".into()));
        assert_eq!(
            note.fills.as_deref(),
            Some(&[Paint::Other("GRADIENT_ANGULAR".into()), Paint::Other("VIDEO".into())][..])
        );
        assert_eq!(note.effects, vec![Effect::Other("NOISE".into())]);
    }

    /// A chain of `wrappers` groups around a single leaf.
    fn nested(wrappers: usize) -> String {
        let mut json = String::from(r#"{"type": "GROUP", "name": "leaf"}"#);
        for i in 0..wrappers {
            json = format!(r#"{{"type": "GROUP", "name": "g{i}", "children": [{json}]}}"#);
        }
        format!(r#"{{"pageName": "P", "selection": [{json}]}}"#)
    }

    #[test]
    fn rejects_trees_deeper_than_the_limit() {
        let err = Snapshot::from_json(&nested(MAX_TREE_DEPTH)).unwrap_err();
        assert!(
            matches!(&err, SelfCheckError::Snapshot(msg) if msg.contains("leaf")),
            "expected a snapshot depth error, got {err:?}"
        );
    }

    #[test]
    fn accepts_trees_right_at_the_limit() {
        let snapshot = Snapshot::from_json(&nested(MAX_TREE_DEPTH - 1)).unwrap();
        let mut node = &snapshot.selection[0];
        let mut depth = 0;
        while let Some(child) = node.children().first() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, MAX_TREE_DEPTH - 1);
        assert_eq!(node.name, "leaf");
    }

    #[test]
    fn accepts_moderately_nested_trees() {
        let snapshot = Snapshot::from_json(&nested(10)).unwrap();
        assert_eq!(snapshot.selection[0].name, "g9");
    }

    #[test]
    fn malformed_paint_entry_keeps_its_siblings() {
        let snapshot = Snapshot::from_json(
            r#"{"pageName": "P", "selection": [{
                "type": "RECTANGLE", "name": "Swatch",
                "fills": [
                    {"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}, "opacity": 1},
                    {"type": "SOLID", "color": {"r": 1}},
                    {"type": "GRADIENT_LINEAR", "gradientStops": [{}, {}]}
                ],
                "effects": [
                    {"type": "DROP_SHADOW", "offset": {"x": 0}, "radius": 4},
                    {"type": "LAYER_BLUR", "radius": 2}
                ]
            }]}"#,
        )
        .unwrap();
        let swatch = &snapshot.selection[0];
        assert_eq!(
            swatch.fills.as_deref(),
            Some(
                &[
                    Paint::Solid {
                        color: Rgb { r: 1.0, g: 0.0, b: 0.0 },
                        opacity: Some(1.0),
                    },
                    Paint::Other("SOLID".into()),
                    Paint::LinearGradient { stop_count: 2 },
                ][..]
            )
        );
        assert_eq!(
            swatch.effects,
            vec![Effect::Other("DROP_SHADOW".into()), Effect::LayerBlur { radius: 2.0 }]
        );
    }

    #[test]
    fn unrecognised_layout_modes_stack_vertically() {
        let frame = |mode: &str| {
            let doc = format!(
                r#"{{"pageName": "P", "selection": [{{"type": "FRAME", "name": "F", "layoutMode": "{mode}"}}]}}"#
            );
            let snapshot = Snapshot::from_json(&doc).unwrap();
            match &snapshot.selection[0].kind {
                ElementKind::Frame(props) => props.layout_mode,
                other => panic!("expected frame, got {other:?}"),
            }
        };
        assert_eq!(frame("GRID"), LayoutMode::Vertical);
        assert_eq!(frame("HORIZONTAL"), LayoutMode::Horizontal);
        assert_eq!(frame("NONE"), LayoutMode::None);
    }

    #[test]
    fn empty_selection_parses() {
        let snapshot = Snapshot::from_json(r#"{"pageName": "Empty"}"#).unwrap();
        assert!(snapshot.selection.is_empty());
    }
}
