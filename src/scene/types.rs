/// Node kind as reported by the host tool. Text and frame nodes carry the
/// attributes only they expose.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text(TextProperties),
    Frame(FrameProperties),
    Group,
    Component,
    ComponentSet,
    Instance,
    Section,
    BooleanOperation,
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Line,
    Vector,
    Slice,
    /// Host kinds not modeled here, kept verbatim.
    Other(String),
}

impl ElementKind {
    /// Upper-case label used in report headers, e.g. `FRAME`.
    pub fn label(&self) -> &str {
        match self {
            ElementKind::Text(_) => "TEXT",
            ElementKind::Frame(_) => "FRAME",
            ElementKind::Group => "GROUP",
            ElementKind::Component => "COMPONENT",
            ElementKind::ComponentSet => "COMPONENT_SET",
            ElementKind::Instance => "INSTANCE",
            ElementKind::Section => "SECTION",
            ElementKind::BooleanOperation => "BOOLEAN_OPERATION",
            ElementKind::Rectangle => "RECTANGLE",
            ElementKind::Ellipse => "ELLIPSE",
            ElementKind::Polygon => "POLYGON",
            ElementKind::Star => "STAR",
            ElementKind::Line => "LINE",
            ElementKind::Vector => "VECTOR",
            ElementKind::Slice => "SLICE",
            ElementKind::Other(raw) => raw.as_str(),
        }
    }

    /// Maps a host kind label onto a plain (attribute-less) kind.
    /// `TEXT` and `FRAME` need their properties and are built by the caller.
    pub fn plain(label: &str) -> Self {
        match label {
            "GROUP" => ElementKind::Group,
            "COMPONENT" => ElementKind::Component,
            "COMPONENT_SET" => ElementKind::ComponentSet,
            "INSTANCE" => ElementKind::Instance,
            "SECTION" => ElementKind::Section,
            "BOOLEAN_OPERATION" => ElementKind::BooleanOperation,
            "RECTANGLE" => ElementKind::Rectangle,
            "ELLIPSE" => ElementKind::Ellipse,
            "POLYGON" => ElementKind::Polygon,
            "STAR" => ElementKind::Star,
            "LINE" => ElementKind::Line,
            "VECTOR" => ElementKind::Vector,
            "SLICE" => ElementKind::Slice,
            other => ElementKind::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualElement {
    pub kind: ElementKind,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
    /// `None` for kinds that have no opacity (e.g. slices).
    pub opacity: Option<f64>,
    /// `None` when the node has no fills or they are mixed.
    pub fills: Option<Vec<Paint>>,
    pub strokes: Option<Vec<Paint>>,
    pub stroke_weight: Option<f64>,
    pub corner_radius: Option<f64>,
    pub constraints: Option<Constraints>,
    pub effects: Vec<Effect>,
    /// `None` for leaf kinds; `Some(vec![])` for empty containers.
    pub children: Option<Vec<VisualElement>>,
}

impl VisualElement {
    /// A visible, fully opaque element with no paints, effects or children.
    pub fn new(kind: ElementKind, name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            kind,
            name: name.into(),
            x: 0.0,
            y: 0.0,
            width,
            height,
            visible: true,
            opacity: Some(1.0),
            fills: None,
            strokes: None,
            stroke_weight: None,
            corner_radius: None,
            constraints: None,
            effects: Vec::new(),
            children: None,
        }
    }

    pub fn children(&self) -> &[VisualElement] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn with_children(mut self, children: Vec<VisualElement>) -> Self {
        self.children = Some(children);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextProperties {
    pub characters: String,
    pub font: Option<FontName>,
    pub font_size: Option<f64>,
    pub line_height: Option<LineHeight>,
    /// Host alignment label, e.g. `LEFT`.
    pub align_horizontal: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineHeight {
    Pixels(f64),
    Percent(f64),
    Auto,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameProperties {
    pub layout_mode: LayoutMode,
    pub item_spacing: f64,
    pub padding: Padding,
    pub primary_axis_align: String,
    pub counter_axis_align: String,
    pub clips_content: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
    pub horizontal: String,
    pub vertical: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid { color: Rgb, opacity: Option<f64> },
    LinearGradient { stop_count: usize },
    RadialGradient { stop_count: usize },
    Image,
    Other(String),
}

impl Paint {
    pub fn solid(r: f64, g: f64, b: f64) -> Self {
        Paint::Solid { color: Rgb { r, g, b }, opacity: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    DropShadow { offset: Offset, radius: f64 },
    InnerShadow { offset: Offset, radius: f64 },
    LayerBlur { radius: f64 },
    BackgroundBlur { radius: f64 },
    Other(String),
}
