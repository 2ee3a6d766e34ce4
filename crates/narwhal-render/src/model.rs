use narwhal_core::ChartKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectPrimitive {
    pub class: &'static str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Corner radius; `0` draws square corners.
    pub rx: f64,
    /// `None` leaves the rect unfilled (outline only).
    pub fill: Option<String>,
    pub stroke: Option<Stroke>,
}

impl RectPrimitive {
    pub fn new(class: &'static str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            class,
            x,
            y,
            width,
            height,
            rx: 0.0,
            fill: None,
            stroke: None,
        }
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn rounded(mut self, rx: f64) -> Self {
        self.rx = rx;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CirclePrimitive {
    pub class: &'static str,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub stroke: Option<Stroke>,
}

/// A pie slice: the region between the center and the arc from `start_angle` to `end_angle`.
///
/// Angles are in degrees, `0` at 12 o'clock, increasing clockwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcPrimitive {
    pub class: &'static str,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: String,
    pub stroke: Option<Stroke>,
}

impl ArcPrimitive {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePrimitive {
    pub class: &'static str,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
    /// Draw an arrowhead at `(x2, y2)`.
    pub arrow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrimitive {
    pub class: &'static str,
    pub x: f64,
    /// Baseline position.
    pub y: f64,
    pub content: String,
    pub anchor: TextAnchor,
    pub font_size: f64,
    pub font_weight: Option<u16>,
    pub fill: String,
}

impl TextPrimitive {
    pub fn new(
        class: &'static str,
        x: f64,
        y: f64,
        content: impl Into<String>,
        font_size: f64,
        fill: impl Into<String>,
    ) -> Self {
        Self {
            class,
            x,
            y,
            content: content.into(),
            anchor: TextAnchor::Start,
            font_size,
            font_weight: None,
            fill: fill.into(),
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.font_weight = Some(weight);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    PathArc(ArcPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn class(&self) -> &'static str {
        match self {
            Primitive::Rect(p) => p.class,
            Primitive::Circle(p) => p.class,
            Primitive::PathArc(p) => p.class,
            Primitive::Line(p) => p.class,
            Primitive::Text(p) => p.class,
        }
    }

    pub fn as_rect(&self) -> Option<&RectPrimitive> {
        match self {
            Primitive::Rect(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_arc(&self) -> Option<&ArcPrimitive> {
        match self {
            Primitive::PathArc(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&CirclePrimitive> {
        match self {
            Primitive::Circle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LinePrimitive> {
        match self {
            Primitive::Line(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match self {
            Primitive::Text(p) => Some(p),
            _ => None,
        }
    }
}

impl From<RectPrimitive> for Primitive {
    fn from(value: RectPrimitive) -> Self {
        Primitive::Rect(value)
    }
}

impl From<CirclePrimitive> for Primitive {
    fn from(value: CirclePrimitive) -> Self {
        Primitive::Circle(value)
    }
}

impl From<ArcPrimitive> for Primitive {
    fn from(value: ArcPrimitive) -> Self {
        Primitive::PathArc(value)
    }
}

impl From<LinePrimitive> for Primitive {
    fn from(value: LinePrimitive) -> Self {
        Primitive::Line(value)
    }
}

impl From<TextPrimitive> for Primitive {
    fn from(value: TextPrimitive) -> Self {
        Primitive::Text(value)
    }
}

/// Output of a layout engine before the chart chrome (background, title) is added.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBody {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

/// An ordered primitive list plus its declared viewport. Later primitives paint over earlier
/// ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    kind: ChartKind,
    title: String,
    width: f64,
    height: f64,
    font_family: String,
    primitives: Vec<Primitive>,
}

impl RenderedDocument {
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        viewport: (f64, f64),
        font_family: impl Into<String>,
        primitives: Vec<Primitive>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            width: viewport.0,
            height: viewport.1,
            font_family: font_family.into(),
            primitives,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn by_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Primitive> + 'a {
        self.primitives.iter().filter(move |p| p.class() == class)
    }
}
