//! Deck description: slides as absolutely positioned shapes and text boxes.
//!
//! This is the value the builder produces and the PPTX writer consumes.
//! Coordinates and sizes are in inches, font sizes in points, colors are
//! uppercase `RRGGBB`.

use crate::theme::{FontPair, Palette};
use serde::{Deserialize, Serialize};

/// Slide width in inches (16:9).
pub const SLIDE_W: f64 = 10.0;

/// Slide height in inches (16:9).
pub const SLIDE_H: f64 = 5.625;

/// A complete deck ready to be written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub author: String,
    pub subject: String,

    /// Language tag applied to every text run, e.g. `en-US`.
    pub language: String,

    pub fonts: FontPair,

    /// Theme display name, written into the package theme part.
    pub theme_name: String,

    pub palette: Palette,

    /// Slide size in inches.
    pub width: f64,
    pub height: f64,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn new(title: impl Into<String>, fonts: FontPair) -> Self {
        Self {
            title: title.into(),
            author: String::new(),
            subject: String::new(),
            language: "en-US".to_string(),
            fonts,
            theme_name: "Theme".to_string(),
            palette: Palette::default(),
            width: SLIDE_W,
            height: SLIDE_H,
            slides: Vec::new(),
        }
    }

    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// All text on all slides, one entry per text box, in slide order.
    pub fn all_text(&self) -> Vec<String> {
        self.slides.iter().flat_map(Slide::texts).collect()
    }
}

/// Which layout a slide was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    Title,
    ExecutiveSummary,
    KeyFindings,
    SectionDivider,
    Analysis,
    Consensus,
    Debate,
    Sources,
    Gaps,
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub kind: SlideKind,

    /// Background fill.
    pub background: String,

    /// Elements in z-order (first is bottom-most).
    pub elements: Vec<Element>,
}

impl Slide {
    pub fn new(kind: SlideKind, background: impl Into<String>) -> Self {
        Self {
            kind,
            background: background.into(),
            elements: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.elements.push(Element::Shape(shape));
    }

    pub fn add_text(&mut self, text: TextBox) {
        self.elements.push(Element::Text(text));
    }

    /// Text of every text box on the slide, lists joined with newlines.
    pub fn texts(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text(t) => Some(t.content.joined()),
                Element::Shape(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Shape(Shape),
    Text(TextBox),
}

/// Position and size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w - 2.0 * dx, self.h - 2.0 * dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    RoundedRectangle,
    Oval,
}

/// Solid fill with optional transparency (0 = opaque, 100 = invisible).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub color: String,
    pub transparency: u8,
}

impl Fill {
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            transparency: 0,
        }
    }

    pub fn with_transparency(mut self, transparency: u8) -> Self {
        self.transparency = transparency.min(100);
        self
    }
}

/// Shape outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub color: String,

    /// Width in points.
    pub width: f64,

    pub transparency: u8,
}

impl Line {
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            width: 1.0,
            transparency: 0,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_transparency(mut self, transparency: u8) -> Self {
        self.transparency = transparency.min(100);
        self
    }
}

/// Outer drop shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: String,

    /// Blur radius in points.
    pub blur: f64,

    /// Offset distance in points.
    pub offset: f64,

    /// Direction in degrees.
    pub angle: f64,

    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: "000000".to_string(),
            blur: 8.0,
            offset: 3.0,
            angle: 135.0,
            opacity: 0.14,
        }
    }
}

/// A filled geometric shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub rect: Rect,
    pub fill: Fill,
    pub line: Line,

    /// Clockwise rotation in degrees.
    pub rotation: Option<f64>,

    pub shadow: Option<Shadow>,
}

impl Shape {
    /// A shape whose outline matches its fill.
    pub fn filled(kind: ShapeKind, rect: Rect, color: &str) -> Self {
        Self {
            kind,
            rect,
            fill: Fill::solid(color),
            line: Line::solid(color),
            rotation: None,
            shadow: None,
        }
    }

    pub fn with_line(mut self, line: Line) -> Self {
        self.line = line;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// What a text box holds. Plain text is split into paragraphs at newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum TextContent {
    Plain(String),
    Bullets(Vec<String>),
    Numbered(Vec<String>),
}

impl TextContent {
    /// One entry per paragraph.
    pub fn paragraphs(&self) -> Vec<&str> {
        match self {
            TextContent::Plain(text) => text.split('\n').collect(),
            TextContent::Bullets(items) | TextContent::Numbered(items) => {
                items.iter().map(String::as_str).collect()
            }
        }
    }

    pub fn joined(&self) -> String {
        self.paragraphs().join("\n")
    }
}

/// Character and paragraph formatting shared by all runs of a text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_face: String,

    /// Size in points.
    pub font_size: f64,

    pub color: String,
    pub bold: bool,
    pub align: Align,

    /// Line spacing as a multiple of single spacing.
    pub line_spacing: Option<f64>,

    /// Space after each paragraph, in points.
    pub paragraph_spacing: Option<f64>,
}

impl TextStyle {
    pub fn new(font_face: impl Into<String>, font_size: f64, color: impl Into<String>) -> Self {
        Self {
            font_face: font_face.into(),
            font_size,
            color: color.into(),
            bold: false,
            align: Align::Left,
            line_spacing: None,
            paragraph_spacing: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn line_spacing(mut self, multiple: f64) -> Self {
        self.line_spacing = Some(multiple);
        self
    }

    pub fn paragraph_spacing(mut self, points: f64) -> Self {
        self.paragraph_spacing = Some(points);
        self
    }
}

/// A text frame with zero internal margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub rect: Rect,
    pub content: TextContent,
    pub style: TextStyle,
}

impl TextBox {
    pub fn new(rect: Rect, content: TextContent, style: TextStyle) -> Self {
        Self {
            rect,
            content,
            style,
        }
    }

    pub fn plain(rect: Rect, text: impl Into<String>, style: TextStyle) -> Self {
        Self::new(rect, TextContent::Plain(text.into()), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_inset() {
        let r = Rect::new(1.0, 2.0, 4.0, 3.0).inset(0.5, 0.25);
        assert_eq!(r, Rect::new(1.5, 2.25, 3.0, 2.5));
    }

    #[test]
    fn test_text_content_paragraphs() {
        assert_eq!(TextContent::Plain("a\nb".into()).paragraphs(), vec!["a", "b"]);
        assert_eq!(TextContent::Plain(String::new()).paragraphs(), vec![""]);
        assert_eq!(
            TextContent::Numbered(vec!["x".into(), "y".into()]).joined(),
            "x\ny"
        );
    }

    #[test]
    fn test_slide_texts_skip_shapes() {
        let mut slide = Slide::new(SlideKind::Consensus, "FFFFFF");
        slide.add_shape(Shape::filled(
            ShapeKind::Oval,
            Rect::new(0.0, 0.0, 1.0, 1.0),
            "F4A900",
        ));
        slide.add_text(TextBox::plain(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            "hello",
            TextStyle::new("Segoe UI", 12.0, "000000"),
        ));
        assert_eq!(slide.texts(), vec!["hello"]);
    }

    #[test]
    fn test_fill_transparency_is_capped() {
        assert_eq!(Fill::solid("FFFFFF").with_transparency(250).transparency, 100);
    }
}
