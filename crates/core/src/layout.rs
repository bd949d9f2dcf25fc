//! Slide chrome and reusable layout pieces.
//!
//! Every slide shares the same furniture: a background, a thin accent stripe
//! down the left edge, a five-dot motif at the top right and, on content
//! slides, a footer line with the page number.

use crate::color::{mix, BLACK, WHITE};
use crate::deck::{
    Align, Fill, Line, Rect, Shadow, Shape, ShapeKind, Slide, SlideKind, TextBox, TextContent,
    TextStyle, SLIDE_H, SLIDE_W,
};
use crate::theme::{FontPair, Palette};

/// Outer margin used by cards on content slides.
pub const MARGIN: f64 = 0.65;

/// Left edge of headings.
const HEADING_X: f64 = 0.55;

/// Width available to headings.
const HEADING_W: f64 = SLIDE_W - 1.2;

const STRIPE_W: f64 = 0.18;

/// Motif dots: offset from the right edge, top, and which accent.
const MOTIF: [(f64, f64, usize); 5] = [
    (1.55, 0.45, 1),
    (1.15, 0.40, 0),
    (0.78, 0.50, 1),
    (1.30, 0.68, 0),
    (0.92, 0.72, 1),
];

/// How a slide's chrome is drawn.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    pub dark: bool,
    pub hide_footer: bool,
    pub footer: String,
    pub page: Option<usize>,
}

/// Card appearance overrides.
#[derive(Debug, Clone, Default)]
pub struct CardStyle {
    pub fill: Option<String>,
    pub line: Option<String>,
    pub shadow: bool,
}

impl CardStyle {
    pub fn shadowed() -> Self {
        Self {
            shadow: true,
            ..Self::default()
        }
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn line(mut self, color: impl Into<String>) -> Self {
        self.line = Some(color.into());
        self
    }
}

/// Draws layout pieces in the deck's palette and fonts.
#[derive(Debug, Clone)]
pub struct Painter {
    pub palette: Palette,
    pub fonts: FontPair,
}

impl Painter {
    pub fn new(palette: Palette, fonts: FontPair) -> Self {
        Self { palette, fonts }
    }

    /// Body text style at `size` in `color`.
    pub fn body(&self, size: f64, color: &str) -> TextStyle {
        TextStyle::new(&self.fonts.body, size, color)
    }

    /// Header text style at `size` in `color`.
    pub fn header(&self, size: f64, color: &str) -> TextStyle {
        TextStyle::new(&self.fonts.header, size, color)
    }

    /// A text color lightened toward white by `t`.
    pub fn muted(&self, t: f64) -> String {
        mix(&self.palette.text, WHITE, t)
    }

    /// New slide with background, stripe, motif and footer.
    pub fn slide(&self, kind: SlideKind, chrome: &Chrome) -> Slide {
        let p = &self.palette;
        let mut slide = Slide::new(kind, if chrome.dark { &p.dark } else { &p.background });

        let stripe = if chrome.dark { &p.accent1 } else { &p.accent2 };
        slide.add_shape(Shape::filled(
            ShapeKind::Rectangle,
            Rect::new(0.0, 0.0, STRIPE_W, SLIDE_H),
            stripe,
        ));

        self.motif(&mut slide);

        if !chrome.hide_footer {
            let (footer_color, page_color) = if chrome.dark {
                (mix(&p.background, WHITE, 0.35), mix(&p.background, WHITE, 0.30))
            } else {
                (self.muted(0.25), self.muted(0.25))
            };

            slide.add_text(TextBox::plain(
                Rect::new(0.35, SLIDE_H - 0.42, 6.5, 0.3),
                chrome.footer.clone(),
                self.body(10.0, &footer_color),
            ));
            slide.add_text(TextBox::plain(
                Rect::new(SLIDE_W - 0.95, SLIDE_H - 0.45, 0.6, 0.3),
                chrome.page.map(|n| n.to_string()).unwrap_or_default(),
                self.body(10.0, &page_color).align(Align::Right),
            ));
        }

        slide
    }

    fn motif(&self, slide: &mut Slide) {
        for (right, y, accent) in MOTIF {
            let color = self.palette.alternate(accent);
            slide.add_shape(
                Shape::filled(
                    ShapeKind::Oval,
                    Rect::new(SLIDE_W - right, y, 0.22, 0.14),
                    color,
                )
                .with_rotation(18.0),
            );
        }
    }

    /// Large title plus a translucent subtitle band (title slide).
    pub fn title_block(&self, slide: &mut Slide, title: &str, subtitle: &str) {
        let p = &self.palette;
        slide.add_text(TextBox::plain(
            Rect::new(HEADING_X, 1.5, HEADING_W, 1.4),
            title,
            self.header(46.0, &p.background_text).bold(),
        ));

        slide.add_shape(
            Shape::filled(ShapeKind::Rectangle, Rect::new(0.55, 3.25, 6.7, 0.55), &p.accent2)
                .with_fill(Fill::solid(&p.accent2).with_transparency(12))
                .with_line(Line::solid(&p.accent2).with_transparency(100)),
        );

        slide.add_text(TextBox::plain(
            Rect::new(0.75, 3.33, 6.3, 0.4),
            subtitle,
            self.body(16.0, &p.background_text),
        ));
    }

    /// Slide heading with an optional subtitle line.
    pub fn heading(&self, slide: &mut Slide, heading: &str, subtitle: Option<&str>) {
        slide.add_text(TextBox::plain(
            Rect::new(HEADING_X, 0.62, HEADING_W, 0.6),
            heading,
            self.header(34.0, &self.palette.text).bold(),
        ));

        if let Some(subtitle) = subtitle.filter(|s| !s.is_empty()) {
            slide.add_text(TextBox::plain(
                Rect::new(HEADING_X, 1.2, HEADING_W, 0.4),
                subtitle,
                self.body(14.0, &self.muted(0.35)),
            ));
        }
    }

    /// Big heading used on dark divider-style slides.
    pub fn display_heading(&self, slide: &mut Slide, text: &str, rect: Rect, size: f64) {
        slide.add_text(TextBox::plain(
            rect,
            text,
            self.header(size, &self.palette.background_text).bold(),
        ));
    }

    /// Rectangular panel.
    pub fn card(&self, slide: &mut Slide, rect: Rect, style: CardStyle) {
        let fill = style.fill.unwrap_or_else(|| self.palette.card.clone());
        let line = style.line.unwrap_or_else(|| self.muted(0.80));
        let mut shape = Shape::filled(ShapeKind::Rectangle, rect, &fill)
            .with_line(Line::solid(line).with_width(0.7));
        if style.shadow {
            shape = shape.with_shadow(Shadow::default());
        }
        slide.add_shape(shape);
    }

    /// Bulleted list in body text.
    pub fn bullets(&self, slide: &mut Slide, items: Vec<String>, rect: Rect) {
        slide.add_text(TextBox::new(
            rect,
            TextContent::Bullets(items),
            self.body(16.0, &self.palette.text).paragraph_spacing(6.0),
        ));
    }

    /// Filled badge with a centered label (numbers on cards and sources).
    #[allow(clippy::too_many_arguments)]
    pub fn badge(
        &self,
        slide: &mut Slide,
        kind: ShapeKind,
        rect: Rect,
        color: &str,
        label: &str,
        label_rect: Rect,
        size: f64,
    ) {
        slide.add_shape(Shape::filled(kind, rect, color));
        slide.add_text(TextBox::plain(
            label_rect,
            label,
            self.header(size, &self.palette.background_text)
                .align(Align::Center),
        ));
    }

    /// Darkened background text for dark slides.
    pub fn shade_background_text(&self, t: f64) -> String {
        mix(&self.palette.background_text, BLACK, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Element;

    fn painter() -> Painter {
        Painter::new(Palette::default(), FontPair::default())
    }

    #[test]
    fn test_light_chrome() {
        let painter = painter();
        let chrome = Chrome {
            footer: "Deep Research • 2025-12-01".into(),
            page: Some(3),
            ..Chrome::default()
        };
        let slide = painter.slide(SlideKind::Consensus, &chrome);

        assert_eq!(slide.background, painter.palette.background);
        // stripe + 5 motif dots + footer + page number
        assert_eq!(slide.elements.len(), 8);
        match &slide.elements[0] {
            Element::Shape(stripe) => assert_eq!(stripe.fill.color, painter.palette.accent2),
            other => panic!("expected stripe, got {other:?}"),
        }
        assert_eq!(slide.texts(), vec!["Deep Research • 2025-12-01", "3"]);
    }

    #[test]
    fn test_dark_chrome_without_footer() {
        let painter = painter();
        let chrome = Chrome {
            dark: true,
            hide_footer: true,
            ..Chrome::default()
        };
        let slide = painter.slide(SlideKind::Title, &chrome);
        assert_eq!(slide.background, painter.palette.dark);
        assert_eq!(slide.elements.len(), 6);
        assert!(slide.texts().is_empty());
    }

    #[test]
    fn test_heading_skips_empty_subtitle() {
        let painter = painter();
        let mut slide = Slide::new(SlideKind::Debate, "FFFFFF");
        painter.heading(&mut slide, "Areas of Debate", Some(""));
        painter.heading(&mut slide, "Again", None);
        assert_eq!(slide.elements.len(), 2);
    }

    #[test]
    fn test_card_defaults() {
        let painter = painter();
        let mut slide = Slide::new(SlideKind::Debate, "FFFFFF");
        painter.card(&mut slide, Rect::new(0.0, 0.0, 1.0, 1.0), CardStyle::shadowed());
        match &slide.elements[0] {
            Element::Shape(card) => {
                assert_eq!(card.fill.color, painter.palette.card);
                assert_eq!(card.line.width, 0.7);
                assert!(card.shadow.is_some());
            }
            other => panic!("expected card, got {other:?}"),
        }
    }
}
