//! Deck builder: maps a parsed report onto the fixed slide sequence.
//!
//! The sequence is title, executive summary, key findings, a section
//! divider, one slide per analysis slot, consensus, debate, sources and
//! gaps. With the default five analysis slots that is thirteen slides, no
//! matter how much or how little the report contains.

use crate::color::{mix, WHITE};
use crate::deck::{
    Align, Deck, Line, Rect, Shape, ShapeKind, Slide, SlideKind, TextBox, TextContent, SLIDE_H,
    SLIDE_W,
};
use crate::document::ResearchDocument;
use crate::layout::{CardStyle, Chrome, Painter, MARGIN};
use crate::markdown::{split_intro_and_bullets, strip_md};
use crate::options::{Callout, DeckOptions};
use crate::theme::{FontPair, Palette, Theme};
use crate::types::Section;

/// Most key findings shown in the grid.
pub const MAX_KEY_FINDINGS: usize = 4;

/// Most sources listed on the sources slide.
pub const MAX_SOURCES: usize = 6;

/// Most tags in the executive summary's glance column.
pub const MAX_GLANCE_TAGS: usize = 5;

/// Suffixes removed from the report title on the title slide.
const TITLE_SUFFIXES: [&str; 2] = ["（Deep Research）", "(Deep Research)"];

/// Top-left corners of the 2x2 key findings grid.
const FINDING_GRID: [(f64, f64); MAX_KEY_FINDINGS] =
    [(MARGIN, 1.75), (5.35, 1.75), (MARGIN, 3.55), (5.35, 3.55)];

/// Build a deck from report text and theme text.
///
/// Pure: no I/O. `theme_id` only appears in the closing credit line.
pub fn build_deck(document: &str, theme: &str, theme_id: &str, options: &DeckOptions) -> Deck {
    let doc = ResearchDocument::parse(document);
    let theme = Theme::parse(theme);
    DeckBuilder::new(&theme, theme_id, options).build(&doc)
}

/// Lays out one report with one theme.
pub struct DeckBuilder<'a> {
    painter: Painter,
    theme: &'a Theme,
    theme_id: &'a str,
    options: &'a DeckOptions,
}

impl<'a> DeckBuilder<'a> {
    pub fn new(theme: &'a Theme, theme_id: &'a str, options: &'a DeckOptions) -> Self {
        Self {
            painter: Painter::new(Palette::from_theme(theme), FontPair::for_theme(&theme.fonts)),
            theme,
            theme_id,
            options,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.painter.palette
    }

    /// Build every slide in order.
    pub fn build(&self, doc: &ResearchDocument) -> Deck {
        let mut deck = Deck::new(doc.title.clone(), self.painter.fonts.clone());
        deck.author = self.options.author.clone();
        deck.subject = format!("{} ({})", display_title(&doc.title), self.options.footer_label);
        deck.language = self.options.language.clone();
        deck.theme_name = self.theme.name.clone();
        deck.palette = self.painter.palette.clone();

        let footer = format!("{} • {}", self.options.footer_label, doc.date)
            .trim()
            .trim_end_matches('•')
            .trim()
            .to_string();
        let mut pages = PageCounter::new(footer);

        deck.add_slide(self.title_slide(doc));
        deck.add_slide(self.summary_slide(doc, pages.next()));
        deck.add_slide(self.key_findings_slide(doc, pages.next()));
        deck.add_slide(self.divider_slide(doc, pages.next()));

        if doc.analyses.len() > self.options.analysis_slots {
            log::debug!(
                "Report has {} analyses; only the first {} get slides",
                doc.analyses.len(),
                self.options.analysis_slots
            );
        }
        for slot in 0..self.options.analysis_slots {
            let slide = match doc.analyses.get(slot) {
                Some(analysis) => self.analysis_slide(analysis, pages.next()),
                None => self.placeholder_analysis_slide(slot, pages.next()),
            };
            deck.add_slide(slide);
        }

        deck.add_slide(self.list_slide(
            SlideKind::Consensus,
            "Areas of Consensus",
            &self.options.captions.consensus,
            &doc.consensus,
            pages.next(),
        ));
        deck.add_slide(self.list_slide(
            SlideKind::Debate,
            "Areas of Debate",
            &self.options.captions.debate,
            &doc.debate,
            pages.next(),
        ));
        deck.add_slide(self.sources_slide(doc, pages.next()));
        deck.add_slide(self.gaps_slide(doc, pages.next()));

        log::debug!("Built {} slides", deck.slides.len());
        deck
    }

    fn title_slide(&self, doc: &ResearchDocument) -> Slide {
        let chrome = Chrome {
            dark: true,
            hide_footer: true,
            ..Chrome::default()
        };
        let mut slide = self.painter.slide(SlideKind::Title, &chrome);

        let mut parts = Vec::new();
        if !doc.date.is_empty() {
            parts.push(format!("Generated {}", doc.date));
        }
        if let Some(tagline) = &self.options.tagline {
            parts.push(tagline.clone());
        }
        self.painter
            .title_block(&mut slide, &display_title(&doc.title), &parts.join("  ·  "));
        slide
    }

    fn summary_slide(&self, doc: &ResearchDocument, chrome: Chrome) -> Slide {
        let p = self.palette();
        let captions = &self.options.captions;
        let mut slide = self.painter.slide(SlideKind::ExecutiveSummary, &chrome);
        self.painter
            .heading(&mut slide, "Executive Summary", captions.summary.as_deref());

        let card = Rect::new(MARGIN, 1.75, 6.3, 3.2);
        self.painter.card(&mut slide, card, CardStyle::shadowed());
        let summary = if doc.executive_summary.is_empty() {
            captions.summary_fallback.as_str()
        } else {
            doc.executive_summary.as_str()
        };
        slide.add_text(TextBox::plain(
            card.inset(0.35, 0.2),
            summary,
            self.painter.body(16.0, &p.text).line_spacing(1.1),
        ));

        self.painter.card(
            &mut slide,
            Rect::new(7.2, 1.75, 2.15, 3.2),
            CardStyle::shadowed().fill(mix(&p.card, &p.accent1, 0.06)),
        );
        slide.add_text(TextBox::plain(
            Rect::new(7.42, 1.95, 1.75, 0.35),
            captions.glance_heading.as_str(),
            self.painter.header(16.0, &p.text).bold(),
        ));

        let tags = doc
            .key_findings
            .iter()
            .filter_map(|f| f.title.as_deref())
            .take(MAX_GLANCE_TAGS);
        let mut y = 2.38;
        for (i, tag) in tags.enumerate() {
            let accent = p.alternate(i);
            slide.add_shape(
                Shape::filled(
                    ShapeKind::RoundedRectangle,
                    Rect::new(7.42, y, 1.75, 0.42),
                    &mix(accent, WHITE, 0.45),
                )
                .with_line(Line::solid(mix(accent, WHITE, 0.10))),
            );
            slide.add_text(TextBox::plain(
                Rect::new(7.42, y + 0.08, 1.75, 0.3),
                strip_md(tag),
                self.painter.body(13.0, &p.text).align(Align::Center),
            ));
            y += 0.55;
        }
        slide
    }

    fn key_findings_slide(&self, doc: &ResearchDocument, chrome: Chrome) -> Slide {
        let p = self.palette();
        let mut slide = self.painter.slide(SlideKind::KeyFindings, &chrome);

        let titles: Vec<String> = doc
            .key_findings
            .iter()
            .take(MAX_KEY_FINDINGS)
            .filter_map(|f| f.title.as_deref().map(strip_md))
            .collect();
        let derived = (!titles.is_empty()).then(|| titles.join(" · "));
        let subtitle = self.options.captions.key_findings.clone().or(derived);
        self.painter
            .heading(&mut slide, "Key Findings", subtitle.as_deref());

        if doc.key_findings.len() > MAX_KEY_FINDINGS {
            log::debug!(
                "Dropping {} key findings beyond the first {MAX_KEY_FINDINGS}",
                doc.key_findings.len() - MAX_KEY_FINDINGS
            );
        }

        for (i, (finding, (x, y))) in doc.key_findings.iter().zip(FINDING_GRID).enumerate() {
            self.painter
                .card(&mut slide, Rect::new(x, y, 4.0, 1.55), CardStyle::shadowed());

            self.painter.badge(
                &mut slide,
                ShapeKind::Oval,
                Rect::new(x + 0.25, y + 0.28, 0.55, 0.55),
                p.alternate(i),
                &(i + 1).to_string(),
                Rect::new(x + 0.25, y + 0.34, 0.55, 0.45),
                18.0,
            );

            let title = finding
                .title
                .as_deref()
                .map(strip_md)
                .unwrap_or_else(|| format!("Finding {}", i + 1));
            slide.add_text(TextBox::plain(
                Rect::new(x + 0.92, y + 0.25, 2.95, 0.4),
                title,
                self.painter.header(17.0, &p.text).bold(),
            ));
            slide.add_text(TextBox::plain(
                Rect::new(x + 0.92, y + 0.68, 2.95, 0.95),
                strip_md(&finding.body),
                self.painter.body(13.0, &self.painter.muted(0.20)),
            ));
        }
        slide
    }

    fn divider_slide(&self, doc: &ResearchDocument, chrome: Chrome) -> Slide {
        let chrome = Chrome { dark: true, ..chrome };
        let mut slide = self.painter.slide(SlideKind::SectionDivider, &chrome);

        self.painter.display_heading(
            &mut slide,
            "Detailed Analysis",
            Rect::new(0.55, 2.05, SLIDE_W - 1.2, 0.8),
            42.0,
        );

        let shown: Vec<&str> = doc
            .analyses
            .iter()
            .take(self.options.analysis_slots)
            .map(|a| a.title.as_str())
            .collect();
        let caption = self.options.captions.divider.clone().unwrap_or_else(|| {
            if shown.is_empty() {
                String::new()
            } else {
                format!("{} threads: {}.", shown.len(), shown.join(", "))
            }
        });
        slide.add_text(TextBox::plain(
            Rect::new(0.55, 2.95, 8.5, 0.5),
            caption,
            self.painter
                .body(16.0, &self.painter.shade_background_text(0.05)),
        ));
        slide
    }

    fn analysis_slide(&self, analysis: &Section, chrome: Chrome) -> Slide {
        let callout = self.options.callout_for(analysis);
        let split = split_intro_and_bullets(&analysis.body);
        self.analysis_layout(
            &analysis.title,
            &strip_md(&split.intro),
            split.bullets,
            &callout,
            chrome,
        )
    }

    fn placeholder_analysis_slide(&self, slot: usize, chrome: Chrome) -> Slide {
        log::debug!("No analysis for slot {}; rendering placeholder", slot + 1);
        let callout = Callout::new("Key points");
        self.analysis_layout(
            &format!("Analysis {}", slot + 1),
            "No analysis was provided for this slot.",
            Vec::new(),
            &callout,
            chrome,
        )
    }

    fn analysis_layout(
        &self,
        title: &str,
        intro: &str,
        bullets: Vec<String>,
        callout: &Callout,
        chrome: Chrome,
    ) -> Slide {
        let p = self.palette();
        let mut slide = self.painter.slide(SlideKind::Analysis, &chrome);
        self.painter
            .heading(&mut slide, title, callout.caption.as_deref());

        let card = Rect::new(MARGIN, 1.8, 6.0, 3.25);
        self.painter.card(&mut slide, card, CardStyle::shadowed());
        let intro_style = self.painter.body(15.0, &p.text).line_spacing(1.12);
        if bullets.is_empty() {
            slide.add_text(TextBox::plain(
                card.inset(0.35, 0.22),
                intro,
                intro_style,
            ));
        } else {
            slide.add_text(TextBox::plain(
                Rect::new(MARGIN + 0.35, 2.02, 5.3, 1.1),
                intro,
                intro_style,
            ));
            self.painter.bullets(
                &mut slide,
                bullets
                    .iter()
                    .map(|b| strip_md(b))
                    .collect(),
                Rect::new(MARGIN + 0.45, 3.06, 5.1, 2.0),
            );
        }

        self.painter.card(
            &mut slide,
            Rect::new(6.85, 1.8, 2.5, 3.25),
            CardStyle::shadowed().fill(mix(&p.card, &p.accent2, 0.05)),
        );
        slide.add_text(TextBox::plain(
            Rect::new(7.05, 2.02, 2.1, 0.4),
            callout.title.as_str(),
            self.painter.header(16.0, &p.text).bold(),
        ));

        let mut y = 2.55;
        for (k, highlight) in callout.highlights.iter().enumerate() {
            slide.add_shape(Shape::filled(
                ShapeKind::Oval,
                Rect::new(7.05, y + 0.05, 0.16, 0.16),
                p.alternate(k),
            ));
            slide.add_text(TextBox::plain(
                Rect::new(7.27, y, 2.0, 0.3),
                highlight.as_str(),
                self.painter.body(13.0, &self.painter.muted(0.15)),
            ));
            y += 0.48;
        }
        slide
    }

    fn list_slide(
        &self,
        kind: SlideKind,
        heading: &str,
        caption: &str,
        items: &[String],
        chrome: Chrome,
    ) -> Slide {
        let mut slide = self.painter.slide(kind, &chrome);
        self.painter.heading(&mut slide, heading, Some(caption));
        self.painter.card(
            &mut slide,
            Rect::new(MARGIN, 1.75, SLIDE_W - 1.35, 3.4),
            CardStyle::shadowed(),
        );
        self.painter.bullets(
            &mut slide,
            items.to_vec(),
            Rect::new(MARGIN + 0.45, 2.05, SLIDE_W - 2.2, 2.85),
        );
        slide
    }

    fn sources_slide(&self, doc: &ResearchDocument, chrome: Chrome) -> Slide {
        let p = self.palette();
        let mut slide = self.painter.slide(SlideKind::Sources, &chrome);
        self.painter
            .heading(&mut slide, "Sources", Some(self.options.captions.sources.as_str()));

        const TOP: f64 = 1.7;
        const ROW_H: f64 = 0.62;
        self.painter.card(
            &mut slide,
            Rect::new(MARGIN, 1.55, SLIDE_W - 1.35, 3.65),
            CardStyle::shadowed(),
        );

        if doc.sources.len() > MAX_SOURCES {
            log::debug!(
                "Dropping {} sources beyond the first {MAX_SOURCES}",
                doc.sources.len() - MAX_SOURCES
            );
        }

        let url_color = self.painter.muted(0.35);
        for (i, source) in doc.sources.iter().take(MAX_SOURCES).enumerate() {
            let y = TOP + i as f64 * ROW_H;
            self.painter.badge(
                &mut slide,
                ShapeKind::RoundedRectangle,
                Rect::new(MARGIN + 0.35, y + 0.04, 0.42, 0.42),
                p.alternate(i),
                &source.id,
                Rect::new(MARGIN + 0.35, y + 0.12, 0.42, 0.3),
                12.0,
            );
            slide.add_text(TextBox::plain(
                Rect::new(MARGIN + 0.85, y, 7.9, 0.28),
                source.title.as_str(),
                self.painter.body(12.0, &p.text),
            ));
            slide.add_text(TextBox::plain(
                Rect::new(MARGIN + 0.85, y + 0.27, 7.9, 0.25),
                source.url.as_str(),
                self.painter.body(10.0, &url_color),
            ));
        }
        slide
    }

    fn gaps_slide(&self, doc: &ResearchDocument, chrome: Chrome) -> Slide {
        let p = self.palette();
        let captions = &self.options.captions;
        let chrome = Chrome { dark: true, ..chrome };
        let mut slide = self.painter.slide(SlideKind::Gaps, &chrome);

        self.painter.display_heading(
            &mut slide,
            &captions.gaps_heading,
            Rect::new(0.55, 0.8, SLIDE_W - 1.2, 0.7),
            38.0,
        );

        self.painter.card(
            &mut slide,
            Rect::new(MARGIN, 1.7, SLIDE_W - 1.35, 3.35),
            CardStyle::shadowed()
                .fill(mix(&p.dark, WHITE, 0.06))
                .line(self.painter.shade_background_text(0.55)),
        );
        slide.add_text(TextBox::plain(
            Rect::new(MARGIN + 0.45, 1.95, SLIDE_W - 2.2, 0.35),
            captions.gaps_lead.as_str(),
            self.painter.header(16.0, &p.background_text).bold(),
        ));

        let steps = if doc.gaps.is_empty() {
            captions.default_gaps.clone()
        } else {
            doc.gaps.clone()
        };
        slide.add_text(TextBox::new(
            Rect::new(MARGIN + 0.45, 2.35, SLIDE_W - 2.2, 2.3),
            TextContent::Numbered(steps),
            self.painter
                .body(16.0, &self.painter.shade_background_text(0.02))
                .paragraph_spacing(10.0),
        ));

        slide.add_text(TextBox::plain(
            Rect::new(0.55, SLIDE_H - 0.55, SLIDE_W - 1.2, 0.3),
            format!("(Theme: {} / {})", self.theme.name, self.theme_id),
            self.painter
                .body(10.0, &self.painter.shade_background_text(0.12)),
        ));
        slide
    }
}

/// Report title without the "(Deep Research)" suffix.
fn display_title(title: &str) -> String {
    TITLE_SUFFIXES
        .iter()
        .fold(title.to_string(), |t, suffix| t.replace(suffix, ""))
        .trim()
        .to_string()
}

/// Hands out footer chrome with increasing page numbers, starting at 2.
struct PageCounter {
    footer: String,
    page: usize,
}

impl PageCounter {
    fn new(footer: String) -> Self {
        Self { footer, page: 1 }
    }

    fn next(&mut self) -> Chrome {
        self.page += 1;
        Chrome {
            footer: self.footer.clone(),
            page: Some(self.page),
            ..Chrome::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Element;
    use crate::fixtures::{EMPTY_SECTIONS, SAMPLE, THEME};

    fn deck(document: &str) -> Deck {
        build_deck(document, THEME, "golden-hour", &DeckOptions::default())
    }

    fn kinds(deck: &Deck) -> Vec<SlideKind> {
        deck.slides.iter().map(|s| s.kind).collect()
    }

    fn texts(slide: &Slide) -> String {
        slide.texts().join("\n")
    }

    #[test]
    fn test_thirteen_slides_in_order() {
        let deck = deck(SAMPLE);
        assert_eq!(deck.slides.len(), 13);
        assert_eq!(
            kinds(&deck),
            vec![
                SlideKind::Title,
                SlideKind::ExecutiveSummary,
                SlideKind::KeyFindings,
                SlideKind::SectionDivider,
                SlideKind::Analysis,
                SlideKind::Analysis,
                SlideKind::Analysis,
                SlideKind::Analysis,
                SlideKind::Analysis,
                SlideKind::Consensus,
                SlideKind::Debate,
                SlideKind::Sources,
                SlideKind::Gaps,
            ]
        );
    }

    #[test]
    fn test_thirteen_slides_for_empty_sections_and_empty_text() {
        assert_eq!(deck(EMPTY_SECTIONS).slides.len(), 13);
        assert_eq!(deck("").slides.len(), 13);
        assert_eq!(build_deck("", "", "none", &DeckOptions::default()).slides.len(), 13);
    }

    #[test]
    fn test_metadata_and_title_slide() {
        let deck = deck(SAMPLE);
        assert_eq!(deck.title, "UK Baked Beans (Deep Research)");
        assert_eq!(deck.subject, "UK Baked Beans (Deep Research)");
        assert_eq!(deck.fonts.header, "Segoe UI Semibold");
        assert_eq!(deck.theme_name, "Golden Hour");
        assert_eq!(deck.palette.accent1, "F4A900");
        let title = texts(&deck.slides[0]);
        assert!(title.contains("UK Baked Beans"));
        assert!(!title.contains("(Deep Research)"));
        assert!(title.contains("Generated 2025-12-01"));
    }

    #[test]
    fn test_page_numbers_and_footer() {
        let deck = deck(SAMPLE);
        let summary = deck.slides[1].texts();
        assert!(summary.contains(&"Deep Research • 2025-12-01".to_string()));
        assert!(summary.contains(&"2".to_string()));
        assert!(deck.slides[12].texts().contains(&"13".to_string()));
    }

    #[test]
    fn test_footer_without_date() {
        let deck = deck(EMPTY_SECTIONS);
        assert!(deck.slides[1].texts().contains(&"Deep Research".to_string()));
    }

    #[test]
    fn test_key_findings_truncate_to_four() {
        let doc = "## Key Findings\n- **A**: a\n- **B**: b\n- c\n- **D**: d\n- **E**: e\n## Detailed Analysis";
        let deck = deck(doc);
        let text = texts(&deck.slides[2]);
        assert!(text.contains("Finding 3"));
        assert!(text.contains("D"));
        assert!(!text.contains("E\n"));
        assert!(!text.contains("\ne"));
        let badges = deck.slides[2]
            .elements
            .iter()
            .filter(|e| matches!(e, Element::Shape(s) if s.kind == ShapeKind::Oval && s.rect.w == 0.55))
            .count();
        assert_eq!(badges, 4);
    }

    #[test]
    fn test_glance_tags_from_finding_titles() {
        let deck = deck(SAMPLE);
        let text = texts(&deck.slides[1]);
        assert!(text.contains("Path dependence"));
        assert!(text.contains("Constraints"));
    }

    #[test]
    fn test_sources_truncate_to_six() {
        let sources: String = (1..=8)
            .map(|i| format!("[{i}] Title {i}. https://example.com/{i}\n"))
            .collect();
        let doc = format!("## Sources\n{sources}## Gaps and Further Research\n");
        let deck = deck(&doc);
        let text = texts(&deck.slides[11]);
        assert!(text.contains("https://example.com/6"));
        assert!(!text.contains("https://example.com/7"));
    }

    #[test]
    fn test_analysis_slides_and_placeholders() {
        let deck = deck(SAMPLE);
        let first = texts(&deck.slides[4]);
        assert!(first.contains("1. Entry path"));
        assert!(first.contains("Sources: [1] [4]"));
        assert!(first.contains("Brand to channel"));
        assert!(first.contains("Key points"));

        let third = texts(&deck.slides[6]);
        assert!(third.contains("Analysis 3"));
    }

    #[test]
    fn test_derived_callout_uses_bold_bullet_titles() {
        let doc = "## Detailed Analysis\n\
            ### Price war\n\
            Supermarkets **undercut** brands [2].\n\
            - **Cheap**: under a pound\n\
            - **Filling**: protein\n\
            ## Areas of Consensus\n";
        let deck = deck(doc);
        let texts = deck.slides[4].texts();
        assert!(texts.contains(&"Cheap".to_string()));
        assert!(texts.contains(&"Filling".to_string()));
        assert!(texts.contains(&"Sources: [2]".to_string()));
        assert!(texts.contains(&"Supermarkets undercut brands [2].".to_string()));
        assert!(texts.contains(&"Cheap: under a pound\nFilling: protein".to_string()));
    }

    #[test]
    fn test_card_text_sits_inside_card() {
        let deck = deck(SAMPLE);
        let bodies = [(1, "Baked beans are everyday food."), (5, "Shelf-stable food won [1].")];
        for (idx, text) in bodies {
            let slide = &deck.slides[idx];
            let card = slide
                .elements
                .iter()
                .find_map(|e| match e {
                    Element::Shape(s) if s.shadow.is_some() => Some(s.rect),
                    _ => None,
                })
                .unwrap();
            let body = slide
                .elements
                .iter()
                .find_map(|e| match e {
                    Element::Text(t) if t.content.joined().starts_with(text) => Some(t.rect),
                    _ => None,
                })
                .unwrap();
            assert!(body.x > card.x && body.y > card.y);
            assert!(body.x + body.w < card.x + card.w + 1e-9);
            assert!(body.y + body.h < card.y + card.h + 1e-9);
            assert!((card.x + card.w - (body.x + body.w) - 0.35).abs() < 1e-9);
        }
    }

    #[test]
    fn test_extra_analyses_are_dropped() {
        let blocks: String = (1..=7).map(|i| format!("### Part {i}\nBody {i}\n")).collect();
        let doc = format!("## Detailed Analysis\n{blocks}## Areas of Consensus\n");
        let deck = deck(&doc);
        assert_eq!(deck.slides.len(), 13);
        assert!(texts(&deck.slides[8]).contains("Part 5"));
        assert!(!deck.all_text().iter().any(|t| t.contains("Part 6")));
    }

    #[test]
    fn test_analysis_slots_are_configurable() {
        let options = DeckOptions::new().with_analysis_slots(2);
        assert_eq!(build_deck(SAMPLE, THEME, "golden-hour", &options).slides.len(), 10);
    }

    #[test]
    fn test_callout_keyed_by_title() {
        let options = DeckOptions::new().with_callout(
            "2. Constraint environment",
            Callout::new("Functional eating")
                .with_highlights(["Shelf-stable", "Quick to heat"])
                .with_caption("Sources: [1]"),
        );
        let deck = build_deck(SAMPLE, THEME, "golden-hour", &options);
        let second = texts(&deck.slides[5]);
        assert!(second.contains("Functional eating"));
        assert!(second.contains("Quick to heat"));
        assert!(texts(&deck.slides[4]).contains("Key points"));
    }

    #[test]
    fn test_gaps_fallback_and_credit() {
        let deck = deck(EMPTY_SECTIONS);
        let gaps = &deck.slides[12];
        let text = texts(gaps);
        assert!(text.contains("Trace the key claims back to primary archives."));
        assert!(text.contains("(Theme: Golden Hour / golden-hour)"));
        assert!(gaps.elements.iter().any(|e| matches!(
            e,
            Element::Text(TextBox { content: TextContent::Numbered(items), .. }) if items.len() == 2
        )));
    }

    #[test]
    fn test_consensus_bullets() {
        let deck = deck(SAMPLE);
        assert!(deck.slides[9].elements.iter().any(|e| matches!(
            e,
            Element::Text(TextBox { content: TextContent::Bullets(items), .. })
                if items == &vec!["Convenient".to_string(), "Cheap".to_string()]
        )));
    }

    #[test]
    fn test_dark_slides() {
        let deck = deck(SAMPLE);
        let dark = Palette::from_theme(&Theme::parse(THEME)).dark;
        for idx in [0, 3, 12] {
            assert_eq!(deck.slides[idx].background, dark);
        }
        assert_ne!(deck.slides[1].background, dark);
    }

    #[test]
    fn test_display_title() {
        assert_eq!(display_title("Beans（Deep Research）"), "Beans");
        assert_eq!(display_title("Beans (Deep Research)"), "Beans");
        assert_eq!(display_title("Beans"), "Beans");
    }
}
