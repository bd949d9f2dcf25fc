//! Deck build options.

use crate::markdown::{
    cited_ids, slugify, split_bold_prefix, split_intro_and_bullets, strip_md,
};
use crate::error::{Error, Result};
use crate::types::Section;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Analysis slides in a standard deck.
pub const DEFAULT_ANALYSIS_SLOTS: usize = 5;

/// Most highlights shown in an analysis callout.
pub const MAX_HIGHLIGHTS: usize = 3;

/// Longest derived highlight, in characters.
const HIGHLIGHT_CHARS: usize = 28;

const DEFAULT_CALLOUT_TITLE: &str = "Key points";

/// The right-hand panel of an analysis slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callout {
    /// Panel heading.
    pub title: String,

    /// Short dotted lines under the heading.
    #[serde(default)]
    pub highlights: Vec<String>,

    /// Subtitle under the slide heading, typically the cited sources.
    #[serde(default)]
    pub caption: Option<String>,
}

impl Callout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_highlights<I, S>(mut self, highlights: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlights = highlights.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Callout derived from the analysis itself: bullet titles (or the
    /// bullet text, shortened) as highlights and the cited ids as caption.
    pub fn derive(analysis: &Section) -> Self {
        let split = split_intro_and_bullets(&analysis.body);
        let highlights = split
            .bullets
            .iter()
            .take(MAX_HIGHLIGHTS)
            .map(|bullet| {
                let finding = split_bold_prefix(bullet);
                shorten(&strip_md(finding.title.as_deref().unwrap_or(&finding.body)))
            })
            .collect();

        let ids = cited_ids(&analysis.body);
        let caption = (!ids.is_empty()).then(|| {
            let refs: Vec<String> = ids.iter().map(|id| format!("[{id}]")).collect();
            format!("Sources: {}", refs.join(" "))
        });

        Self {
            title: DEFAULT_CALLOUT_TITLE.to_string(),
            highlights,
            caption,
        }
    }
}

/// Cut at a character boundary, marking the cut with an ellipsis.
fn shorten(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= HIGHLIGHT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(HIGHLIGHT_CHARS - 1).collect();
    format!("{}…", cut.trim_end())
}

/// Fixed captions and fallbacks used across the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Captions {
    pub summary: Option<String>,
    pub key_findings: Option<String>,
    pub divider: Option<String>,
    pub consensus: String,
    pub debate: String,
    pub sources: String,
    pub gaps_heading: String,
    pub gaps_lead: String,

    /// Used when the report lists no gaps.
    pub default_gaps: Vec<String>,

    pub glance_heading: String,
    pub summary_fallback: String,
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            summary: None,
            key_findings: None,
            divider: None,
            consensus: "Where the sources broadly agree.".to_string(),
            debate: "Where the evidence is still contested.".to_string(),
            sources: "Public sources behind the narrative, by citation number.".to_string(),
            gaps_heading: "Gaps & Next Steps".to_string(),
            gaps_lead: "Push the research toward harder evidence:".to_string(),
            default_gaps: vec![
                "Trace the key claims back to primary archives.".to_string(),
                "Compare competing timelines and estimates systematically.".to_string(),
            ],
            glance_heading: "At a glance".to_string(),
            summary_fallback: "No executive summary was provided.".to_string(),
        }
    }
}

/// Options for [`crate::build_deck`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckOptions {
    /// Left part of the footer; the report date is appended.
    pub footer_label: String,

    /// Extra line on the title slide after the date.
    pub tagline: Option<String>,

    pub author: String,
    pub language: String,

    /// Number of analysis slides; missing analyses render as placeholders.
    pub analysis_slots: usize,

    /// Callouts keyed by analysis id (see [`crate::markdown::slugify`]).
    pub callouts: HashMap<String, Callout>,

    pub captions: Captions,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            footer_label: "Deep Research".to_string(),
            tagline: None,
            author: "Deep Research".to_string(),
            language: "en-US".to_string(),
            analysis_slots: DEFAULT_ANALYSIS_SLOTS,
            callouts: HashMap::new(),
            captions: Captions::default(),
        }
    }
}

impl DeckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_footer_label(mut self, label: impl Into<String>) -> Self {
        self.footer_label = label.into();
        self
    }

    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = Some(tagline.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_analysis_slots(mut self, slots: usize) -> Self {
        self.analysis_slots = slots;
        self
    }

    /// Register a callout for the analysis whose title slugifies to `id`.
    /// The id is slugified too, so a raw heading works as well.
    pub fn with_callout(mut self, id: &str, callout: Callout) -> Self {
        self.callouts.insert(slugify(id), callout);
        self
    }

    pub fn with_callouts(mut self, callouts: HashMap<String, Callout>) -> Self {
        for (id, callout) in callouts {
            self.callouts.insert(slugify(&id), callout);
        }
        self
    }

    pub fn with_captions(mut self, captions: Captions) -> Self {
        self.captions = captions;
        self
    }

    /// Configured callout for this analysis, or one derived from its content.
    pub fn callout_for(&self, analysis: &Section) -> Callout {
        self.callouts
            .get(&slugify(&analysis.title))
            .cloned()
            .unwrap_or_else(|| Callout::derive(analysis))
    }
}

/// Parse a JSON object of callouts keyed by analysis id.
pub fn parse_callouts(json: &str) -> Result<HashMap<String, Callout>> {
    serde_json::from_str(json)
        .map_err(|e| Error::Serialization(format!("Invalid callouts: {}", e)))
}
