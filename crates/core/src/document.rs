//! A research report parsed into typed sections.

use crate::markdown::{
    find_date, normalize_paragraphs, parse_bullets, parse_detailed_analysis, parse_sources,
    split_bold_prefix, strip_md, Heading,
};
use crate::types::{KeyFinding, Section, Source};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+?)\s*$").unwrap());

const DEFAULT_TITLE: &str = "Deep Research";

/// Everything the deck needs from one report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchDocument {
    pub title: String,

    /// Value of the date stamp line, or empty.
    pub date: String,

    pub executive_summary: String,
    pub key_findings: Vec<KeyFinding>,

    /// Titles are plain text; bodies keep their inline markup so callouts
    /// can still see `**Title**:` bullets.
    pub analyses: Vec<Section>,
    pub consensus: Vec<String>,
    pub debate: Vec<String>,
    pub sources: Vec<Source>,
    pub gaps: Vec<String>,
}

impl ResearchDocument {
    /// Parse a report. Missing headings leave the matching field empty.
    pub fn parse(text: &str) -> Self {
        let bullets = |heading: Heading| -> Vec<String> {
            parse_bullets(heading.extract(text))
                .iter()
                .map(|b| strip_md(b))
                .collect()
        };

        let doc = Self {
            title: TITLE_REGEX
                .captures(text)
                .map(|c| c[1].trim().to_string())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            date: find_date(text).unwrap_or_default(),
            executive_summary: strip_md(&normalize_paragraphs(
                Heading::ExecutiveSummary.extract(text),
            )),
            key_findings: parse_bullets(Heading::KeyFindings.extract(text))
                .iter()
                .map(|b| split_bold_prefix(b))
                .collect(),
            analyses: parse_detailed_analysis(Heading::DetailedAnalysis.extract(text))
                .into_iter()
                .map(|s| Section::new(strip_md(&s.title), s.body))
                .collect(),
            consensus: bullets(Heading::Consensus),
            debate: bullets(Heading::Debate),
            sources: parse_sources(Heading::Sources.extract(text))
                .into_iter()
                .map(|s| Source {
                    title: strip_md(&s.title),
                    url: strip_md(&s.url),
                    id: s.id,
                })
                .collect(),
            gaps: bullets(Heading::Gaps),
        };

        log::debug!(
            "Parsed '{}': {} findings, {} analyses, {} sources",
            doc.title,
            doc.key_findings.len(),
            doc.analyses.len(),
            doc.sources.len()
        );
        doc
    }
}
