//! Heading-delimited extraction from research markdown.
//!
//! This is deliberately not a markdown parser. A report is a flat run of
//! text with a known heading vocabulary, and each piece of content is found
//! by literal substring search:
//!
//! - a **section** is the text between the first occurrence of its heading
//!   and the first later occurrence of the next heading (or end of text)
//! - a **bullet** is a line starting with `- `
//! - a **bold prefix** is a bullet of the form `**Title**: body`
//! - an **analysis block** starts at a line beginning with `### `
//! - a **citation** is a line `[n] Title. https://url`
//!
//! Anything that does not fit degrades to an empty result. None of these
//! functions return errors.

use crate::types::{KeyFinding, Section, Source};
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static BOLD_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([^*]+)\*\*[：:]\s*(.+)$").unwrap());

static SUBHEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^###[ \t]+").unwrap());

static SOURCE_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d+)\]\s+(.+?)\.\s+(https?://\S+)\s*$").unwrap());

static CITATION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(\d+)\]").unwrap());

/// Date stamp line. Matched against the NFKC form of a line, so a
/// full-width colon folds to `:`.
static DATE_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:生成日期|(?i:generated|date))\s*:\s*([0-9-]+)\s*$").unwrap()
});

const BULLET_MARKER: &str = "- ";

/// Level-2 headings of a research report, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    ExecutiveSummary,
    KeyFindings,
    DetailedAnalysis,
    Consensus,
    Debate,
    Sources,
    Gaps,
}

impl Heading {
    pub const ALL: [Heading; 7] = [
        Heading::ExecutiveSummary,
        Heading::KeyFindings,
        Heading::DetailedAnalysis,
        Heading::Consensus,
        Heading::Debate,
        Heading::Sources,
        Heading::Gaps,
    ];

    /// The literal heading line searched for in the document.
    pub fn marker(self) -> &'static str {
        match self {
            Heading::ExecutiveSummary => "## Executive Summary",
            Heading::KeyFindings => "## Key Findings",
            Heading::DetailedAnalysis => "## Detailed Analysis",
            Heading::Consensus => "## Areas of Consensus",
            Heading::Debate => "## Areas of Debate",
            Heading::Sources => "## Sources",
            Heading::Gaps => "## Gaps and Further Research",
        }
    }

    /// The heading that closes this section, if any.
    pub fn next(self) -> Option<Heading> {
        let idx = Self::ALL.iter().position(|h| *h == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    /// Body of this section within `text`.
    pub fn extract(self, text: &str) -> &str {
        section_between(text, self.marker(), self.next().map(Heading::marker))
    }
}

/// Trimmed text after the first `start` and before the first following `end`.
///
/// Runs to end of text when `end` is `None` or absent. Returns `""` when
/// `start` does not occur.
pub fn section_between<'a>(text: &'a str, start: &str, end: Option<&str>) -> &'a str {
    let Some(start_idx) = text.find(start) else {
        return "";
    };
    let after = &text[start_idx + start.len()..];
    match end.and_then(|end| after.find(end)) {
        Some(end_idx) => after[..end_idx].trim(),
        None => after.trim(),
    }
}

/// Trimmed `- ` lines with the marker removed.
pub fn parse_bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(BULLET_MARKER))
        .map(|rest| rest.trim().to_string())
        .collect()
}

/// A block split at its first bullet line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntroAndBullets {
    pub intro: String,
    pub bullets: Vec<String>,
}

/// Split non-blank lines into the paragraph before the first bullet and the
/// bullets from there on. Non-bullet lines after the first bullet are dropped.
pub fn split_intro_and_bullets(text: &str) -> IntroAndBullets {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let Some(first_bullet) = lines.iter().position(|l| l.starts_with(BULLET_MARKER)) else {
        return IntroAndBullets {
            intro: lines.join("\n"),
            bullets: Vec::new(),
        };
    };

    IntroAndBullets {
        intro: lines[..first_bullet].join("\n").trim().to_string(),
        bullets: lines[first_bullet..]
            .iter()
            .filter_map(|l| l.strip_prefix(BULLET_MARKER))
            .map(|rest| rest.trim().to_string())
            .collect(),
    }
}

/// Separate a `**Title**: body` bullet into its parts.
pub fn split_bold_prefix(bullet: &str) -> KeyFinding {
    match BOLD_PREFIX_REGEX.captures(bullet) {
        Some(caps) => KeyFinding {
            title: Some(caps[1].trim().to_string()),
            body: caps[2].trim().to_string(),
        },
        None => KeyFinding {
            title: None,
            body: bullet.to_string(),
        },
    }
}

/// Split a block at `### ` lines. Each chunk's first line is its title and
/// the rest, normalized, is its body. Text before the first sub-heading forms
/// a chunk of its own.
pub fn parse_detailed_analysis(text: &str) -> Vec<Section> {
    SUBHEADING_REGEX
        .split(text)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let (title, rest) = chunk.split_once('\n').unwrap_or((chunk, ""));
            Section {
                title: title.trim().to_string(),
                body: normalize_paragraphs(rest),
            }
        })
        .collect()
}

/// Trim lines, drop blank lines and date stamps, join with newlines.
pub fn normalize_paragraphs(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_date_line(l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Citation lines `[n] Title. https://url`. Other lines are skipped.
pub fn parse_sources(text: &str) -> Vec<Source> {
    text.lines()
        .filter_map(|line| SOURCE_LINE_REGEX.captures(line.trim()))
        .map(|caps| Source {
            id: caps[1].to_string(),
            title: caps[2].trim().to_string(),
            url: caps[3].trim().to_string(),
        })
        .collect()
}

/// Remove `**`, `*` and backticks. Not a renderer: nesting is not understood.
pub fn strip_md(text: &str) -> String {
    text.replace("**", "")
        .replace('*', "")
        .replace('`', "")
        .trim()
        .to_string()
}

/// Distinct `[n]` citation ids in first-seen order.
pub fn cited_ids(text: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for caps in CITATION_REGEX.captures_iter(text) {
        let id = &caps[1];
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

/// Stable identifier for a heading: lowercase alphanumeric runs joined by `-`.
pub fn slugify(text: &str) -> String {
    text.nfkc()
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Whether a line is a date stamp (`生成日期:`, `Date:` or `Generated:`
/// followed by the date and nothing else).
pub fn is_date_line(line: &str) -> bool {
    DATE_LINE_REGEX.is_match(fold_width(line).trim())
}

/// Value of the first date stamp line in `text`.
pub fn find_date(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        DATE_LINE_REGEX
            .captures(fold_width(line).trim())
            .map(|caps| caps[1].to_string())
    })
}

/// NFKC-normalize so full-width punctuation compares equal to ASCII.
fn fold_width(line: &str) -> String {
    line.nfkc().collect()
}
