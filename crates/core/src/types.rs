//! Domain types for the content of a research report.

use serde::{Deserialize, Serialize};

/// A titled span of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// One bullet of the Key Findings section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFinding {
    /// The `**bold**` prefix, if the bullet had one.
    pub title: Option<String>,
    pub body: String,
}

/// A numbered citation from the Sources section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Citation number as written, e.g. `"4"`.
    pub id: String,
    pub title: String,
    pub url: String,
}
