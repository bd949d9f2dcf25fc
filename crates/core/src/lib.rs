//! Core of the research deck generator: markdown section extraction,
//! theme palettes, and the slide layout that turns a research report into
//! a deck description.

pub mod builder;
pub mod color;
pub mod deck;
pub mod document;
pub mod error;
pub mod layout;
pub mod markdown;
pub mod options;
pub mod theme;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use builder::{build_deck, DeckBuilder};
pub use deck::{Deck, Element, Slide, SlideKind};
pub use document::ResearchDocument;
pub use error::{Error, Result};
pub use options::{parse_callouts, Callout, Captions, DeckOptions};
pub use theme::{theme_path, FontPair, Palette, Theme};
pub use types::{KeyFinding, Section, Source};
