//! PowerPoint (OOXML) output for research decks.
//!
//! [`PptxWriter`] turns a [`deck_core::Deck`] into a `.pptx` package;
//! [`PptxReader`] pulls the slide text back out so a written file can be
//! checked.

pub mod parts;
pub mod reader;
pub mod slide;
pub mod writer;
pub mod xml;

pub use reader::{PptxReader, SlideText};
pub use writer::PptxWriter;
