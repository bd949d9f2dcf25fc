//! WASM-compatible wrapper for research deck generation.
//!
//! Exposes deck building to JavaScript for use in Cloudflare Workers: the
//! caller passes the report and theme markdown, and gets `.pptx` bytes or a
//! JSON-friendly outline back.

use deck_core::{build_deck, Deck, DeckOptions, SlideKind};
use deck_pptx::PptxWriter;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Outline of a built deck.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeckSummary {
    pub title: String,
    pub theme_name: String,
    pub slide_count: usize,
    pub slides: Vec<SlideSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlideSummary {
    pub number: usize,
    pub kind: SlideKind,
    /// Text of each text box on the slide.
    pub texts: Vec<String>,
}

/// Build a `.pptx` from report and theme markdown.
///
/// # Arguments
/// * `markdown` - The research report
/// * `theme` - The theme file contents
/// * `theme_id` - Theme identifier, shown in the closing credit
///
/// # Returns
/// The package bytes as a `Uint8Array`, or throws on error.
#[wasm_bindgen]
pub fn build_pptx(markdown: &str, theme: &str, theme_id: &str) -> Result<js_sys::Uint8Array, JsValue> {
    let bytes = build_pptx_impl(markdown, theme, theme_id, &DeckOptions::default())
        .map_err(|e| JsValue::from_str(&e))?;
    Ok(js_sys::Uint8Array::from(bytes.as_slice()))
}

/// Like [`build_pptx`], with a `DeckOptions`-shaped object
/// (`footer_label`, `tagline`, `language`, `callouts`, ...).
#[wasm_bindgen]
pub fn build_pptx_with_options(
    markdown: &str,
    theme: &str,
    theme_id: &str,
    options: JsValue,
) -> Result<js_sys::Uint8Array, JsValue> {
    let options = options_from_js(options)?;
    let bytes = build_pptx_impl(markdown, theme, theme_id, &options)
        .map_err(|e| JsValue::from_str(&e))?;
    Ok(js_sys::Uint8Array::from(bytes.as_slice()))
}

/// Outline the deck without packaging it.
#[wasm_bindgen]
pub fn describe_deck(markdown: &str, theme: &str, theme_id: &str) -> Result<JsValue, JsValue> {
    let summary = describe_deck_impl(markdown, theme, theme_id, &DeckOptions::default());

    serde_wasm_bindgen::to_value(&summary)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn options_from_js(options: JsValue) -> Result<DeckOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(DeckOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

fn build_pptx_impl(
    markdown: &str,
    theme: &str,
    theme_id: &str,
    options: &DeckOptions,
) -> Result<Vec<u8>, String> {
    let deck = build_deck(markdown, theme, theme_id, options);
    PptxWriter::new()
        .to_bytes(&deck)
        .map_err(|e| format!("PPTX writing error: {}", e))
}

fn describe_deck_impl(
    markdown: &str,
    theme: &str,
    theme_id: &str,
    options: &DeckOptions,
) -> DeckSummary {
    summarize(&build_deck(markdown, theme, theme_id, options))
}

fn summarize(deck: &Deck) -> DeckSummary {
    DeckSummary {
        title: deck.title.clone(),
        theme_name: deck.theme_name.clone(),
        slide_count: deck.slides.len(),
        slides: deck
            .slides
            .iter()
            .enumerate()
            .map(|(idx, slide)| SlideSummary {
                number: idx + 1,
                kind: slide.kind,
                texts: slide.texts(),
            })
            .collect(),
    }
}
