//! PPTX package writer.

use crate::parts;
use crate::slide::slide_xml;
use deck_core::{Deck, Error, Result};
use std::io::{Cursor, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes a [`Deck`] as a PowerPoint (OOXML) package.
pub struct PptxWriter {
    compression: CompressionMethod,
}

impl PptxWriter {
    /// Create a writer that deflates every part.
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Store parts uncompressed.
    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    /// Write the package into `sink` and hand it back.
    pub fn write<W: Write + Seek>(&self, deck: &Deck, sink: W) -> Result<W> {
        let mut zip = ZipWriter::new(sink);
        let count = deck.slides.len();

        // [Content_Types].xml goes first so sniffers recognise the package.
        self.add(&mut zip, parts::CONTENT_TYPES, &parts::content_types(count)?)?;
        self.add(&mut zip, parts::ROOT_RELS, &parts::root_rels()?)?;
        self.add(&mut zip, parts::CORE_PROPS, &parts::core_props(deck)?)?;
        self.add(&mut zip, parts::APP_PROPS, &parts::app_props(deck)?)?;
        self.add(&mut zip, parts::PRESENTATION, &parts::presentation(deck)?)?;
        self.add(&mut zip, parts::PRESENTATION_RELS, &parts::presentation_rels(count)?)?;
        self.add(&mut zip, parts::MASTER, &parts::slide_master()?)?;
        self.add(&mut zip, parts::MASTER_RELS, &parts::master_rels()?)?;
        self.add(&mut zip, parts::LAYOUT, &parts::slide_layout()?)?;
        self.add(&mut zip, parts::LAYOUT_RELS, &parts::layout_rels()?)?;
        self.add(&mut zip, parts::THEME, &parts::theme(deck)?)?;

        let slide_rels = parts::slide_rels()?;
        for (idx, slide) in deck.slides.iter().enumerate() {
            let number = idx + 1;
            self.add(&mut zip, &parts::slide_path(number), &slide_xml(slide, &deck.language)?)?;
            self.add(&mut zip, &parts::slide_rels_path(number), &slide_rels)?;
        }

        log::debug!("Wrote {} slides", count);
        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish ZIP: {}", e)))
    }

    /// Write the package into memory.
    pub fn to_bytes(&self, deck: &Deck) -> Result<Vec<u8>> {
        Ok(self.write(deck, Cursor::new(Vec::new()))?.into_inner())
    }

    fn add<W: Write + Seek>(&self, zip: &mut ZipWriter<W>, path: &str, content: &str) -> Result<()> {
        let options = FileOptions::default().compression_method(self.compression);
        zip.start_file(path, options)
            .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", path, e)))?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::PptxReader;
    use deck_core::{build_deck, DeckOptions};
    use std::io::Read;
    use zip::ZipArchive;

    const REPORT: &str = "# Tea Markets (Deep Research)\n\
        \n\
        Generated: 2025-11-02\n\
        \n\
        ## Executive Summary\n\
        \n\
        Tea is a global & local story.\n\
        \n\
        ## Key Findings\n\
        \n\
        - **Demand**: Stable in Europe.\n\
        - **Prices**: Volatile.\n\
        \n\
        ## Detailed Analysis\n\
        \n\
        ### 1. Supply\n\
        \n\
        Estates consolidate [1].\n\
        \n\
        ## Areas of Consensus\n\
        \n\
        - Quality matters\n\
        \n\
        ## Areas of Debate\n\
        \n\
        - Pricing power\n\
        \n\
        ## Sources\n\
        \n\
        [1] Tea Board report. https://example.org/tea\n\
        \n\
        ## Gaps and Further Research\n\
        \n\
        - Retail panel data\n";

    const THEME: &str = "# Golden Hour\n\
        - **Mustard Yellow**: `#F4A900`\n\
        - **Terracotta**: `#C1666B`\n\
        - **Warm Beige**: `#D4B896`\n\
        - **Chocolate Brown**: `#4A403A`\n\
        - **Headers**: DejaVu Sans Bold\n\
        - **Body Text**: DejaVu Sans\n";

    fn package() -> Vec<u8> {
        let deck = build_deck(REPORT, THEME, "golden-hour", &DeckOptions::default());
        PptxWriter::new().to_bytes(&deck).unwrap()
    }

    fn names(bytes: &[u8]) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn test_package_layout() {
        let bytes = package();
        assert_eq!(&bytes[..2], b"PK");

        let names = names(&bytes);
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.by_index(0).unwrap().name(), "[Content_Types].xml");

        for part in [
            parts::ROOT_RELS,
            parts::PRESENTATION,
            parts::PRESENTATION_RELS,
            parts::MASTER,
            parts::LAYOUT,
            parts::THEME,
            parts::CORE_PROPS,
        ] {
            assert!(names.iter().any(|n| n == part), "missing {}", part);
        }
        for n in 1..=13 {
            assert!(names.contains(&parts::slide_path(n)));
            assert!(names.contains(&parts::slide_rels_path(n)));
        }
        assert!(!names.contains(&parts::slide_path(14)));
    }

    #[test]
    fn test_theme_part_uses_theme_name() {
        let bytes = package();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name(parts::THEME)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert!(xml.contains("name=\"Golden Hour\""));
        assert!(xml.contains("<a:accent1><a:srgbClr val=\"F4A900\"/></a:accent1>"));
    }

    #[test]
    fn test_written_text_reads_back() {
        let bytes = package();
        let slides = PptxReader::new().read(Cursor::new(bytes)).unwrap();
        assert_eq!(slides.len(), 13);

        assert!(slides[0].contains("Tea Markets"));
        assert!(slides[1].contains("Tea is a global & local story."));
        assert!(slides[2].contains("Demand"));
        assert!(slides[4].contains("1. Supply"));
        assert!(slides[9].contains("Quality matters"));
        assert!(slides[11].contains("Tea Board report"));
        assert!(slides[12].contains("Retail panel data"));
    }

    #[test]
    fn test_stored_and_deflated_hold_same_parts() {
        let deck = build_deck(REPORT, THEME, "golden-hour", &DeckOptions::default());
        let deflated = PptxWriter::new().to_bytes(&deck).unwrap();
        let stored = PptxWriter::new().stored().to_bytes(&deck).unwrap();
        assert_eq!(names(&deflated), names(&stored));
        assert!(stored.len() > deflated.len());
    }
}
