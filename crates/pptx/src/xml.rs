//! Small convenience layer over `quick_xml::Writer` for building parts.

use deck_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Relationship and schema namespaces shared by the package parts.
pub mod ns {
    pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
    pub const P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    pub const PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    pub const CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
}

/// Buffered XML document with an XML declaration already written.
pub struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    pub fn new() -> Result<Self> {
        let mut out = Self {
            writer: Writer::new(Vec::new()),
        };
        out.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(out)
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::XmlError(format!("Failed to write XML: {}", e)))
    }

    fn start<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
        let mut start = BytesStart::new(name);
        for &attr in attrs {
            start.push_attribute(attr);
        }
        start
    }

    /// `<name attrs...>`
    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Start(Self::start(name, attrs)))
    }

    /// `</name>`
    pub fn close(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// `<name attrs.../>`
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Empty(Self::start(name, attrs)))
    }

    /// `<name attrs...>text</name>`, with `text` escaped.
    pub fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.open(name, attrs)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    /// `<a:solidFill><a:srgbClr val=".."/></a:solidFill>`, with an alpha
    /// child when `transparency` is non-zero.
    pub fn solid_fill(&mut self, color: &str, transparency: u8) -> Result<()> {
        self.open("a:solidFill", &[])?;
        self.srgb(color, transparency)?;
        self.close("a:solidFill")
    }

    /// `<a:srgbClr>` with optional alpha (percent transparency).
    pub fn srgb(&mut self, color: &str, transparency: u8) -> Result<()> {
        if transparency == 0 {
            return self.empty("a:srgbClr", &[("val", color)]);
        }
        let alpha = (u32::from(100 - transparency.min(100)) * 1000).to_string();
        self.open("a:srgbClr", &[("val", color)])?;
        self.empty("a:alpha", &[("val", &alpha)])?;
        self.close("a:srgbClr")
    }

    pub fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| Error::XmlError(format!("Generated XML is not UTF-8: {}", e)))
    }
}
