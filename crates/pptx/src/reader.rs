//! Text reader for PPTX packages, used to check written decks.

use deck_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Text found on one slide, top-to-bottom then left-to-right.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlideText {
    /// 1-based position in the presentation.
    pub number: usize,

    /// One entry per text-bearing shape; paragraphs joined with `\n`.
    pub lines: Vec<String>,
}

impl SlideText {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Reads the text of every slide in a PPTX package, in presentation order.
pub struct PptxReader;

impl PptxReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<Vec<SlideText>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let order = self.slide_order(&mut archive)?;
        let mut slides = Vec::with_capacity(order.len());
        for (idx, path) in order.iter().enumerate() {
            let xml = read_part(&mut archive, path)?;
            let mut shapes = shapes_from_xml(&xml)?;
            // stable sort keeps z-order for shapes at the same position
            shapes.sort_by(|a, b| a.y.cmp(&b.y).then(a.x.cmp(&b.x)));
            slides.push(SlideText {
                number: idx + 1,
                lines: shapes.into_iter().map(|s| s.text).collect(),
            });
        }
        Ok(slides)
    }

    /// Slide part paths ordered by their `<p:sldId>` entries.
    fn slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels = read_part(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut targets: Vec<(String, String)> = Vec::new();

        let mut reader = Reader::from_str(&rels);
        reader.trim_text(true);
        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let rel_type = attr(e, b"Type").unwrap_or_default();
                    if !rel_type.ends_with("/slide") {
                        continue;
                    }
                    if let (Some(id), Some(target)) = (attr(e, b"Id"), attr(e, b"Target")) {
                        let path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        targets.push((id, path));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )))
                }
                _ => {}
            }
        }

        let presentation = read_part(archive, "ppt/presentation.xml")?;
        let mut order = Vec::new();
        let mut reader = Reader::from_str(&presentation);
        reader.trim_text(true);
        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"sldId" =>
                {
                    if let Some(rid) = attr(e, b"r:id") {
                        match targets.iter().find(|(id, _)| *id == rid) {
                            Some((_, path)) => order.push(path.clone()),
                            None => log::warn!("Slide id {} has no relationship", rid),
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing presentation: {}",
                        e
                    )))
                }
                _ => {}
            }
        }
        Ok(order)
    }
}

impl Default for PptxReader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct ShapeText {
    text: String,
    x: i64,
    y: i64,
}

fn shapes_from_xml(xml: &str) -> Result<Vec<ShapeText>> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut current: Option<ShapeText> = None;
    let mut paragraphs: Vec<String> = Vec::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    current = Some(ShapeText::default());
                    paragraphs.clear();
                }
                b"p" if current.is_some() => paragraphs.push(String::new()),
                b"t" => in_run_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if local_name(e.name().as_ref()) == b"off" {
                    if let Some(shape) = current.as_mut() {
                        shape.x = attr(e, b"x").and_then(|v| v.parse().ok()).unwrap_or(0);
                        shape.y = attr(e, b"y").and_then(|v| v.parse().ok()).unwrap_or(0);
                    }
                }
            }
            Ok(Event::Text(ref e)) if in_run_text => {
                let text = e.unescape().unwrap_or_default();
                if let Some(last) = paragraphs.last_mut() {
                    last.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(mut shape) = current.take() {
                        shape.text = paragraphs.join("\n").trim().to_string();
                        if !shape.text.is_empty() {
                            shapes.push(shape);
                        }
                    }
                }
                b"t" => in_run_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(format!("Error parsing slide: {}", e))),
            _ => {}
        }
    }
    Ok(shapes)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;
    Ok(content)
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Strip a namespace prefix: `a:t` -> `t`.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_shapes_sorted_input() {
        let xml = r#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree>
            <p:sp><p:spPr><a:xfrm><a:off x="100" y="900"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:r><a:t>Lower</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:spPr><a:xfrm><a:off x="100" y="100"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:r><a:t>Fish &amp; chips</a:t></a:r></a:p>
              <a:p><a:endParaRPr/></a:p><a:p><a:r><a:t>Two</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:spPr><a:xfrm><a:off x="0" y="0"/></a:xfrm></p:spPr></p:sp>
            </p:spTree></p:cSld></p:sld>"#;
        let shapes = shapes_from_xml(xml).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].text, "Lower");
        assert_eq!(shapes[1].text, "Fish & chips\n\nTwo");
        assert_eq!(shapes[1].y, 100);
    }

    #[test]
    fn test_not_a_zip() {
        let err = PptxReader::new()
            .read(std::io::Cursor::new(b"plain text".to_vec()))
            .unwrap_err();
        assert!(matches!(err, Error::ZipError(_)));
    }

    #[test]
    fn test_slide_text_contains() {
        let slide = SlideText {
            number: 1,
            lines: vec!["Sources".into(), "[1] Tea".into()],
        };
        assert!(slide.contains("Tea"));
        assert_eq!(slide.text(), "Sources\n[1] Tea");
    }
}
