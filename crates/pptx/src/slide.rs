//! Slide part serialization: shapes and text boxes as DrawingML.

use crate::parts::{emu, open_shape_tree, EMU_PER_POINT};
use crate::xml::{ns, XmlOut};
use deck_core::deck::{Align, Element, Rect, Shape, ShapeKind, TextBox, TextContent, TextStyle};
use deck_core::{Result, Slide};

/// Bullet indent for list paragraphs, in EMU (0.25").
const LIST_INDENT: i64 = 228_600;

/// Serialize one slide.
pub fn slide_xml(slide: &Slide, language: &str) -> Result<String> {
    let mut x = XmlOut::new()?;
    x.open("p:sld", &[("xmlns:a", ns::A), ("xmlns:r", ns::R), ("xmlns:p", ns::P)])?;
    x.open("p:cSld", &[])?;

    x.open("p:bg", &[])?;
    x.open("p:bgPr", &[])?;
    x.solid_fill(&slide.background, 0)?;
    x.empty("a:effectLst", &[])?;
    x.close("p:bgPr")?;
    x.close("p:bg")?;

    open_shape_tree(&mut x)?;
    // id 1 is the shape tree itself
    for (idx, element) in slide.elements.iter().enumerate() {
        let id = idx + 2;
        match element {
            Element::Shape(shape) => write_shape(&mut x, shape, id)?,
            Element::Text(text) => write_text_box(&mut x, text, id, language)?,
        }
    }
    x.close("p:spTree")?;

    x.close("p:cSld")?;
    x.open("p:clrMapOvr", &[])?;
    x.empty("a:masterClrMapping", &[])?;
    x.close("p:clrMapOvr")?;
    x.close("p:sld")?;
    x.finish()
}

fn preset(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::Rectangle => "rect",
        ShapeKind::RoundedRectangle => "roundRect",
        ShapeKind::Oval => "ellipse",
    }
}

fn write_xfrm(x: &mut XmlOut, rect: Rect, rotation: Option<f64>) -> Result<()> {
    // rotation is stored in 60000ths of a degree
    let rot = rotation.map(|deg| ((deg * 60_000.0).round() as i64).to_string());
    match &rot {
        Some(rot) => x.open("a:xfrm", &[("rot", rot.as_str())])?,
        None => x.open("a:xfrm", &[])?,
    }
    x.empty(
        "a:off",
        &[
            ("x", emu(rect.x).to_string().as_str()),
            ("y", emu(rect.y).to_string().as_str()),
        ],
    )?;
    x.empty(
        "a:ext",
        &[
            ("cx", emu(rect.w.max(0.0)).to_string().as_str()),
            ("cy", emu(rect.h.max(0.0)).to_string().as_str()),
        ],
    )?;
    x.close("a:xfrm")
}

fn write_geometry(x: &mut XmlOut, kind: ShapeKind) -> Result<()> {
    x.open("a:prstGeom", &[("prst", preset(kind))])?;
    x.empty("a:avLst", &[])?;
    x.close("a:prstGeom")
}

fn write_shape(x: &mut XmlOut, shape: &Shape, id: usize) -> Result<()> {
    let name = format!("Shape {}", id);
    x.open("p:sp", &[])?;
    x.open("p:nvSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", id.to_string().as_str()), ("name", name.as_str())])?;
    x.empty("p:cNvSpPr", &[])?;
    x.empty("p:nvPr", &[])?;
    x.close("p:nvSpPr")?;

    x.open("p:spPr", &[])?;
    write_xfrm(x, shape.rect, shape.rotation)?;
    write_geometry(x, shape.kind)?;
    x.solid_fill(&shape.fill.color, shape.fill.transparency)?;

    let width = ((shape.line.width * EMU_PER_POINT).round() as i64).to_string();
    x.open("a:ln", &[("w", width.as_str())])?;
    x.solid_fill(&shape.line.color, shape.line.transparency)?;
    x.close("a:ln")?;

    if let Some(shadow) = &shape.shadow {
        let blur = ((shadow.blur * EMU_PER_POINT).round() as i64).to_string();
        let dist = ((shadow.offset * EMU_PER_POINT).round() as i64).to_string();
        let dir = ((shadow.angle * 60_000.0).round() as i64).to_string();
        let transparency = (100.0 - shadow.opacity.clamp(0.0, 1.0) * 100.0).round() as u8;
        x.open("a:effectLst", &[])?;
        x.open(
            "a:outerShdw",
            &[
                ("blurRad", blur.as_str()),
                ("dist", dist.as_str()),
                ("dir", dir.as_str()),
                ("algn", "bl"),
                ("rotWithShape", "0"),
            ],
        )?;
        x.srgb(&shadow.color, transparency)?;
        x.close("a:outerShdw")?;
        x.close("a:effectLst")?;
    }
    x.close("p:spPr")?;
    x.close("p:sp")
}

fn write_text_box(x: &mut XmlOut, text: &TextBox, id: usize, language: &str) -> Result<()> {
    let name = format!("Text {}", id);
    x.open("p:sp", &[])?;
    x.open("p:nvSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", id.to_string().as_str()), ("name", name.as_str())])?;
    x.empty("p:cNvSpPr", &[("txBox", "1")])?;
    x.empty("p:nvPr", &[])?;
    x.close("p:nvSpPr")?;

    x.open("p:spPr", &[])?;
    write_xfrm(x, text.rect, None)?;
    write_geometry(x, ShapeKind::Rectangle)?;
    x.empty("a:noFill", &[])?;
    x.close("p:spPr")?;

    x.open("p:txBody", &[])?;
    x.empty(
        "a:bodyPr",
        &[
            ("wrap", "square"),
            ("lIns", "0"),
            ("tIns", "0"),
            ("rIns", "0"),
            ("bIns", "0"),
            ("rtlCol", "0"),
            ("anchor", "t"),
        ],
    )?;
    x.empty("a:lstStyle", &[])?;

    let marker = match &text.content {
        TextContent::Plain(_) => Marker::None,
        TextContent::Bullets(_) => Marker::Bullet,
        TextContent::Numbered(_) => Marker::Number,
    };
    let paragraphs = text.content.paragraphs();
    if paragraphs.is_empty() {
        // a text body needs at least one paragraph
        write_paragraph(x, "", &text.style, Marker::None, language)?;
    }
    for paragraph in paragraphs {
        write_paragraph(x, paragraph, &text.style, marker, language)?;
    }

    x.close("p:txBody")?;
    x.close("p:sp")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    None,
    Bullet,
    Number,
}

fn write_paragraph(
    x: &mut XmlOut,
    text: &str,
    style: &TextStyle,
    marker: Marker,
    language: &str,
) -> Result<()> {
    x.open("a:p", &[])?;

    let algn = match style.align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
    };
    let mut attrs: Vec<(&str, String)> = vec![("algn", algn.to_string())];
    if marker != Marker::None {
        attrs.push(("marL", LIST_INDENT.to_string()));
        attrs.push(("indent", (-LIST_INDENT).to_string()));
    }
    let attrs: Vec<(&str, &str)> = attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    x.open("a:pPr", &attrs)?;

    if let Some(multiple) = style.line_spacing {
        let pct = ((multiple * 100_000.0).round() as i64).to_string();
        x.open("a:lnSpc", &[])?;
        x.empty("a:spcPct", &[("val", pct.as_str())])?;
        x.close("a:lnSpc")?;
    }
    if let Some(points) = style.paragraph_spacing {
        let val = ((points * 100.0).round() as i64).to_string();
        x.open("a:spcAft", &[])?;
        x.empty("a:spcPts", &[("val", val.as_str())])?;
        x.close("a:spcAft")?;
    }
    match marker {
        Marker::None => x.empty("a:buNone", &[])?,
        Marker::Bullet => {
            x.empty("a:buFont", &[("typeface", "Arial")])?;
            x.empty("a:buChar", &[("char", "•")])?;
        }
        Marker::Number => x.empty("a:buAutoNum", &[("type", "arabicPeriod")])?,
    }
    x.close("a:pPr")?;

    let size = ((style.font_size * 100.0).round() as i64).to_string();
    let mut run_attrs = vec![("lang", language), ("sz", size.as_str()), ("dirty", "0")];
    if style.bold {
        run_attrs.push(("b", "1"));
    }

    if text.is_empty() {
        x.empty("a:endParaRPr", &run_attrs)?;
    } else {
        x.open("a:r", &[])?;
        x.open("a:rPr", &run_attrs)?;
        x.solid_fill(&style.color, 0)?;
        x.empty("a:latin", &[("typeface", style.font_face.as_str())])?;
        x.empty("a:ea", &[("typeface", style.font_face.as_str())])?;
        x.empty("a:cs", &[("typeface", style.font_face.as_str())])?;
        x.close("a:rPr")?;
        x.text_element("a:t", &[], text)?;
        x.close("a:r")?;
    }

    x.close("a:p")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::deck::{Fill, Line, Shadow};
    use deck_core::SlideKind;

    fn style() -> TextStyle {
        TextStyle::new("Segoe UI", 16.0, "4A403A")
    }

    #[test]
    fn test_shape_xml() {
        let mut slide = Slide::new(SlideKind::Title, "1F1A17");
        slide.add_shape(
            Shape::filled(ShapeKind::Oval, Rect::new(8.45, 0.45, 0.22, 0.14), "C1666B")
                .with_rotation(18.0)
                .with_fill(Fill::solid("C1666B").with_transparency(12))
                .with_line(Line::solid("C1666B").with_width(0.7))
                .with_shadow(Shadow::default()),
        );
        let xml = slide_xml(&slide, "en-US").unwrap();

        assert!(xml.contains("<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"1F1A17\"/>"));
        assert!(xml.contains("<a:xfrm rot=\"1080000\">"));
        assert!(xml.contains("<a:prstGeom prst=\"ellipse\">"));
        assert!(xml.contains("<p:cNvPr id=\"2\" name=\"Shape 2\"/>"));
        assert!(xml.contains("<a:alpha val=\"88000\"/>"));
        assert!(xml.contains("<a:ln w=\"8890\">"));
        assert!(xml.contains("blurRad=\"101600\" dist=\"38100\" dir=\"8100000\""));
        assert!(xml.contains("<a:alpha val=\"14000\"/>"));
    }

    #[test]
    fn test_text_xml() {
        let mut slide = Slide::new(SlideKind::Consensus, "FFFFFF");
        slide.add_text(TextBox::plain(
            Rect::new(0.55, 0.62, 8.8, 0.6),
            "Areas & Consensus",
            style().bold().align(Align::Center).line_spacing(1.1),
        ));
        let xml = slide_xml(&slide, "zh-CN").unwrap();

        assert!(xml.contains("<p:cNvSpPr txBox=\"1\"/>"));
        assert!(xml.contains("<a:pPr algn=\"ctr\">"));
        assert!(xml.contains("<a:spcPct val=\"110000\"/>"));
        assert!(xml.contains("lang=\"zh-CN\" sz=\"1600\" dirty=\"0\" b=\"1\""));
        assert!(xml.contains("<a:t>Areas &amp; Consensus</a:t>"));
        assert!(xml.contains("<a:latin typeface=\"Segoe UI\"/>"));
    }

    #[test]
    fn test_lists_and_empty_text() {
        let mut slide = Slide::new(SlideKind::Gaps, "FFFFFF");
        slide.add_text(TextBox::new(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            TextContent::Bullets(vec!["one".into(), "two".into()]),
            style().paragraph_spacing(6.0),
        ));
        slide.add_text(TextBox::new(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            TextContent::Numbered(vec!["first".into()]),
            style(),
        ));
        slide.add_text(TextBox::new(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            TextContent::Bullets(Vec::new()),
            style(),
        ));
        slide.add_text(TextBox::plain(Rect::new(0.0, 0.0, 1.0, 1.0), "", style()));
        let xml = slide_xml(&slide, "en-US").unwrap();

        assert_eq!(xml.matches("<a:buChar char=\"•\"/>").count(), 2);
        assert_eq!(xml.matches("<a:buAutoNum type=\"arabicPeriod\"/>").count(), 1);
        assert!(xml.contains("<a:spcPts val=\"600\"/>"));
        assert_eq!(xml.matches("<a:endParaRPr").count(), 2);
        assert_eq!(xml.matches("<a:p>").count(), 5);
    }
}
