//! Package-level parts: content types, relationships, presentation,
//! slide master, slide layout, theme and document properties.
//!
//! The master and layout are blank; every visible element lives on the
//! slides themselves.

use crate::xml::{ns, XmlOut};
use deck_core::{Deck, Result};

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// English Metric Units per point.
pub const EMU_PER_POINT: f64 = 12_700.0;

pub const PRESENTATION: &str = "ppt/presentation.xml";
pub const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
pub const MASTER: &str = "ppt/slideMasters/slideMaster1.xml";
pub const MASTER_RELS: &str = "ppt/slideMasters/_rels/slideMaster1.xml.rels";
pub const LAYOUT: &str = "ppt/slideLayouts/slideLayout1.xml";
pub const LAYOUT_RELS: &str = "ppt/slideLayouts/_rels/slideLayout1.xml.rels";
pub const THEME: &str = "ppt/theme/theme1.xml";
pub const CORE_PROPS: &str = "docProps/core.xml";
pub const APP_PROPS: &str = "docProps/app.xml";
pub const CONTENT_TYPES: &str = "[Content_Types].xml";
pub const ROOT_RELS: &str = "_rels/.rels";

mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const APP_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
}

mod content_types {
    pub const PRESENTATION: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const SLIDE_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const SLIDE_LAYOUT: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const APP_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
    pub const RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
}

/// Relationship id of the first slide in `presentation.xml.rels`
/// (`rId1` is the master, `rId2` the theme).
const FIRST_SLIDE_REL: usize = 3;

/// Convert inches to EMU.
pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Zip path of a 1-based slide.
pub fn slide_path(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}

/// Zip path of a 1-based slide's relationships.
pub fn slide_rels_path(number: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", number)
}

pub fn content_types(slide_count: usize) -> Result<String> {
    let mut x = XmlOut::new()?;
    x.open("Types", &[("xmlns", ns::CONTENT_TYPES)])?;
    x.empty("Default", &[("Extension", "rels"), ("ContentType", content_types::RELS)])?;
    x.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;

    let overrides = [
        (PRESENTATION, content_types::PRESENTATION),
        (MASTER, content_types::SLIDE_MASTER),
        (LAYOUT, content_types::SLIDE_LAYOUT),
        (THEME, content_types::THEME),
        (CORE_PROPS, content_types::CORE_PROPS),
        (APP_PROPS, content_types::APP_PROPS),
    ];
    for (part, content_type) in overrides {
        x.empty(
            "Override",
            &[("PartName", format!("/{}", part).as_str()), ("ContentType", content_type)],
        )?;
    }
    for n in 1..=slide_count {
        x.empty(
            "Override",
            &[
                ("PartName", format!("/{}", slide_path(n)).as_str()),
                ("ContentType", content_types::SLIDE),
            ],
        )?;
    }

    x.close("Types")?;
    x.finish()
}

/// A relationships part from `(id, type, target)` triples.
fn relationships(rels: &[(String, &str, String)]) -> Result<String> {
    let mut x = XmlOut::new()?;
    x.open("Relationships", &[("xmlns", ns::PACKAGE_RELS)])?;
    for (id, rel_type, target) in rels {
        x.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", *rel_type), ("Target", target.as_str())],
        )?;
    }
    x.close("Relationships")?;
    x.finish()
}

pub fn root_rels() -> Result<String> {
    relationships(&[
        ("rId1".into(), rel_types::OFFICE_DOCUMENT, PRESENTATION.into()),
        ("rId2".into(), rel_types::CORE_PROPS, CORE_PROPS.into()),
        ("rId3".into(), rel_types::APP_PROPS, APP_PROPS.into()),
    ])
}

pub fn presentation_rels(slide_count: usize) -> Result<String> {
    let mut rels = vec![
        (
            "rId1".to_string(),
            rel_types::SLIDE_MASTER,
            "slideMasters/slideMaster1.xml".to_string(),
        ),
        ("rId2".to_string(), rel_types::THEME, "theme/theme1.xml".to_string()),
    ];
    for n in 1..=slide_count {
        rels.push((
            format!("rId{}", n + FIRST_SLIDE_REL - 1),
            rel_types::SLIDE,
            format!("slides/slide{}.xml", n),
        ));
    }
    relationships(&rels)
}

pub fn master_rels() -> Result<String> {
    relationships(&[
        ("rId1".into(), rel_types::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml".into()),
        ("rId2".into(), rel_types::THEME, "../theme/theme1.xml".into()),
    ])
}

pub fn layout_rels() -> Result<String> {
    relationships(&[(
        "rId1".into(),
        rel_types::SLIDE_MASTER,
        "../slideMasters/slideMaster1.xml".into(),
    )])
}

pub fn slide_rels() -> Result<String> {
    relationships(&[(
        "rId1".into(),
        rel_types::SLIDE_LAYOUT,
        "../slideLayouts/slideLayout1.xml".into(),
    )])
}

pub fn presentation(deck: &Deck) -> Result<String> {
    let mut x = XmlOut::new()?;
    x.open(
        "p:presentation",
        &[("xmlns:a", ns::A), ("xmlns:r", ns::R), ("xmlns:p", ns::P), ("saveSubsetFonts", "1")],
    )?;

    x.open("p:sldMasterIdLst", &[])?;
    x.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    x.close("p:sldMasterIdLst")?;

    x.open("p:sldIdLst", &[])?;
    for n in 0..deck.slides.len() {
        x.empty(
            "p:sldId",
            &[
                ("id", (256 + n).to_string().as_str()),
                ("r:id", format!("rId{}", n + FIRST_SLIDE_REL).as_str()),
            ],
        )?;
    }
    x.close("p:sldIdLst")?;

    x.empty(
        "p:sldSz",
        &[
            ("cx", emu(deck.width).to_string().as_str()),
            ("cy", emu(deck.height).to_string().as_str()),
        ],
    )?;
    x.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    x.close("p:presentation")?;
    x.finish()
}

/// `<p:spTree>` header shared by master, layout and slides.
pub fn open_shape_tree(x: &mut XmlOut) -> Result<()> {
    x.open("p:spTree", &[])?;
    x.open("p:nvGrpSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    x.empty("p:cNvGrpSpPr", &[])?;
    x.empty("p:nvPr", &[])?;
    x.close("p:nvGrpSpPr")?;
    x.open("p:grpSpPr", &[])?;
    x.open("a:xfrm", &[])?;
    x.empty("a:off", &[("x", "0"), ("y", "0")])?;
    x.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    x.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    x.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    x.close("a:xfrm")?;
    x.close("p:grpSpPr")
}

pub fn slide_master() -> Result<String> {
    let mut x = XmlOut::new()?;
    x.open("p:sldMaster", &[("xmlns:a", ns::A), ("xmlns:r", ns::R), ("xmlns:p", ns::P)])?;
    x.open("p:cSld", &[])?;
    x.open("p:bg", &[])?;
    x.open("p:bgRef", &[("idx", "1001")])?;
    x.empty("a:schemeClr", &[("val", "bg1")])?;
    x.close("p:bgRef")?;
    x.close("p:bg")?;
    open_shape_tree(&mut x)?;
    x.close("p:spTree")?;
    x.close("p:cSld")?;

    x.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;

    x.open("p:sldLayoutIdLst", &[])?;
    x.empty("p:sldLayoutId", &[("id", "2147483649"), ("r:id", "rId1")])?;
    x.close("p:sldLayoutIdLst")?;

    x.open("p:txStyles", &[])?;
    x.empty("p:titleStyle", &[])?;
    x.empty("p:bodyStyle", &[])?;
    x.empty("p:otherStyle", &[])?;
    x.close("p:txStyles")?;

    x.close("p:sldMaster")?;
    x.finish()
}

pub fn slide_layout() -> Result<String> {
    let mut x = XmlOut::new()?;
    x.open(
        "p:sldLayout",
        &[
            ("xmlns:a", ns::A),
            ("xmlns:r", ns::R),
            ("xmlns:p", ns::P),
            ("type", "blank"),
            ("preserve", "1"),
        ],
    )?;
    x.open("p:cSld", &[("name", "Blank")])?;
    open_shape_tree(&mut x)?;
    x.close("p:spTree")?;
    x.close("p:cSld")?;
    x.open("p:clrMapOvr", &[])?;
    x.empty("a:masterClrMapping", &[])?;
    x.close("p:clrMapOvr")?;
    x.close("p:sldLayout")?;
    x.finish()
}

/// Theme part carrying the deck palette and fonts, so text typed into the
/// deck later picks up the same look.
pub fn theme(deck: &Deck) -> Result<String> {
    let palette = &deck.palette;
    let name = deck.theme_name.as_str();
    let mut x = XmlOut::new()?;
    x.open("a:theme", &[("xmlns:a", ns::A), ("name", name)])?;
    x.open("a:themeElements", &[])?;

    x.open("a:clrScheme", &[("name", name)])?;
    let scheme = [
        ("a:dk1", palette.text.as_str()),
        ("a:lt1", "FFFFFF"),
        ("a:dk2", palette.dark.as_str()),
        ("a:lt2", palette.background.as_str()),
        ("a:accent1", palette.accent1.as_str()),
        ("a:accent2", palette.accent2.as_str()),
        ("a:accent3", palette.card.as_str()),
        ("a:accent4", palette.background_text.as_str()),
        ("a:accent5", palette.text.as_str()),
        ("a:accent6", palette.dark.as_str()),
        ("a:hlink", palette.accent2.as_str()),
        ("a:folHlink", palette.accent1.as_str()),
    ];
    for (slot, color) in scheme {
        x.open(slot, &[])?;
        x.srgb(color, 0)?;
        x.close(slot)?;
    }
    x.close("a:clrScheme")?;

    x.open("a:fontScheme", &[("name", name)])?;
    let faces = [
        ("a:majorFont", deck.fonts.header.as_str()),
        ("a:minorFont", deck.fonts.body.as_str()),
    ];
    for (group, face) in faces {
        x.open(group, &[])?;
        x.empty("a:latin", &[("typeface", face)])?;
        x.empty("a:ea", &[("typeface", "")])?;
        x.empty("a:cs", &[("typeface", "")])?;
        x.close(group)?;
    }
    x.close("a:fontScheme")?;

    x.open("a:fmtScheme", &[("name", name)])?;
    x.open("a:fillStyleLst", &[])?;
    for _ in 0..3 {
        phantom_fill(&mut x)?;
    }
    x.close("a:fillStyleLst")?;
    x.open("a:lnStyleLst", &[])?;
    for width in ["6350", "12700", "19050"] {
        x.open("a:ln", &[("w", width)])?;
        phantom_fill(&mut x)?;
        x.close("a:ln")?;
    }
    x.close("a:lnStyleLst")?;
    x.open("a:effectStyleLst", &[])?;
    for _ in 0..3 {
        x.open("a:effectStyle", &[])?;
        x.empty("a:effectLst", &[])?;
        x.close("a:effectStyle")?;
    }
    x.close("a:effectStyleLst")?;
    x.open("a:bgFillStyleLst", &[])?;
    for _ in 0..3 {
        phantom_fill(&mut x)?;
    }
    x.close("a:bgFillStyleLst")?;
    x.close("a:fmtScheme")?;

    x.close("a:themeElements")?;
    x.close("a:theme")?;
    x.finish()
}

/// `<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>`
fn phantom_fill(x: &mut XmlOut) -> Result<()> {
    x.open("a:solidFill", &[])?;
    x.empty("a:schemeClr", &[("val", "phClr")])?;
    x.close("a:solidFill")
}

pub fn core_props(deck: &Deck) -> Result<String> {
    let mut x = XmlOut::new()?;
    x.open(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    x.text_element("dc:title", &[], &deck.title)?;
    x.text_element("dc:subject", &[], &deck.subject)?;
    x.text_element("dc:creator", &[], &deck.author)?;
    x.text_element("dc:language", &[], &deck.language)?;
    x.close("cp:coreProperties")?;
    x.finish()
}

pub fn app_props(deck: &Deck) -> Result<String> {
    let mut x = XmlOut::new()?;
    x.open(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    x.text_element("Application", &[], "research-deck")?;
    x.text_element("PresentationFormat", &[], "On-screen Show (16:9)")?;
    x.text_element("Slides", &[], &deck.slides.len().to_string())?;
    x.close("Properties")?;
    x.finish()
}
