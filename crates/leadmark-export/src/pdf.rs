//! PDF output
//!
//! [`PdfOpsExporter`] emits the text-showing operators of each page's content
//! stream. Resource names are fixed: `/F1` is Helvetica and `/F2` is
//! Helvetica-Bold. [`PdfExporter`] wraps those streams into a complete PDF
//! whose page resources map the two names to the standard Type1 fonts.

use std::fmt::Write;

use leadmark_core::{
    error::{ExportError, Result},
    traits::PageExporter,
    types::{DocumentLayout, GlyphStyle, PageLayout},
};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::num;

/// Font resource for regular runs
pub const REGULAR_FONT_RESOURCE: &str = "F1";
/// Font resource for emphasized runs
pub const EMPHASIZED_FONT_RESOURCE: &str = "F2";

const REGULAR_BASE_FONT: &str = "Helvetica";
const EMPHASIZED_BASE_FONT: &str = "Helvetica-Bold";

/// Content stream exporter
///
/// One `BT ... ET` block per run:
///
/// ```text
/// BT /F2 12 Tf 50 750 Td (He) Tj ET
/// BT /F1 12 Tf 63.34 750 Td (llo,) Tj ET
/// ```
#[derive(Debug, Default)]
pub struct PdfOpsExporter;

impl PdfOpsExporter {
    pub fn new() -> Self {
        Self
    }

    fn resource(style: GlyphStyle) -> &'static str {
        match style {
            GlyphStyle::Regular => REGULAR_FONT_RESOURCE,
            GlyphStyle::Emphasized => EMPHASIZED_FONT_RESOURCE,
        }
    }
}

impl PageExporter for PdfOpsExporter {
    fn name(&self) -> &'static str {
        "pdf-ops"
    }

    fn export_page(&self, page: &PageLayout) -> Result<Vec<u8>> {
        let size = num(page.font_size);
        let mut ops = String::new();
        for placement in &page.placements {
            writeln!(
                ops,
                "BT /{} {} Tf {} {} Td ({}) Tj ET",
                Self::resource(placement.run.style),
                size,
                num(placement.x),
                num(placement.y),
                escape_string(&placement.run.text)
            )
            .map_err(|e| ExportError::EncodingFailed(format!("content stream: {e}")))?;
        }
        Ok(ops.into_bytes())
    }

    /// Page streams in order, each introduced by a `% page N` comment
    fn export_document(&self, layout: &DocumentLayout) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for page in &layout.pages {
            out.extend_from_slice(format!("% page {}\n", page.page_index + 1).as_bytes());
            out.extend(self.export_page(page)?);
        }
        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "ops"
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }
}

/// Complete PDF documents
///
/// Every [`PageLayout`] becomes one page object with its own `MediaBox`; the
/// content streams come from [`PdfOpsExporter`]. Both fonts are standard
/// Type1 fonts with `WinAnsiEncoding`, so nothing is embedded.
#[derive(Debug, Default)]
pub struct PdfExporter {
    ops: PdfOpsExporter,
    compress: bool,
}

impl PdfExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flate-compress the content streams
    pub fn with_compression(mut self) -> Self {
        self.compress = true;
        self
    }

    fn build(&self, pages: &[PageLayout]) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular_id = standard_font(&mut doc, REGULAR_BASE_FONT);
        let emphasized_id = standard_font(&mut doc, EMPHASIZED_BASE_FONT);
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT_RESOURCE => regular_id,
                EMPHASIZED_FONT_RESOURCE => emphasized_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for page in pages {
            let content = self.ops.export_page(page)?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::string_literal("Leadmark"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        if self.compress {
            doc.compress();
        }

        let mut out = Vec::new();
        doc.save_to(&mut out)
            .map_err(|e| ExportError::EncodingFailed(format!("PDF: {e}")))?;
        log::debug!("PDF: wrote {} pages, {} bytes", pages.len(), out.len());
        Ok(out)
    }
}

fn standard_font(doc: &mut Document, base_font: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    })
}

impl PageExporter for PdfExporter {
    fn name(&self) -> &'static str {
        "pdf"
    }

    /// A one-page PDF
    fn export_page(&self, page: &PageLayout) -> Result<Vec<u8>> {
        self.build(std::slice::from_ref(page))
    }

    fn export_document(&self, layout: &DocumentLayout) -> Result<Vec<u8>> {
        self.build(&layout.pages)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }
}

/// Literal string body for a `Tj` operand
///
/// Backslash and parentheses are escaped; control characters and Latin-1
/// characters become octal escapes; anything the standard fonts cannot show
/// becomes `?`.
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            ' '..='~' => out.push(ch),
            _ if (ch as u32) < 0x100 => out.push_str(&format!("\\{:03o}", ch as u32)),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadmark_core::types::{Placement, StyledRun};

    fn page(page_index: usize) -> PageLayout {
        PageLayout {
            page_index,
            width: 612.0,
            height: 792.0,
            font_size: 12.0,
            placements: vec![
                Placement {
                    page_index,
                    line_index: 0,
                    x: 50.0,
                    y: 750.0,
                    run: StyledRun::new("He", GlyphStyle::Emphasized, 13.34),
                },
                Placement {
                    page_index,
                    line_index: 0,
                    x: 63.34,
                    y: 750.0,
                    run: StyledRun::new("llo,", GlyphStyle::Regular, 16.0),
                },
            ],
        }
    }

    #[test]
    fn test_page_operators() {
        let ops = String::from_utf8(PdfOpsExporter::new().export_page(&page(0)).unwrap()).unwrap();
        let lines: Vec<&str> = ops.lines().collect();
        assert_eq!(
            lines,
            vec![
                "BT /F2 12 Tf 50 750 Td (He) Tj ET",
                "BT /F1 12 Tf 63.34 750 Td (llo,) Tj ET",
            ]
        );
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("(hi)"), "\\(hi\\)");
        assert_eq!(escape_string("a\\b"), "a\\\\b");
        assert_eq!(escape_string("café"), "caf\\351");
        assert_eq!(escape_string("日本"), "??");
    }

    #[test]
    fn test_document_marks_pages() {
        let layout = DocumentLayout {
            pages: vec![page(0), page(1)],
        };
        let ops =
            String::from_utf8(PdfOpsExporter::new().export_document(&layout).unwrap()).unwrap();
        assert!(ops.starts_with("% page 1\nBT /F2"));
        assert!(ops.contains("% page 2\n"));
        assert_eq!(ops.matches(" Tj ET").count(), 4);
    }

    #[test]
    fn test_exporter_trait() {
        let exporter = PdfOpsExporter::new();
        assert_eq!(exporter.name(), "pdf-ops");
        assert_eq!(exporter.extension(), "ops");
    }

    fn blank_page(page_index: usize) -> PageLayout {
        PageLayout {
            placements: Vec::new(),
            ..page(page_index)
        }
    }

    #[test]
    fn test_pdf_one_page_per_layout() {
        let layout = DocumentLayout {
            pages: vec![page(0), blank_page(1), page(2)],
        };
        let bytes = PdfExporter::new().export_document(&layout).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 3);

        let first = doc.get_page_content(pages[&1]).unwrap();
        let first = String::from_utf8(first).unwrap();
        assert!(first.contains("BT /F2 12 Tf 50 750 Td (He) Tj ET"));
        assert!(first.contains("BT /F1 12 Tf 63.34 750 Td (llo,) Tj ET"));
        assert!(doc.get_page_content(pages[&2]).unwrap().is_empty());
    }

    #[test]
    fn test_pdf_fonts_and_page_box() {
        let bytes = PdfExporter::new().export_page(&page(0)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        let mut fonts: Vec<Vec<u8>> = doc
            .objects
            .values()
            .filter_map(|object| object.as_dict().ok())
            .filter_map(|dict| dict.get(b"BaseFont").ok()?.as_name().ok().map(<[u8]>::to_vec))
            .collect();
        fonts.sort();
        assert_eq!(fonts, vec![b"Helvetica".to_vec(), b"Helvetica-Bold".to_vec()]);

        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let media_box = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_float().unwrap())
            .collect::<Vec<f32>>();
        assert_eq!(media_box, vec![0.0, 0.0, 612.0, 792.0]);
    }

    #[test]
    fn test_pdf_compressed_still_readable() {
        let layout = DocumentLayout {
            pages: vec![page(0)],
        };
        let bytes = PdfExporter::new().with_compression().export_document(&layout).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        assert!(String::from_utf8(content).unwrap().contains("(He) Tj"));
    }

    #[test]
    fn test_pdf_empty_document() {
        let bytes = PdfExporter::new().export_document(&DocumentLayout::default()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().is_empty());
    }
}
