//! SVG export format
//!
//! Draws every placed run as its own `<text>` element. Placements measure y
//! up from the bottom edge; SVG measures down from the top, so y is flipped
//! against the page height.

use std::fmt::{self, Write};

use leadmark_core::{
    error::{ExportError, Result},
    traits::PageExporter,
    types::{DocumentLayout, PageLayout},
};

use crate::num;

const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// SVG exporter for page layouts
///
/// # Examples
///
/// ```ignore
/// use leadmark_export::SvgExporter;
///
/// let exporter = SvgExporter::new();
/// let svg_data = exporter.export_page(&layout.pages[0])?;
/// std::fs::write("page-1.svg", svg_data)?;
/// ```
pub struct SvgExporter {
    /// Vertical gap between pages of a stacked document
    page_gap: f32,
    /// Paint a white page rectangle behind the text
    background: bool,
}

impl SvgExporter {
    /// Create a new SVG exporter
    pub fn new() -> Self {
        Self {
            page_gap: 20.0,
            background: true,
        }
    }

    /// Leave the page transparent
    pub fn without_background(mut self) -> Self {
        self.background = false;
        self
    }

    /// Gap between stacked pages in [`export_document`](PageExporter::export_document)
    pub fn with_page_gap(mut self, gap: f32) -> Self {
        self.page_gap = gap.max(0.0);
        self
    }

    fn write_page(&self, svg: &mut String, page: &PageLayout, offset: f32) -> fmt::Result {
        writeln!(
            svg,
            r#"  <g id="page-{}" transform="translate(0 {})">"#,
            page.page_index + 1,
            num(offset)
        )?;
        if self.background {
            writeln!(
                svg,
                r#"    <rect width="{}" height="{}" fill="white" stroke="lightgray"/>"#,
                num(page.width),
                num(page.height)
            )?;
        }
        for placement in &page.placements {
            let weight = if placement.run.style.is_emphasized() {
                r#" font-weight="bold""#
            } else {
                ""
            };
            writeln!(
                svg,
                r#"    <text x="{}" y="{}"{}>{}</text>"#,
                num(placement.x),
                num(page.height - placement.y),
                weight,
                escape(&placement.run.text)
            )?;
        }
        svg.push_str("  </g>\n");
        Ok(())
    }

    fn open_svg(svg: &mut String, width: f32, height: f32, font_size: f32) -> fmt::Result {
        svg.push_str(XML_PROLOG);
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{FONT_FAMILY}" font-size="{s}" xml:space="preserve">"#,
            w = num(width),
            h = num(height),
            s = num(font_size),
        )
    }
}

fn encoding(e: fmt::Error) -> ExportError {
    ExportError::EncodingFailed(format!("SVG: {e}"))
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageExporter for SvgExporter {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn export_page(&self, page: &PageLayout) -> Result<Vec<u8>> {
        let mut svg = String::new();
        Self::open_svg(&mut svg, page.width, page.height, page.font_size).map_err(encoding)?;
        self.write_page(&mut svg, page, 0.0).map_err(encoding)?;
        svg.push_str("</svg>\n");
        Ok(svg.into_bytes())
    }

    /// All pages in one drawing, top to bottom
    fn export_document(&self, layout: &DocumentLayout) -> Result<Vec<u8>> {
        let width = layout.pages.iter().map(|p| p.width).fold(0.0, f32::max);
        let height = layout.pages.iter().map(|p| p.height).sum::<f32>()
            + self.page_gap * layout.page_count().saturating_sub(1) as f32;
        let font_size = layout.pages.first().map_or(12.0, |p| p.font_size);

        let mut svg = String::new();
        Self::open_svg(&mut svg, width, height, font_size).map_err(encoding)?;
        let mut offset = 0.0;
        for page in &layout.pages {
            self.write_page(&mut svg, page, offset).map_err(encoding)?;
            offset += page.height + self.page_gap;
        }
        svg.push_str("</svg>\n");

        log::debug!("SVG: stacked {} pages", layout.page_count());
        Ok(svg.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "svg"
    }

    fn mime_type(&self) -> &'static str {
        "image/svg+xml"
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
