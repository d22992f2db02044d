//! The contracts the layout engine consumes
//!
//! The engine never measures glyphs, reads documents or writes files itself.
//! Each of those jobs sits behind one of these traits so backends can be
//! swapped without touching the stages.
//!
//! - [`GlyphMetrics`] - Width of a styled run at a font size
//! - [`TextSource`] - Raw text of each source page
//! - [`PageExporter`] - Serialized form of laid-out pages

use crate::{
    error::{MetricsError, Result},
    types::{DocumentLayout, GlyphStyle, PageLayout},
};

/// Where runs learn how wide they are
///
/// Implementations must be a pure function of `(text, style, font_size)`:
/// the wrapper and paginator only stay deterministic if the same run always
/// measures the same.
///
/// ```ignore
/// struct Fixed;
///
/// impl GlyphMetrics for Fixed {
///     fn name(&self) -> &'static str {
///         "fixed"
///     }
///
///     fn measure_width(&self, text: &str, _style: GlyphStyle, font_size: f32)
///         -> Result<f32, MetricsError>
///     {
///         Ok(text.chars().count() as f32 * font_size * 0.5)
///     }
/// }
/// ```
pub trait GlyphMetrics: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Rendered width of `text` drawn in `style` at `font_size` points
    fn measure_width(
        &self,
        text: &str,
        style: GlyphStyle,
        font_size: f32,
    ) -> std::result::Result<f32, MetricsError>;

    /// Flush any cached widths
    fn clear_cache(&self) {}
}

/// Where the raw page text comes from
pub trait TextSource: Send + Sync {
    /// Number of pages the source holds
    fn page_count(&self) -> usize;

    /// Raw text of page `page` (0-based), paragraphs separated by `\n`
    fn extract_page_text(&self, page: usize) -> Result<String>;
}

/// The final step: placements become bytes
pub trait PageExporter: Send + Sync {
    /// Who are you?
    fn name(&self) -> &'static str;

    /// Encode one laid-out page
    fn export_page(&self, page: &PageLayout) -> Result<Vec<u8>>;

    /// Encode a whole document as a single payload
    ///
    /// The default exports every page and concatenates them in order.
    /// Formats with a document-level container override this.
    fn export_document(&self, layout: &DocumentLayout) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for page in &layout.pages {
            out.extend(self.export_page(page)?);
        }
        Ok(out)
    }

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    /// What MIME type identifies your format?
    fn mime_type(&self) -> &'static str;
}
