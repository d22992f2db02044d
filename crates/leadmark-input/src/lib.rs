//! Page text sources for Leadmark
//!
//! The engine only needs the text of each page, in order. This crate reads
//! it from PDFs directly, or from plain text where pages are separated by
//! form feeds, which is what `pdftotext` and most text extractors emit.

use std::path::Path;

use leadmark_core::{
    error::{Result, SourceError},
    traits::TextSource,
};

pub mod pdf;

pub use pdf::PdfTextSource;

/// Open `path` as a PDF when its extension says so, as plain text otherwise
pub fn open(path: impl AsRef<Path>) -> Result<Box<dyn TextSource>> {
    let path = path.as_ref();
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Ok(Box::new(PdfTextSource::from_path(path)?))
    } else {
        Ok(Box::new(PlainTextSource::from_path(path)?))
    }
}

/// Separator between pages
pub const PAGE_SEPARATOR: char = '\x0C';

/// A document held in memory as one string per page
///
/// ```
/// use leadmark_core::TextSource;
/// use leadmark_input::PlainTextSource;
///
/// let source = PlainTextSource::from_text("first page\x0Csecond page\x0C");
/// assert_eq!(source.page_count(), 2);
/// assert_eq!(source.extract_page_text(1).unwrap(), "second page");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainTextSource {
    pages: Vec<String>,
}

impl PlainTextSource {
    /// Split `text` into pages
    ///
    /// `\r\n` becomes `\n`. A separator at the very end does not open a new
    /// page, and empty text has no pages at all.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        let normalized = text.replace("\r\n", "\n");
        let body = normalized
            .strip_suffix(PAGE_SEPARATOR)
            .unwrap_or(&normalized);
        let pages: Vec<String> = body.split(PAGE_SEPARATOR).map(str::to_owned).collect();

        log::debug!("Split text into {} pages", pages.len());
        Self { pages }
    }

    /// Decode UTF-8 bytes, then split into pages
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| SourceError::InvalidEncoding(e.to_string()))?;
        Ok(Self::from_text(text))
    }

    /// Read a UTF-8 text file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Reading page text from {}", path.display());
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Use pages that were split elsewhere
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }
}

impl TextSource for PlainTextSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extract_page_text(&self, page: usize) -> Result<String> {
        self.pages.get(page).cloned().ok_or_else(|| {
            SourceError::PageOutOfRange {
                page,
                count: self.pages.len(),
            }
            .into()
        })
    }
}
