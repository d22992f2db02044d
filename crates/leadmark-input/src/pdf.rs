//! Page text pulled out of an existing PDF

use std::path::Path;

use leadmark_core::{
    error::{Result, SourceError},
    traits::TextSource,
};
use lopdf::Document;

/// Text of every page of a PDF, extracted up front
///
/// Extraction follows the page tree order. A page whose text cannot be
/// decoded fails the whole load rather than coming back blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfTextSource {
    pages: Vec<String>,
}

impl PdfTextSource {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| SourceError::UnreadableDocument(e.to_string()))?;
        if doc.is_encrypted() {
            return Err(SourceError::UnreadableDocument("encrypted PDF".into()).into());
        }

        let mut pages = Vec::new();
        for page_no in doc.get_pages().into_keys() {
            let text = doc.extract_text(&[page_no]).map_err(|e| {
                SourceError::UnreadableDocument(format!("page {page_no}: {e}"))
            })?;
            pages.push(text);
        }

        log::debug!("Extracted text from {} PDF pages", pages.len());
        Ok(Self { pages })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Reading PDF from {}", path.display());
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }
}

impl TextSource for PdfTextSource {
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

#[cfg(test)]
mod tests {
    use super::*;
    use leadmark_core::LeadmarkError;
    use lopdf::{dictionary, Object, Stream};

    fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in texts {
            let content = format!("BT /F1 12 Tf 50 750 Td ({text}) Tj ET").into_bytes();
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pages_in_order() {
        let source = PdfTextSource::from_bytes(&pdf_with_pages(&["Hello world", "Second page"]))
            .unwrap();
        assert_eq!(source.page_count(), 2);
        assert!(source.extract_page_text(0).unwrap().contains("Hello world"));
        assert!(source.extract_page_text(1).unwrap().contains("Second page"));
    }

    #[test]
    fn test_out_of_range() {
        let source = PdfTextSource::from_bytes(&pdf_with_pages(&["only"])).unwrap();
        assert!(matches!(
            source.extract_page_text(1).unwrap_err(),
            LeadmarkError::Source(SourceError::PageOutOfRange { page: 1, count: 1 })
        ));
    }

    #[test]
    fn test_not_a_pdf() {
        let err = PdfTextSource::from_bytes(b"plain words, no PDF here").unwrap_err();
        assert!(matches!(
            err,
            LeadmarkError::Source(SourceError::UnreadableDocument(_))
        ));
    }
}
