//! JSON export format
//!
//! One object per page listing every placed run. A whole document becomes an
//! array of those objects.

use leadmark_core::{
    error::{ExportError, Result},
    traits::PageExporter,
    types::{DocumentLayout, PageLayout},
};
use serde::{Deserialize, Serialize};

/// JSON exporter for page layouts
///
/// # Examples
///
/// ```ignore
/// use leadmark_export::JsonExporter;
///
/// let exporter = JsonExporter::with_pretty_print();
/// let json = exporter.export_document(&layout)?;
/// println!("{}", String::from_utf8_lossy(&json));
/// ```
pub struct JsonExporter {
    /// Whether to pretty-print the JSON
    pretty: bool,
}

impl JsonExporter {
    /// Create a new JSON exporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a JSON exporter with pretty-printing enabled
    pub fn with_pretty_print() -> Self {
        Self { pretty: true }
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let json = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;
        Ok(json)
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageExporter for JsonExporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn export_page(&self, page: &PageLayout) -> Result<Vec<u8>> {
        self.encode(&JsonPage::from(page))
    }

    fn export_document(&self, layout: &DocumentLayout) -> Result<Vec<u8>> {
        let pages: Vec<JsonPage> = layout.pages.iter().map(JsonPage::from).collect();
        self.encode(&pages)
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }
}

/// Serialized form of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonPage {
    pub page: usize,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub runs: Vec<JsonRun>,
}

/// Serialized form of one placed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRun {
    pub text: String,
    pub emphasized: bool,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub line: usize,
}

impl From<&PageLayout> for JsonPage {
    fn from(page: &PageLayout) -> Self {
        Self {
            page: page.page_index,
            width: page.width,
            height: page.height,
            font_size: page.font_size,
            runs: page
                .placements
                .iter()
                .map(|p| JsonRun {
                    text: p.run.text.clone(),
                    emphasized: p.run.style.is_emphasized(),
                    x: p.x,
                    y: p.y,
                    width: p.run.width,
                    line: p.line_index,
                })
                .collect(),
        }
    }
}
