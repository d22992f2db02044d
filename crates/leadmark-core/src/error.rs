//! Error types for Leadmark

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeadmarkError>;

/// Main error type for Leadmark
///
/// Only two kinds come out of the layout engine itself:
/// [`InvalidConfiguration`](Self::InvalidConfiguration), raised before any
/// layout work starts, and [`MetricsFailure`](Self::MetricsFailure), raised
/// the moment a width lookup fails. The rest belong to the collaborators
/// around the engine.
#[derive(Debug, Error)]
pub enum LeadmarkError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Measuring {text:?} failed: {source}")]
    MetricsFailure {
        text: String,
        #[source]
        source: MetricsError,
    },

    #[error("Text extraction failed: {0}")]
    Source(#[from] SourceError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LeadmarkError {
    /// Attach the run text a metrics backend choked on
    pub fn metrics(text: impl Into<String>, source: MetricsError) -> Self {
        Self::MetricsFailure {
            text: text.into(),
            source,
        }
    }
}

/// Glyph metrics errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("No advance width for character {0:?}")]
    UnsupportedCharacter(char),

    #[error("Invalid font size: {0}")]
    InvalidFontSize(f32),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Text extraction errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: usize, count: usize },

    #[error("Invalid text encoding: {0}")]
    InvalidEncoding(String),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
