//! Export module for Leadmark
//!
//! Turns laid-out pages into bytes: PDF documents, JSON for tooling, SVG for
//! looking at, and bare PDF content-stream operators for feeding another PDF
//! writer.

use std::path::Path;
use std::sync::Arc;

use leadmark_core::traits::PageExporter;

pub mod json;
pub mod pdf;
pub mod svg;

pub use json::JsonExporter;
pub use pdf::{PdfExporter, PdfOpsExporter};
pub use svg::SvgExporter;

/// The output formats this crate can write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Svg,
    Pdf,
    PdfOps,
}

impl ExportFormat {
    /// Guess the format from a file extension, case-insensitively
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "svg" => Some(Self::Svg),
            "pdf" => Some(Self::Pdf),
            "ops" | "pdfops" => Some(Self::PdfOps),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::PdfOps => "pdf-ops",
        }
    }

    /// A ready exporter for this format
    ///
    /// `pretty` only affects JSON.
    pub fn exporter(self, pretty: bool) -> Arc<dyn PageExporter> {
        match self {
            Self::Json if pretty => Arc::new(JsonExporter::with_pretty_print()),
            Self::Json => Arc::new(JsonExporter::new()),
            Self::Svg => Arc::new(SvgExporter::new()),
            Self::Pdf => Arc::new(PdfExporter::new().with_compression()),
            Self::PdfOps => Arc::new(PdfOpsExporter::new()),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "pdf-ops" | "pdfops" | "ops" => Ok(Self::PdfOps),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Coordinates with at most two decimals and no trailing zeros
pub(crate) fn num(value: f32) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path("out.json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_path("OUT.SVG"), Some(ExportFormat::Svg));
        assert_eq!(ExportFormat::from_path("page.ops"), Some(ExportFormat::PdfOps));
        assert_eq!(ExportFormat::from_path("out.pdf"), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::from_path("Out.PDF"), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::from_path("out"), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("pdf-ops".parse::<ExportFormat>(), Ok(ExportFormat::PdfOps));
        assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert_eq!("pdf".parse::<ExportFormat>(), Ok(ExportFormat::Pdf));
        assert!("png".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_exporter_matches_format() {
        for format in [
            ExportFormat::Json,
            ExportFormat::Svg,
            ExportFormat::Pdf,
            ExportFormat::PdfOps,
        ] {
            assert_eq!(format.exporter(false).name(), format.name());
        }
    }

    #[test]
    fn test_num_format() {
        assert_eq!(num(50.0), "50");
        assert_eq!(num(100.0), "100");
        assert_eq!(num(3.336), "3.34");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(12.5), "12.5");
    }
}
