//! Reflow one input file into one output file

use std::path::Path;
use std::sync::Arc;

use leadmark_core::{
    error::{ExportError, LeadmarkError, Result},
    traits::GlyphMetrics,
    LayoutConfig, Pipeline, SourcePageBreak,
};
use leadmark_metrics_base14::Base14Metrics;

use crate::cli::Args;

/// What a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub source_pages: usize,
    pub output_pages: usize,
    pub format: &'static str,
    pub bytes: usize,
}

pub fn run(args: &Args) -> Result<Summary> {
    let config = build_config(args)?;
    let source = leadmark_input::open(&args.input)?;
    let pages = (0..source.page_count())
        .map(|page| source.extract_page_text(page))
        .collect::<Result<Vec<String>>>()?;
    let format = args.export_format();
    let exporter = format.exporter(args.pretty);

    let metrics: Arc<dyn GlyphMetrics> = if args.strict_metrics {
        Arc::new(Base14Metrics::strict())
    } else {
        Arc::new(Base14Metrics::new())
    };
    let pipeline = Pipeline::builder()
        .metrics(metrics)
        .enable_metrics_cache(!args.no_metrics_cache)
        .build()?;

    log::info!(
        "Reflowing {} ({} pages), emphasis {}, format {}",
        args.input.display(),
        pages.len(),
        args.emphasis_count,
        format.name()
    );

    let layout = pipeline.layout(&pages, args.emphasis_count, &config)?;
    let bytes = exporter.export_document(&layout)?;
    std::fs::write(&args.output, &bytes).map_err(|e| {
        ExportError::WriteFailed(format!("{}: {}", args.output.display(), e))
    })?;

    if let Some(cache) = pipeline.metrics_cache() {
        let stats = cache.stats();
        log::debug!(
            "Metrics cache: {} hits, {} misses ({:.1}%)",
            stats.hits,
            stats.misses,
            stats.hit_rate * 100.0
        );
    }

    Ok(Summary {
        source_pages: pages.len(),
        output_pages: layout.page_count(),
        format: format.name(),
        bytes: bytes.len(),
    })
}

/// Defaults, then the `--config` file, then individual flags
pub fn build_config(args: &Args) -> Result<LayoutConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => LayoutConfig::default(),
    };

    if let Some(size) = args.font_size {
        config.font_size = size;
    }
    if let Some(height) = args.line_height {
        config.line_height = height;
    }
    if let Some(spacing) = args.paragraph_spacing {
        config.paragraph_spacing = spacing;
    }
    if args.continue_pages {
        config.source_page_break = SourcePageBreak::Continue;
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<LayoutConfig> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
        LeadmarkError::InvalidConfiguration(format!("{}: {}", path.display(), e))
    })
}
