//! The driver that takes page text through all four stages

// this_file: crates/leadmark-core/src/pipeline.rs

use std::sync::Arc;

use crate::{
    cache_config,
    config::{LayoutConfig, SourcePageBreak},
    error::{LeadmarkError, Result},
    markup,
    metrics_cache::{CachedMetrics, MetricsCache, SharedMetricsCache},
    paginate::LayoutSession,
    segment,
    traits::{GlyphMetrics, PageExporter, TextSource},
    types::{DocumentLayout, GlyphStyle},
    wrap,
};

/// Pipeline for page reflow: Markup → Segment → Wrap → Paginate → Export
///
/// ```ignore
/// use leadmark_core::{LayoutConfig, Pipeline};
///
/// let pipeline = Pipeline::builder()
///     .metrics(Arc::new(Base14Metrics::new()))
///     .exporter(Arc::new(JsonExporter::new()))
///     .build()?;
///
/// let pages = pipeline.process(&["Some page text"], 2, &LayoutConfig::default())?;
/// ```
///
/// Each call owns its own pagination cursor, so one pipeline can serve many
/// documents, concurrently if need be. Pages of a single document are always
/// laid out in order.
pub struct Pipeline {
    metrics: Option<Arc<dyn GlyphMetrics>>,
    exporter: Option<Arc<dyn PageExporter>>,
    metrics_cache: Option<SharedMetricsCache>,
}

impl Pipeline {
    /// Start building a new pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The metrics cache in use, if caching is on
    pub fn metrics_cache(&self) -> Option<&SharedMetricsCache> {
        self.metrics_cache.as_ref()
    }

    /// Lay out `pages` and stop short of exporting
    ///
    /// Each entry of `pages` is the raw text of one source page, paragraphs
    /// separated by newlines. The configuration is checked before any work.
    pub fn layout<S: AsRef<str>>(
        &self,
        pages: &[S],
        emphasis_count: usize,
        config: &LayoutConfig,
    ) -> Result<DocumentLayout> {
        config.validate()?;
        let metrics = self
            .metrics
            .as_ref()
            .ok_or_else(|| LeadmarkError::Pipeline("No metrics backend configured".into()))?;

        let font_size = config.font_size;
        let max_width = config.max_width();
        let space_width = metrics
            .measure_width(" ", GlyphStyle::Regular, font_size)
            .map_err(|e| LeadmarkError::metrics(" ", e))?;

        log::debug!(
            "Laying out {} source pages with metrics backend: {}",
            pages.len(),
            metrics.name()
        );

        let fresh = config.source_page_break == SourcePageBreak::Fresh;
        let mut session = LayoutSession::new(config);
        for (page_no, text) in pages.iter().enumerate() {
            if page_no > 0 && fresh {
                session.break_page();
            }
            for paragraph in text.as_ref().lines() {
                let marked = markup::transform(paragraph, emphasis_count);
                if marked.is_empty() {
                    continue;
                }
                let words = segment::segment_paragraph(&marked, metrics.as_ref(), font_size)?;
                let lines = wrap::wrap(words, max_width, space_width);
                session.push_paragraph(&lines);
            }
            if fresh {
                session.hold_page();
            }
        }

        let page_count = session.page_count();
        let layout = DocumentLayout::with_page_count(
            session.finish(),
            page_count,
            config.page_width,
            config.page_height,
            font_size,
        );
        log::debug!("Produced {} output pages", layout.page_count());
        Ok(layout)
    }

    /// Lay out `pages` and export every output page
    pub fn process<S: AsRef<str>>(
        &self,
        pages: &[S],
        emphasis_count: usize,
        config: &LayoutConfig,
    ) -> Result<Vec<Vec<u8>>> {
        let exporter = self
            .exporter
            .as_ref()
            .ok_or_else(|| LeadmarkError::Pipeline("No exporter configured".into()))?;

        let layout = self.layout(pages, emphasis_count, config)?;

        log::debug!("Exporting with backend: {}", exporter.name());
        layout
            .pages
            .iter()
            .map(|page| exporter.export_page(page))
            .collect()
    }

    /// Lay out `pages` and export them as one document
    pub fn export_document<S: AsRef<str>>(
        &self,
        pages: &[S],
        emphasis_count: usize,
        config: &LayoutConfig,
    ) -> Result<Vec<u8>> {
        let exporter = self
            .exporter
            .as_ref()
            .ok_or_else(|| LeadmarkError::Pipeline("No exporter configured".into()))?;

        let layout = self.layout(pages, emphasis_count, config)?;
        log::debug!("Exporting document with backend: {}", exporter.name());
        exporter.export_document(&layout)
    }

    /// Pull every page out of `source`, then [`process`](Self::process) them
    pub fn process_source(
        &self,
        source: &dyn TextSource,
        emphasis_count: usize,
        config: &LayoutConfig,
    ) -> Result<Vec<Vec<u8>>> {
        let pages = (0..source.page_count())
            .map(|page| source.extract_page_text(page))
            .collect::<Result<Vec<String>>>()?;
        self.process(&pages, emphasis_count, config)
    }

    /// Process whole documents in parallel
    ///
    /// Results come back in input order, one per document. A failure in one
    /// document does not affect the others.
    #[cfg(feature = "parallel")]
    pub fn process_batch<S>(
        &self,
        documents: &[Vec<S>],
        emphasis_count: usize,
        config: &LayoutConfig,
    ) -> Vec<Result<Vec<Vec<u8>>>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        log::debug!("Processing batch of {} documents", documents.len());
        documents
            .par_iter()
            .map(|pages| self.process(pages, emphasis_count, config))
            .collect()
    }
}

/// Build pipelines piece by piece
///
/// ```ignore
/// let pipeline = Pipeline::builder()
///     .metrics(Arc::new(Base14Metrics::new()))
///     .exporter(Arc::new(SvgExporter::new()))
///     .enable_metrics_cache(true)
///     .build()?;
/// ```
pub struct PipelineBuilder {
    metrics: Option<Arc<dyn GlyphMetrics>>,
    exporter: Option<Arc<dyn PageExporter>>,
    metrics_cache_enabled: Option<bool>,
    metrics_cache: Option<SharedMetricsCache>,
}

impl PipelineBuilder {
    /// Start with a clean slate
    pub fn new() -> Self {
        Self {
            metrics: None,
            exporter: None,
            metrics_cache_enabled: None,
            metrics_cache: None,
        }
    }

    /// Choose who measures runs
    pub fn metrics(mut self, metrics: Arc<dyn GlyphMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Choose who serializes pages
    pub fn exporter(mut self, exporter: Arc<dyn PageExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// Enable or disable the metrics cache
    ///
    /// Left unset, the global [`cache_config`] switch decides.
    pub fn enable_metrics_cache(mut self, enabled: bool) -> Self {
        self.metrics_cache_enabled = Some(enabled);
        self
    }

    /// Supply a shared metrics cache for reuse across pipelines
    pub fn with_metrics_cache(mut self, cache: SharedMetricsCache) -> Self {
        self.metrics_cache = Some(cache);
        self
    }

    /// Create the pipeline, ready to run
    pub fn build(self) -> Result<Pipeline> {
        let caching = self
            .metrics_cache_enabled
            .unwrap_or_else(cache_config::is_caching_enabled);

        let metrics_cache = if caching {
            Some(
                self.metrics_cache
                    .unwrap_or_else(|| Arc::new(MetricsCache::new())),
            )
        } else {
            None
        };

        let metrics = match (self.metrics, metrics_cache.as_ref()) {
            (Some(metrics), Some(cache)) => {
                Some(Arc::new(CachedMetrics::new(metrics, cache.clone())) as Arc<dyn GlyphMetrics>)
            },
            (Some(metrics), None) => Some(metrics),
            (None, _) => None,
        };

        Ok(Pipeline {
            metrics,
            exporter: self.exporter,
            metrics_cache,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
