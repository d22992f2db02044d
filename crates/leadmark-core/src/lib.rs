//! Leadmark Core: four stages from page text to placed runs
//!
//! Plain page text goes in; position-tagged, style-tagged runs come out,
//! with the leading letters of every word emphasized and the text reflowed
//! to fixed page margins.
//!
//! ## The Stages
//!
//! 1. **Markup** ([`markup`]) - Decide which leading characters of each word are emphasized
//! 2. **Segmentation** ([`segment`]) - Group a word into same-style runs and measure them
//! 3. **Wrapping** ([`wrap`]) - Pack words greedily into lines no wider than the measure
//! 4. **Pagination** ([`paginate`]) - Stack lines onto pages and hand out coordinates
//!
//! ## Run the Whole Thing
//!
//! ```rust,no_run
//! use leadmark_core::{LayoutConfig, Pipeline};
//! use std::sync::Arc;
//!
//! # use leadmark_core::traits::*;
//! # use leadmark_core::types::*;
//! # use leadmark_core::error::MetricsError;
//! # struct MyMetrics;
//! # impl GlyphMetrics for MyMetrics {
//! #     fn name(&self) -> &'static str { "test" }
//! #     fn measure_width(&self, _: &str, _: GlyphStyle, _: f32)
//! #         -> Result<f32, MetricsError> { unimplemented!() }
//! # }
//! # struct MyExporter;
//! # impl PageExporter for MyExporter {
//! #     fn name(&self) -> &'static str { "test" }
//! #     fn export_page(&self, _: &PageLayout) -> leadmark_core::Result<Vec<u8>> { unimplemented!() }
//! #     fn extension(&self) -> &'static str { "bin" }
//! #     fn mime_type(&self) -> &'static str { "application/octet-stream" }
//! # }
//!
//! let pipeline = Pipeline::builder()
//!     .metrics(Arc::new(MyMetrics))
//!     .exporter(Arc::new(MyExporter))
//!     .build()?;
//!
//! let pages = pipeline.process(&["Hello, World!"], 2, &LayoutConfig::default())?;
//! # Ok::<(), leadmark_core::LeadmarkError>(())
//! ```
//!
//! ## The Traits Around the Engine
//!
//! - [`GlyphMetrics`] - How wide a styled run is
//! - [`TextSource`] - Where page text comes from
//! - [`PageExporter`] - What a laid-out page turns into
//!
//! Data flows through the types in [`types`].

pub mod cache_config;
pub mod config;
pub mod error;
pub mod markup;
pub mod metrics_cache;
pub mod paginate;
pub mod pipeline;
pub mod segment;
pub mod traits;
pub mod wrap;

pub use config::{LayoutConfig, SourcePageBreak};
pub use error::{LeadmarkError, Result};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use traits::{GlyphMetrics, PageExporter, TextSource};

/// The data structures handed from stage to stage
pub mod types {
    /// Visual weight of a character
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum GlyphStyle {
        #[default]
        Regular,
        Emphasized,
    }

    impl GlyphStyle {
        pub fn is_emphasized(self) -> bool {
            matches!(self, Self::Emphasized)
        }
    }

    /// One character and the weight it is drawn with
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StyledChar {
        pub ch: char,
        pub style: GlyphStyle,
    }

    impl StyledChar {
        pub const fn new(ch: char, style: GlyphStyle) -> Self {
            Self { ch, style }
        }

        pub const fn regular(ch: char) -> Self {
            Self::new(ch, GlyphStyle::Regular)
        }

        pub const fn emphasized(ch: char) -> Self {
            Self::new(ch, GlyphStyle::Emphasized)
        }
    }

    /// Same-style span of a single word, already measured
    #[derive(Debug, Clone, PartialEq)]
    pub struct StyledRun {
        pub text: String,
        pub style: GlyphStyle,
        pub width: f32,
    }

    impl StyledRun {
        pub fn new(text: impl Into<String>, style: GlyphStyle, width: f32) -> Self {
            Self {
                text: text.into(),
                style,
                width,
            }
        }
    }

    /// A whitespace-delimited token as a sequence of runs
    #[derive(Debug, Clone, PartialEq)]
    pub struct Word {
        pub runs: Vec<StyledRun>,
        /// Sum of the run widths
        pub width: f32,
    }

    impl Word {
        pub fn new(runs: Vec<StyledRun>) -> Self {
            let width = runs.iter().map(|run| run.width).sum();
            Self { runs, width }
        }

        /// The word's characters with styling dropped
        pub fn text(&self) -> String {
            self.runs.iter().map(|run| run.text.as_str()).collect()
        }
    }

    /// Words that share one row of a page
    #[derive(Debug, Clone, PartialEq)]
    pub struct Line {
        pub words: Vec<Word>,
        /// Gap inserted between neighbouring words
        pub space_width: f32,
        /// Word widths plus the gaps between them
        pub width: f32,
    }

    impl Line {
        /// Wider than the measure; the wrapper only lets a lone word do this
        pub fn is_overflow(&self, max_width: f32) -> bool {
            self.width > max_width
        }

        pub fn is_empty(&self) -> bool {
            self.words.is_empty()
        }
    }

    /// A run pinned to a page position
    #[derive(Debug, Clone, PartialEq)]
    pub struct Placement {
        pub page_index: usize,
        /// Document-wide line ordinal, starting at 0
        pub line_index: usize,
        pub x: f32,
        /// Baseline, measured up from the bottom edge
        pub y: f32,
        pub run: StyledRun,
    }

    /// Everything drawn on one output page
    #[derive(Debug, Clone, PartialEq)]
    pub struct PageLayout {
        pub page_index: usize,
        pub width: f32,
        pub height: f32,
        pub font_size: f32,
        pub placements: Vec<Placement>,
    }

    impl PageLayout {
        /// Number of distinct lines placed on the page
        pub fn line_count(&self) -> usize {
            let mut count = 0;
            let mut last = None;
            for placement in &self.placements {
                if last != Some(placement.line_index) {
                    count += 1;
                    last = Some(placement.line_index);
                }
            }
            count
        }
    }

    /// A whole document after pagination
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct DocumentLayout {
        pub pages: Vec<PageLayout>,
    }

    impl DocumentLayout {
        /// Group placements into pages
        ///
        /// Placements arrive in page order, so one forward pass suffices.
        pub fn from_placements(
            placements: Vec<Placement>,
            width: f32,
            height: f32,
            font_size: f32,
        ) -> Self {
            let mut pages: Vec<PageLayout> = Vec::new();
            for placement in placements {
                match pages.last_mut() {
                    Some(page) if page.page_index == placement.page_index => {
                        page.placements.push(placement);
                    },
                    _ => pages.push(PageLayout {
                        page_index: placement.page_index,
                        width,
                        height,
                        font_size,
                        placements: vec![placement],
                    }),
                }
            }
            Self { pages }
        }

        /// Group placements into exactly `page_count` pages
        ///
        /// Pages no placement lands on stay in the document, blank. A
        /// placement past `page_count` still gets its page.
        pub fn with_page_count(
            placements: Vec<Placement>,
            page_count: usize,
            width: f32,
            height: f32,
            font_size: f32,
        ) -> Self {
            let needed = placements
                .last()
                .map_or(0, |p| p.page_index + 1)
                .max(page_count);
            let mut pages: Vec<PageLayout> = (0..needed)
                .map(|page_index| PageLayout {
                    page_index,
                    width,
                    height,
                    font_size,
                    placements: Vec::new(),
                })
                .collect();
            for placement in placements {
                if let Some(page) = pages.get_mut(placement.page_index) {
                    page.placements.push(placement);
                }
            }
            Self { pages }
        }

        pub fn page_count(&self) -> usize {
            self.pages.len()
        }

        pub fn is_empty(&self) -> bool {
            self.pages.is_empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::types::*;

    fn placement(page_index: usize, line_index: usize) -> Placement {
        Placement {
            page_index,
            line_index,
            x: 50.0,
            y: 750.0,
            run: StyledRun::new("ab", GlyphStyle::Regular, 10.0),
        }
    }

    #[test]
    fn test_word_width_is_sum_of_runs() {
        let word = Word::new(vec![
            StyledRun::new("ext", GlyphStyle::Emphasized, 18.5),
            StyledRun::new("raordinary", GlyphStyle::Regular, 52.0),
        ]);
        assert_eq!(word.width, 70.5);
        assert_eq!(word.text(), "extraordinary");
    }

    #[test]
    fn test_group_placements_by_page() {
        let doc = DocumentLayout::from_placements(
            vec![
                placement(0, 0),
                placement(0, 0),
                placement(0, 1),
                placement(1, 2),
            ],
            612.0,
            792.0,
            12.0,
        );

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].placements.len(), 3);
        assert_eq!(doc.pages[0].line_count(), 2);
        assert_eq!(doc.pages[1].page_index, 1);
        assert_eq!(doc.pages[1].line_count(), 1);
    }

    #[test]
    fn test_with_page_count_keeps_blank_pages() {
        let doc = DocumentLayout::with_page_count(
            vec![placement(0, 0), placement(2, 1)],
            4,
            612.0,
            792.0,
            12.0,
        );

        assert_eq!(doc.page_count(), 4);
        assert_eq!(doc.pages[1].page_index, 1);
        assert!(doc.pages[1].placements.is_empty());
        assert_eq!(doc.pages[2].line_count(), 1);
        assert!(doc.pages[3].placements.is_empty());

        let short = DocumentLayout::with_page_count(vec![placement(1, 0)], 0, 612.0, 792.0, 12.0);
        assert_eq!(short.page_count(), 2);
    }

    #[test]
    fn test_no_placements_no_pages() {
        let doc = DocumentLayout::from_placements(Vec::new(), 612.0, 792.0, 12.0);
        assert!(doc.is_empty());
    }
}
