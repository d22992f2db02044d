//! Run segmentation: a marked-up word becomes measured same-style runs
//!
//! Every word is segmented on its own, so two neighbouring words that both
//! end and start regular still give two separate runs. The gap between them
//! is the wrapper's business, not ours.

use crate::{
    error::{LeadmarkError, Result},
    markup::{MarkupText, MarkupWord},
    traits::GlyphMetrics,
    types::{GlyphStyle, StyledRun, Word},
};

/// Maximal same-style spans of a word, in order and unmeasured
pub fn style_spans(word: &MarkupWord) -> Vec<(GlyphStyle, String)> {
    let mut spans: Vec<(GlyphStyle, String)> = Vec::new();
    for c in word.chars() {
        match spans.last_mut() {
            Some((style, text)) if *style == c.style => text.push(c.ch),
            _ => spans.push((c.style, c.ch.to_string())),
        }
    }
    spans
}

/// Split `word` into runs and measure each one
///
/// The metrics backend is asked exactly once per run. A failure is returned
/// straight away with the offending run text attached.
pub fn segment(word: &MarkupWord, metrics: &dyn GlyphMetrics, font_size: f32) -> Result<Word> {
    let spans = style_spans(word);
    let mut runs = Vec::with_capacity(spans.len());
    for (style, text) in spans {
        let width = metrics
            .measure_width(&text, style, font_size)
            .map_err(|e| LeadmarkError::metrics(text.as_str(), e))?;
        runs.push(StyledRun { text, style, width });
    }
    Ok(Word::new(runs))
}

/// Segment every word of a paragraph, stopping at the first failure
pub fn segment_paragraph(
    text: &MarkupText,
    metrics: &dyn GlyphMetrics,
    font_size: f32,
) -> Result<Vec<Word>> {
    log::trace!(
        "Segmenting {} words with metrics backend: {}",
        text.len(),
        metrics.name()
    );
    text.words
        .iter()
        .map(|word| segment(word, metrics, font_size))
        .collect()
}
