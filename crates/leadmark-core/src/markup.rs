//! Emphasis markup: which leading letters of each word get the heavy weight
//!
//! A word is split into three parts. Leading and trailing ASCII punctuation
//! is peeled off and always drawn regular; the first `emphasis_count`
//! characters of what remains (the core) are emphasized.
//!
//! ```
//! use leadmark_core::markup;
//!
//! let text = markup::transform("(hello!) world", 2);
//! assert_eq!(text.to_string(), "(<b>he</b>llo!) <b>wo</b>rld");
//! ```

use std::fmt;

use crate::types::{GlyphStyle, StyledChar};

/// One word after markup, character by character
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupWord {
    chars: Vec<StyledChar>,
}

impl MarkupWord {
    pub fn new(chars: Vec<StyledChar>) -> Self {
        Self { chars }
    }

    pub fn chars(&self) -> &[StyledChar] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The word's characters with styling dropped
    pub fn plain_text(&self) -> String {
        self.chars.iter().map(|c| c.ch).collect()
    }

    /// Only the emphasized characters, in order
    pub fn emphasized_text(&self) -> String {
        self.chars
            .iter()
            .filter(|c| c.style.is_emphasized())
            .map(|c| c.ch)
            .collect()
    }
}

/// `<b>`-tagged rendering, handy in logs and tests
impl fmt::Display for MarkupWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut open = false;
        for c in &self.chars {
            match (c.style.is_emphasized(), open) {
                (true, false) => {
                    f.write_str("<b>")?;
                    open = true;
                },
                (false, true) => {
                    f.write_str("</b>")?;
                    open = false;
                },
                _ => {},
            }
            write!(f, "{}", c.ch)?;
        }
        if open {
            f.write_str("</b>")?;
        }
        Ok(())
    }
}

/// A paragraph after markup: words in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupText {
    pub words: Vec<MarkupWord>,
}

impl MarkupText {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

/// Words rejoined with single spaces
impl fmt::Display for MarkupText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{word}")?;
        }
        Ok(())
    }
}

/// Mark up every whitespace-delimited word of `text`
///
/// Runs of whitespace count as one separator, so the output never holds an
/// empty word.
pub fn transform(text: &str, emphasis_count: usize) -> MarkupText {
    MarkupText {
        words: text
            .split_whitespace()
            .map(|word| markup_word(word, emphasis_count))
            .collect(),
    }
}

/// Mark up a single word
pub fn markup_word(word: &str, emphasis_count: usize) -> MarkupWord {
    let (leading, rest) = split_leading_punct(word);
    let (core, trailing) = split_trailing_punct(rest);

    let mut chars = Vec::with_capacity(word.len());
    chars.extend(leading.chars().map(StyledChar::regular));
    chars.extend(core.chars().enumerate().map(|(i, ch)| {
        let style = if i < emphasis_count {
            GlyphStyle::Emphasized
        } else {
            GlyphStyle::Regular
        };
        StyledChar::new(ch, style)
    }));
    chars.extend(trailing.chars().map(StyledChar::regular));

    MarkupWord::new(chars)
}

/// Characters never counted as part of a word's core
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
}

fn split_leading_punct(word: &str) -> (&str, &str) {
    let at = word
        .find(|ch: char| !is_punctuation(ch))
        .unwrap_or(word.len());
    word.split_at(at)
}

fn split_trailing_punct(word: &str) -> (&str, &str) {
    let at = word
        .char_indices()
        .rev()
        .find(|&(_, ch)| !is_punctuation(ch))
        .map_or(0, |(i, ch)| i + ch.len_utf8());
    word.split_at(at)
}
