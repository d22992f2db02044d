//! Greedy line wrapping
//!
//! Words are packed left to right into the current line for as long as they
//! fit, and a new line starts as soon as one does not. No look-ahead, no
//! rebalancing, no hyphenation. A word wider than the measure on its own
//! gets a line to itself instead of being split.

use crate::types::{Line, Word};

/// Line being filled
struct OpenLine {
    words: Vec<Word>,
    width: f32,
}

impl OpenLine {
    fn start(word: Word) -> Self {
        let width = word.width;
        Self {
            words: vec![word],
            width,
        }
    }

    fn close(self, space_width: f32) -> Line {
        Line {
            words: self.words,
            space_width,
            width: self.width,
        }
    }
}

/// Pack `words` into lines no wider than `max_width`
///
/// `candidate == max_width` still fits. Calling this once per paragraph keeps
/// words from flowing across paragraph boundaries.
pub fn wrap<I>(words: I, max_width: f32, space_width: f32) -> Vec<Line>
where
    I: IntoIterator<Item = Word>,
{
    let mut lines = Vec::new();
    let mut open: Option<OpenLine> = None;

    for word in words {
        open = Some(match open.take() {
            None => OpenLine::start(word),
            Some(mut line) => {
                let candidate = line.width + space_width + word.width;
                if candidate <= max_width {
                    line.words.push(word);
                    line.width = candidate;
                    line
                } else {
                    lines.push(line.close(space_width));
                    OpenLine::start(word)
                }
            },
        });
    }

    if let Some(line) = open {
        lines.push(line.close(space_width));
    }

    log::trace!(
        "Wrapped paragraph into {} lines at measure {max_width}",
        lines.len()
    );
    lines
}
