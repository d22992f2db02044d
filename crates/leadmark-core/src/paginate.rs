//! Pagination: wrapped lines become positioned runs
//!
//! A single cursor `(page_index, y)` walks down the document. Before each
//! line the cursor is checked once: below the bottom margin means the page
//! is full and the line opens the next page at the top margin. Lines are
//! never revisited once placed. A page counts as in use once a line lands on
//! it or it is held open explicitly; only pages in use are closed by
//! [`LayoutSession::break_page`].

use crate::{
    config::LayoutConfig,
    types::{Line, Placement},
};

/// Where the next line will go
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page_index: usize,
    pub y: f32,
}

/// Incremental paginator for streaming paragraphs into pages
#[derive(Debug, Clone)]
pub struct LayoutSession {
    top_margin: f32,
    bottom_margin: f32,
    left_margin: f32,
    line_height: f32,
    paragraph_spacing: f32,
    cursor: Cursor,
    page_in_use: bool,
    next_line_index: usize,
    placements: Vec<Placement>,
}

impl LayoutSession {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            top_margin: config.top_margin,
            bottom_margin: config.bottom_margin,
            left_margin: config.left_margin,
            line_height: config.line_height,
            paragraph_spacing: config.paragraph_spacing,
            cursor: Cursor {
                page_index: 0,
                y: config.top_margin,
            },
            page_in_use: false,
            next_line_index: 0,
            placements: Vec::new(),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Place every line of one paragraph, then drop by the paragraph spacing
    ///
    /// An empty paragraph places nothing and adds no spacing.
    pub fn push_paragraph(&mut self, lines: &[Line]) {
        if lines.is_empty() {
            return;
        }
        for line in lines {
            self.push_line(line);
        }
        self.cursor.y -= self.paragraph_spacing;
    }

    /// Place one line at the cursor and advance it
    pub fn push_line(&mut self, line: &Line) {
        if self.cursor.y < self.bottom_margin {
            self.start_page();
        }

        let line_index = self.next_line_index;
        let y = self.cursor.y;
        let mut x = self.left_margin;
        for (i, word) in line.words.iter().enumerate() {
            if i > 0 {
                x += line.space_width;
            }
            for run in &word.runs {
                self.placements.push(Placement {
                    page_index: self.cursor.page_index,
                    line_index,
                    x,
                    y,
                    run: run.clone(),
                });
                x += run.width;
            }
        }

        self.page_in_use = true;
        self.next_line_index += 1;
        self.cursor.y -= self.line_height;
    }

    /// Close the current page unless it is still unused
    pub fn break_page(&mut self) {
        if self.page_in_use {
            self.start_page();
        }
    }

    /// Keep the current page in the output even if it stays blank
    pub fn hold_page(&mut self) {
        self.page_in_use = true;
    }

    /// Pages in use so far, held blank pages included
    pub fn page_count(&self) -> usize {
        self.cursor.page_index + usize::from(self.page_in_use)
    }

    /// Consume the session and hand back every placement in order
    pub fn finish(self) -> Vec<Placement> {
        log::debug!(
            "Paginated {} lines onto {} pages",
            self.next_line_index,
            self.page_count()
        );
        self.placements
    }

    fn start_page(&mut self) {
        self.cursor.page_index += 1;
        self.cursor.y = self.top_margin;
        self.page_in_use = false;
        log::trace!("Page break: now on page {}", self.cursor.page_index);
    }
}

/// Paginate whole paragraphs in one go
pub fn paginate(paragraphs: &[Vec<Line>], config: &LayoutConfig) -> Vec<Placement> {
    let mut session = LayoutSession::new(config);
    for lines in paragraphs {
        session.push_paragraph(lines);
    }
    session.finish()
}
