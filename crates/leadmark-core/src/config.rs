//! Page geometry and typesetting parameters
//!
//! Coordinates follow PDF user space: points, origin at the bottom-left
//! corner, y growing upward. The top margin is therefore the baseline of
//! the first line on a page and sits *above* the bottom margin.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LeadmarkError, Result};

/// What happens at a source page boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SourcePageBreak {
    /// Start every source page on a fresh output page
    ///
    /// A blank source page still gets its own, blank, output page.
    #[default]
    Fresh,
    /// Flow all source pages into one continuous stream, dropping blanks
    Continue,
}

/// How pages are laid out
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Baseline of the first line on every page
    pub top_margin: f32,
    /// No baseline is ever placed below this
    pub bottom_margin: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    pub font_size: f32,
    /// Distance between consecutive baselines
    pub line_height: f32,
    /// Extra drop after the last line of a paragraph
    pub paragraph_spacing: f32,
    pub source_page_break: SourcePageBreak,
}

impl LayoutConfig {
    /// US Letter, 12pt type on 15pt leading
    pub const fn letter() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            top_margin: 750.0,
            bottom_margin: 50.0,
            left_margin: 50.0,
            right_margin: 50.0,
            font_size: 12.0,
            line_height: 15.0,
            paragraph_spacing: 0.0,
            source_page_break: SourcePageBreak::Fresh,
        }
    }

    /// Widest a line may be before it wraps
    pub fn max_width(&self) -> f32 {
        self.page_width - self.left_margin - self.right_margin
    }

    /// Lines that fit on one page when no paragraph spacing intervenes
    pub fn lines_per_page(&self) -> usize {
        if !(self.line_height > 0.0) || self.top_margin < self.bottom_margin {
            return 0;
        }
        ((self.top_margin - self.bottom_margin) / self.line_height).floor() as usize + 1
    }

    /// Reject geometry the layout cannot honour
    ///
    /// Runs before any layout work so nothing is half-produced.
    pub fn validate(&self) -> Result<()> {
        fn invalid(message: String) -> Result<()> {
            Err(LeadmarkError::InvalidConfiguration(message))
        }

        let fields = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
            ("left_margin", self.left_margin),
            ("right_margin", self.right_margin),
            ("font_size", self.font_size),
            ("line_height", self.line_height),
            ("paragraph_spacing", self.paragraph_spacing),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }

        if self.page_height <= 0.0 {
            return invalid(format!(
                "page_height must be positive, got {}",
                self.page_height
            ));
        }
        if self.line_height <= 0.0 {
            return invalid(format!(
                "line_height must be positive, got {}",
                self.line_height
            ));
        }
        if self.font_size <= 0.0 {
            return invalid(format!("font_size must be positive, got {}", self.font_size));
        }
        if self.max_width() <= 0.0 {
            return invalid(format!(
                "line width must be positive, got {} (page_width {} - left_margin {} - right_margin {})",
                self.max_width(),
                self.page_width,
                self.left_margin,
                self.right_margin
            ));
        }
        for (name, value) in [
            ("bottom_margin", self.bottom_margin),
            ("left_margin", self.left_margin),
            ("right_margin", self.right_margin),
            ("paragraph_spacing", self.paragraph_spacing),
        ] {
            if value < 0.0 {
                return invalid(format!("{name} must not be negative, got {value}"));
            }
        }
        if self.bottom_margin >= self.top_margin {
            return invalid(format!(
                "bottom_margin ({}) must lie below top_margin ({})",
                self.bottom_margin, self.top_margin
            ));
        }
        if self.top_margin > self.page_height {
            return invalid(format!(
                "top_margin ({}) lies above the page (height {})",
                self.top_margin, self.page_height
            ));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::letter()
    }
}
