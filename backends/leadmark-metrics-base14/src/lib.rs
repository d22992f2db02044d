//! Base14 metrics - Helvetica and Helvetica-Bold advance widths
//!
//! Every PDF viewer ships Helvetica, so measuring against its published AFM
//! widths needs no font files at all. Regular runs measure as Helvetica,
//! emphasized runs as Helvetica-Bold. Widths are in 1/1000 em.

use leadmark_core::{error::MetricsError, traits::GlyphMetrics, types::GlyphStyle};

const FIRST_CHAR: u32 = 0x20;

/// Helvetica, U+0020..=U+007E
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 0x70
];

/// Helvetica-Bold, U+0020..=U+007E
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,      // 0x70
];

/// Stand-in for characters outside the table: the width of `n`
const FALLBACK_REGULAR: u16 = 556;
const FALLBACK_BOLD: u16 = 611;

/// Metrics backed by the built-in Helvetica tables
#[derive(Debug, Clone, Copy, Default)]
pub struct Base14Metrics {
    strict: bool,
}

impl Base14Metrics {
    /// Measure unknown characters with a fallback width
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Fail on any character the tables do not cover
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// PostScript name of the face used for `style`
    pub fn font_name(style: GlyphStyle) -> &'static str {
        match style {
            GlyphStyle::Regular => "Helvetica",
            GlyphStyle::Emphasized => "Helvetica-Bold",
        }
    }

    /// Advance width of `ch` in 1/1000 em, if the tables know it
    pub fn char_width(ch: char, style: GlyphStyle) -> Option<u16> {
        let table = match style {
            GlyphStyle::Regular => &HELVETICA,
            GlyphStyle::Emphasized => &HELVETICA_BOLD,
        };
        let index = (ch as u32).checked_sub(FIRST_CHAR)?;
        table.get(index as usize).copied()
    }

    fn units(&self, ch: char, style: GlyphStyle) -> Result<u16, MetricsError> {
        match Self::char_width(ch, style) {
            Some(width) => Ok(width),
            None if self.strict => Err(MetricsError::UnsupportedCharacter(ch)),
            None => Ok(match style {
                GlyphStyle::Regular => FALLBACK_REGULAR,
                GlyphStyle::Emphasized => FALLBACK_BOLD,
            }),
        }
    }
}

impl GlyphMetrics for Base14Metrics {
    fn name(&self) -> &'static str {
        "base14"
    }

    fn measure_width(
        &self,
        text: &str,
        style: GlyphStyle,
        font_size: f32,
    ) -> Result<f32, MetricsError> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(MetricsError::InvalidFontSize(font_size));
        }

        let mut units: u64 = 0;
        for ch in text.chars() {
            units = units.saturating_add(u64::from(self.units(ch, style)?));
        }

        log::trace!(
            "Base14: {:?} as {} = {} units",
            text,
            Self::font_name(style),
            units
        );
        Ok(units as f32 * font_size / 1000.0)
    }
}
