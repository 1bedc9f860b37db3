//! Page geometry: margins, bar area, annotation column and line height.
//!
//! Bars are double spaced: line `n` starts at `margin_y + 2n * line_height`, leaving one empty
//! line height between consecutive bar rows.

use crate::block::auto_line_count;
use crate::model::LayoutMode;
use crate::{Error, LayoutOptions, Result};
use barify_core::Chapter;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingArea {
    pub width: f64,
    pub height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Horizontal space available to a full line of bars.
    pub bar_area_width: f64,
    /// Left edge of the annotation column, when annotations are enabled.
    pub text_x: Option<f64>,
    pub line_height: f64,
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidGeometry {
        message: message.into(),
    }
}

fn percent(value: f64, what: &str) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!(
            "{what} must be a non-negative percentage, got {value}"
        )));
    }
    Ok(value / 100.0)
}

impl DrawingArea {
    pub fn new(options: &LayoutOptions, chapters: &[Chapter]) -> Result<Self> {
        if chapters.is_empty() {
            return Err(Error::EmptyInput);
        }

        let width = options.page.width;
        let height = options.page.height;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(invalid(format!(
                "page size must be positive, got {width}x{height}"
            )));
        }
        if !(options.bar_margin.is_finite() && options.bar_margin >= 0.0) {
            return Err(invalid(format!(
                "bar margin must be non-negative, got {}",
                options.bar_margin
            )));
        }

        let margin = percent(options.margin_percent, "margin")?;
        let margin_x = width * margin;
        let margin_y = height * margin;

        let (text_width, gap) = match options.text_column_percent {
            Some(pct) => (width * percent(pct, "text column width")?, margin_x),
            None => (0.0, 0.0),
        };
        let bar_area_width = width - 2.0 * margin_x - text_width - gap;
        if bar_area_width <= 0.0 {
            return Err(invalid(format!(
                "no horizontal space left for bars (page width {width}, margins {margin_x} each, text column {text_width})"
            )));
        }
        let text_x = options
            .text_column_percent
            .map(|_| margin_x + bar_area_width + gap);

        let usable_height = height - 2.0 * margin_y;
        if usable_height <= 0.0 {
            return Err(invalid(format!(
                "no vertical space left for bars (page height {height}, margins {margin_y} each)"
            )));
        }

        let line_height = match options.bar_height_percent {
            Some(pct) => {
                let h = height * percent(pct, "bar height")?;
                if h <= 0.0 {
                    return Err(invalid("bar height must be positive"));
                }
                h
            }
            None => match options.mode {
                LayoutMode::Simple => usable_height / (chapters.len() as f64 * 2.0),
                LayoutMode::Block => {
                    let lines = auto_line_count(chapters, options.bar_margin);
                    usable_height / (lines * 2.0 + 1.0)
                }
            },
        };

        Ok(Self {
            width,
            height,
            margin_x,
            margin_y,
            bar_area_width,
            text_x,
            line_height,
        })
    }

    /// Top edge of the bars on `line`.
    pub fn line_y(&self, line: usize) -> f64 {
        self.margin_y + line as f64 * 2.0 * self.line_height
    }

    /// Absolute x of a fractional position along a line.
    pub fn x_at(&self, fraction: f64) -> f64 {
        self.margin_x + self.bar_area_width * fraction
    }
}
