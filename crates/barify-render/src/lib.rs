#![forbid(unsafe_code)]

//! Bar layout + SVG output for book pacing barcodes.
//!
//! [`layout_chapters`] maps normalized chapters to bar rectangles (and side labels) in
//! millimeters; [`svg::render_svg`] turns the result into an SVG document.

pub mod annotate;
pub mod block;
pub mod geometry;
pub mod model;
pub mod simple;
pub mod svg;

use crate::geometry::DrawingArea;
use crate::model::{BarDiagramLayout, LayoutMode};
use barify_core::{Chapter, PageSize};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no chapters to lay out")]
    EmptyInput,
    #[error("invalid drawing geometry: {message}")]
    InvalidGeometry { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub page: PageSize,
    /// Inset from every page edge, in percent of the page size along that axis.
    pub margin_percent: f64,
    /// Gap between consecutive chapters in block mode, as a fraction of a line.
    pub bar_margin: f64,
    /// Explicit bar height in percent of the page height; `None` scales bars to fill the page.
    pub bar_height_percent: Option<f64>,
    pub mode: LayoutMode,
    /// Width of the annotation column in percent of the page width; `None` disables labels.
    pub text_column_percent: Option<f64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page: PageSize::new(210.0, 297.0),
            margin_percent: 4.0,
            bar_margin: 0.02,
            bar_height_percent: None,
            mode: LayoutMode::Simple,
            text_column_percent: None,
        }
    }
}

pub fn layout_chapters(chapters: &[Chapter], options: &LayoutOptions) -> Result<BarDiagramLayout> {
    let area = DrawingArea::new(options, chapters)?;

    let placement = match options.mode {
        LayoutMode::Simple => simple::layout_simple(chapters, &area),
        LayoutMode::Block => block::layout_block(chapters, &area, options.bar_margin),
    };

    let labels = match area.text_x {
        Some(text_x) => annotate::place_annotations(
            chapters,
            &placement.starting_lines,
            text_x,
            area.margin_y,
            area.line_height,
        ),
        None => Vec::new(),
    };

    tracing::debug!(
        mode = ?options.mode,
        rects = placement.rects.len(),
        labels = labels.len(),
        line_height = area.line_height,
        "laid out chapters"
    );

    Ok(BarDiagramLayout {
        mode: options.mode,
        width: area.width,
        height: area.height,
        line_height: area.line_height,
        rects: placement.rects,
        starting_lines: placement.starting_lines,
        labels,
    })
}
