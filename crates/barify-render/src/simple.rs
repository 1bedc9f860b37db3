use crate::geometry::DrawingArea;
use crate::model::{BarRect, Placement};
use barify_core::Chapter;

/// One bar per line. The line is the chapter's position in the dense chapter sequence, so an
/// empty chapter still reserves its row.
pub fn layout_simple(chapters: &[Chapter], area: &DrawingArea) -> Placement {
    let rects = chapters
        .iter()
        .enumerate()
        .map(|(line, chapter)| BarRect {
            chapter_index: chapter.index,
            line,
            x: area.margin_x,
            y: area.line_y(line),
            width: area.bar_area_width * chapter.length,
            height: area.line_height,
            color: chapter.color.clone(),
        })
        .collect();

    Placement {
        rects,
        starting_lines: (0..chapters.len()).collect(),
    }
}
