//! Block layout: chapters are laid end to end like words in a paragraph, each line holding a
//! length of 1.0, and a chapter that does not fit is split across the line break.
//!
//! Packing happens in fraction units (`pack_blocks`) and is scaled to millimeters afterwards
//! (`layout_block`), so the packing arithmetic can be checked without any page geometry.

use crate::geometry::DrawingArea;
use crate::model::{BarRect, Placement};
use barify_core::Chapter;

/// Float residue below this is treated as zero length / a full line.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct BlockSegment {
    /// Position of the chapter in the input slice.
    pub chapter: usize,
    pub line: usize,
    /// Start of the segment along its line, in `[0, 1)`.
    pub start: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPacking {
    pub segments: Vec<BlockSegment>,
    pub starting_lines: Vec<usize>,
}

impl BlockPacking {
    pub fn line_count(&self) -> usize {
        self.segments.iter().map(|s| s.line + 1).max().unwrap_or(0)
    }
}

/// Packs chapter lengths onto unit-width lines.
///
/// `bar_margin` is the gap inserted after every chapter, as a fraction of a line. It is skipped
/// at the start of a fresh line, and a gap that reaches the end of the line wraps.
pub fn pack_blocks(lengths: &[f64], bar_margin: f64) -> BlockPacking {
    let mut packing = BlockPacking {
        segments: Vec::new(),
        starting_lines: Vec::with_capacity(lengths.len()),
    };
    let mut cur_x = 0.0_f64;
    let mut cur_y = 0usize;

    for (chapter, &length) in lengths.iter().enumerate() {
        packing.starting_lines.push(cur_y);

        let mut remaining = length;
        while remaining > EPSILON {
            let width = remaining.min(1.0 - cur_x);
            packing.segments.push(BlockSegment {
                chapter,
                line: cur_y,
                start: cur_x,
                width,
            });
            cur_x += width;
            remaining -= width;
            // A bar that exactly fills the line wraps now instead of leaving an empty piece for
            // the next one.
            if cur_x >= 1.0 - EPSILON {
                cur_x = 0.0;
                cur_y += 1;
            }
        }

        if cur_x > 0.0 {
            cur_x += bar_margin;
            if cur_x >= 1.0 - EPSILON {
                cur_x = 0.0;
                cur_y += 1;
            }
        }
    }

    packing
}

/// Total "ink" in line units: every chapter length plus one bar margin per chapter. Used to
/// scale the line height so all lines fit on the page.
pub fn auto_line_count(chapters: &[Chapter], bar_margin: f64) -> f64 {
    let ink: f64 = chapters.iter().map(|c| c.length).sum();
    ink + chapters.len() as f64 * bar_margin
}

pub fn layout_block(chapters: &[Chapter], area: &DrawingArea, bar_margin: f64) -> Placement {
    let lengths: Vec<f64> = chapters.iter().map(|c| c.length).collect();
    let packing = pack_blocks(&lengths, bar_margin);

    let rects = packing
        .segments
        .iter()
        .map(|seg| {
            let chapter = &chapters[seg.chapter];
            BarRect {
                chapter_index: chapter.index,
                line: seg.line,
                x: area.x_at(seg.start),
                y: area.line_y(seg.line),
                width: area.bar_area_width * seg.width,
                height: area.line_height,
                color: chapter.color.clone(),
            }
        })
        .collect();

    tracing::debug!(
        segments = packing.segments.len(),
        lines = packing.line_count(),
        "packed block layout"
    );

    Placement {
        rects,
        starting_lines: packing.starting_lines,
    }
}
