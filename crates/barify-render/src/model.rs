use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// One chapter per line; bar length is the chapter length.
    #[default]
    Simple,
    /// Chapters are packed end to end like a paragraph and wrap across lines.
    Block,
}

/// One drawn bar (or bar piece, in block mode). Coordinates are millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub chapter_index: i64,
    pub line: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideLabel {
    pub chapter_index: i64,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Output of a layout strategy: the bars plus the line each chapter starts on
/// (one entry per chapter, in chapter order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub rects: Vec<BarRect>,
    pub starting_lines: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarDiagramLayout {
    pub mode: LayoutMode,
    pub width: f64,
    pub height: f64,
    pub line_height: f64,
    pub rects: Vec<BarRect>,
    pub starting_lines: Vec<usize>,
    pub labels: Vec<SideLabel>,
}

impl BarDiagramLayout {
    /// Number of lines that received at least one bar.
    pub fn line_count(&self) -> usize {
        self.rects.iter().map(|r| r.line + 1).max().unwrap_or(0)
    }
}
