use crate::model::SideLabel;
use barify_core::Chapter;

/// Places side labels in the annotation column, one per chapter with side text, on the
/// baseline just below the first bar row of that chapter.
///
/// `starting_lines[i]` is the line chapter `i` starts on; for the simple layout that is `i`.
pub fn place_annotations(
    chapters: &[Chapter],
    starting_lines: &[usize],
    text_x: f64,
    margin_y: f64,
    line_height: f64,
) -> Vec<SideLabel> {
    chapters
        .iter()
        .zip(starting_lines)
        .filter(|(chapter, _)| chapter.has_side_text())
        .map(|(chapter, &line)| SideLabel {
            chapter_index: chapter.index,
            x: text_x,
            y: margin_y + line_height * (line as f64 * 2.0 + 1.0),
            text: chapter.side_text.clone(),
        })
        .collect()
}
