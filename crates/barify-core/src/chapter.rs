//! Chapter table parsing and length normalization.
//!
//! Input rows look like `index,name,page[,color][,side_text]`, where `page` is the page on
//! which the chapter starts. A chapter's size is the distance to the next chapter's start page,
//! so the table is first made dense over `[min_index, max_index]` and then folded in ascending
//! index order.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Upper bound for `max_index - min_index + 1`; gaps are materialized, so a stray huge index
/// would otherwise allocate one placeholder per missing chapter.
pub const MAX_CHAPTER_SPAN: usize = 100_000;

/// Start page of the synthetic chapter preceding the first parsed one.
const BASELINE_PAGE: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter {
    pub index: i64,
    pub name: String,
    /// Start page minus the previous chapter's start page, before normalization.
    pub pages: i64,
    /// Page count relative to the longest chapter, in `[0, 1]`.
    pub length: f64,
    pub color: String,
    pub side_text: String,
}

impl Chapter {
    pub fn has_side_text(&self) -> bool {
        !self.side_text.is_empty()
    }
}

/// How the optional 4th column is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Every chapter uses the default color; the color column is ignored.
    #[default]
    Uniform,
    /// A color applies to its own row only.
    PerRow,
    /// A color starts a section that lasts until the next colored row.
    Sections,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "per-row" | "per_row" | "row" => Ok(Self::PerRow),
            "sections" | "section" => Ok(Self::Sections),
            other => Err(format!(
                "unknown color mode `{other}` (expected uniform, per-row or sections)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub default_color: String,
    pub color_mode: ColorMode,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_color: "black".to_string(),
            color_mode: ColorMode::Uniform,
        }
    }
}

/// Optional trailing columns of a row, selected by field count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTail {
    Minimal,
    WithColor { color: String },
    WithColorAndText { color: String, side_text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line in the input, for diagnostics.
    pub line: u64,
    pub index: i64,
    pub name: String,
    pub page: i64,
    pub tail: RowTail,
}

impl RawRow {
    /// The explicit color, if the row carries a non-empty one.
    pub fn color(&self) -> Option<&str> {
        match &self.tail {
            RowTail::Minimal => None,
            RowTail::WithColor { color } | RowTail::WithColorAndText { color, .. } => {
                Some(color.as_str()).filter(|c| !c.is_empty())
            }
        }
    }

    pub fn side_text(&self) -> &str {
        match &self.tail {
            RowTail::WithColorAndText { side_text, .. } => side_text,
            _ => "",
        }
    }
}

/// Parses CSV text into raw rows without normalizing them.
///
/// Blank lines and lines starting with `#` are skipped; fields past the fifth are ignored.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |pos| record_line(text, pos));
        rows.push(parse_record(&record, line)?);
    }
    Ok(rows)
}

/// Physical 1-based line of a record.
///
/// `csv` reports a record as starting where the preceding blank lines start, so those are
/// skipped here before counting newlines.
fn record_line(text: &str, pos: &csv::Position) -> u64 {
    let bytes = text.as_bytes();
    let mut start = usize::try_from(pos.byte()).map_or(bytes.len(), |b| b.min(bytes.len()));
    while let Some(&b) = bytes.get(start) {
        match b {
            b'\r' | b'\n' => start += 1,
            b'#' => {
                start = bytes[start..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |i| start + i + 1);
            }
            _ => break,
        }
    }
    bytes[..start].iter().filter(|&&b| b == b'\n').count() as u64 + 1
}

fn parse_record(record: &csv::StringRecord, line: u64) -> Result<RawRow> {
    if record.len() < 3 {
        return Err(Error::MalformedRow {
            line,
            message: format!(
                "expected at least 3 fields (index,name,page), found {}",
                record.len()
            ),
        });
    }

    let index = parse_int(&record[0], "index", line)?;
    let page = parse_int(&record[2], "page", line)?;
    let tail = match (record.get(3), record.get(4)) {
        (Some(color), Some(side_text)) => RowTail::WithColorAndText {
            color: color.to_string(),
            side_text: side_text.to_string(),
        },
        (Some(color), None) => RowTail::WithColor {
            color: color.to_string(),
        },
        _ => RowTail::Minimal,
    };

    Ok(RawRow {
        line,
        index,
        name: record[1].to_string(),
        page,
        tail,
    })
}

fn parse_int(field: &str, what: &str, line: u64) -> Result<i64> {
    field.parse::<i64>().map_err(|_| Error::MalformedRow {
        line,
        message: format!("{what} must be an integer, but was `{field}`"),
    })
}

/// Builds the dense `[min, max]` table. Later rows replace earlier rows with the same index;
/// missing indices become `None`.
fn dense_rows(rows: Vec<RawRow>) -> Result<Vec<(i64, Option<RawRow>)>> {
    let mut by_index: BTreeMap<i64, RawRow> = BTreeMap::new();
    for row in rows {
        let index = row.index;
        if let Some(prev) = by_index.insert(index, row) {
            tracing::warn!(
                index,
                replaced_line = prev.line,
                "duplicate chapter index, keeping the last row"
            );
        }
    }

    let (Some(&min), Some(&max)) = (by_index.keys().next(), by_index.keys().next_back()) else {
        return Err(Error::EmptyInput);
    };
    let span = usize::try_from(max.abs_diff(min))
        .ok()
        .and_then(|d| d.checked_add(1))
        .filter(|span| *span <= MAX_CHAPTER_SPAN)
        .ok_or(Error::IndexSpanTooLarge {
            min,
            max,
            limit: MAX_CHAPTER_SPAN,
        })?;

    let mut dense = Vec::with_capacity(span);
    for index in min..=max {
        let slot = by_index.remove(&index);
        if slot.is_none() {
            tracing::debug!(index, "filling missing chapter with an empty placeholder");
        }
        dense.push((index, slot));
    }
    Ok(dense)
}

/// Running state of the ascending-index fold.
#[derive(Debug, Clone)]
struct FoldState {
    previous_page: i64,
    section_color: String,
}

impl FoldState {
    fn new(default_color: &str) -> Self {
        Self {
            previous_page: BASELINE_PAGE,
            section_color: default_color.to_string(),
        }
    }

    fn advance(
        self,
        index: i64,
        slot: Option<RawRow>,
        options: &ParseOptions,
    ) -> Result<(Self, Chapter)> {
        let Some(row) = slot else {
            let color = match options.color_mode {
                ColorMode::Sections => self.section_color.clone(),
                ColorMode::Uniform | ColorMode::PerRow => options.default_color.clone(),
            };
            let chapter = Chapter {
                index,
                name: String::new(),
                pages: 0,
                length: 0.0,
                color,
                side_text: String::new(),
            };
            return Ok((self, chapter));
        };

        let (color, section_color) = match options.color_mode {
            ColorMode::Uniform => (options.default_color.clone(), self.section_color),
            ColorMode::PerRow => (
                row.color().unwrap_or(&options.default_color).to_string(),
                self.section_color,
            ),
            ColorMode::Sections => {
                let color = row
                    .color()
                    .map_or_else(|| self.section_color.clone(), str::to_string);
                (color.clone(), color)
            }
        };

        let mut pages = row
            .page
            .checked_sub(self.previous_page)
            .ok_or_else(|| Error::MalformedRow {
                line: row.line,
                message: format!(
                    "page {} is out of range after the previous start page {}",
                    row.page, self.previous_page
                ),
            })?;
        if pages < 0 {
            tracing::warn!(
                index,
                line = row.line,
                page = row.page,
                previous_page = self.previous_page,
                "chapter starts before its predecessor; treating it as empty"
            );
            pages = 0;
        }

        let side_text = row.side_text().to_string();
        let chapter = Chapter {
            index,
            name: row.name,
            pages,
            length: 0.0,
            color,
            side_text,
        };
        let next = Self {
            previous_page: row.page,
            section_color,
        };
        Ok((next, chapter))
    }
}

/// Turns raw rows into dense, normalized chapters in ascending index order.
pub fn normalize(rows: Vec<RawRow>, options: &ParseOptions) -> Result<Vec<Chapter>> {
    let dense = dense_rows(rows)?;

    let (_, mut chapters) = dense.into_iter().try_fold(
        (FoldState::new(&options.default_color), Vec::new()),
        |(state, mut out), (index, slot)| {
            let (next, chapter) = state.advance(index, slot, options)?;
            out.push(chapter);
            Ok::<_, Error>((next, out))
        },
    )?;

    // A zero maximum (single chapter, or all chapters empty) divides by one so every length
    // stays 0 instead of NaN.
    let max_pages = chapters.iter().map(|c| c.pages).max().unwrap_or(0);
    let divisor = if max_pages > 0 { max_pages as f64 } else { 1.0 };
    for chapter in &mut chapters {
        chapter.length = chapter.pages as f64 / divisor;
    }

    tracing::debug!(
        chapters = chapters.len(),
        max_pages,
        "normalized chapter lengths"
    );
    Ok(chapters)
}

/// Parses and normalizes a chapter table in one step.
pub fn parse_chapters(text: &str, options: &ParseOptions) -> Result<Vec<Chapter>> {
    let rows = parse_rows(text)?;
    normalize(rows, options)
}
