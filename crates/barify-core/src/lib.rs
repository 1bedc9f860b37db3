#![forbid(unsafe_code)]

//! Chapter table parser + normalization for book pacing barcodes.
//!
//! A chapter table lists where each chapter starts; this crate turns it into dense, ordered
//! [`Chapter`] records whose `length` is the chapter's page count relative to the longest one.
//! Layout and SVG output live in `barify-render`.

pub mod chapter;
pub mod config;
pub mod error;
pub mod page;

pub use chapter::{
    Chapter, ColorMode, ParseOptions, RawRow, RowTail, normalize, parse_chapters, parse_rows,
};
pub use config::BarifyConfig;
pub use error::{Error, Result};
pub use page::{DEFAULT_PAGE_FORMAT, PageFormats, PageSize};
