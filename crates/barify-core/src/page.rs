//! Page format presets and custom `WxH` sizes, in millimeters.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Landscape/portrait swap.
    pub fn flipped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

const BUILTIN_FORMATS: &[(&str, u32, u32)] = &[
    ("a3", 297, 420),
    ("a4", 210, 297),
    ("a5", 148, 210),
    ("16:9", 1080, 1920),
    ("dci", 2160, 4096),
    ("cinemascope", 1000, 2350),
    ("letter", 216, 279),
    ("legal", 216, 356),
    ("ledger", 279, 432),
];

pub const DEFAULT_PAGE_FORMAT: &str = "a4";

/// Named page sizes. Lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFormats {
    presets: IndexMap<String, PageSize>,
}

impl Default for PageFormats {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PageFormats {
    pub fn builtin() -> Self {
        let presets = BUILTIN_FORMATS
            .iter()
            .map(|&(name, w, h)| (name.to_string(), PageSize::new(f64::from(w), f64::from(h))))
            .collect();
        Self { presets }
    }

    /// Adds or replaces a preset.
    pub fn insert(&mut self, name: &str, size: PageSize) {
        self.presets.insert(name.trim().to_ascii_lowercase(), size);
    }

    pub fn get(&self, name: &str) -> Option<PageSize> {
        self.presets
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Resolves a preset name or a custom `WxH` size (positive integers, millimeters).
    pub fn resolve(&self, spec: &str) -> Result<PageSize> {
        if let Some(size) = self.get(spec) {
            return Ok(size);
        }
        parse_custom_size(spec).ok_or_else(|| Error::InvalidPageFormat {
            spec: spec.to_string(),
            known: self.names().collect::<Vec<_>>().join(", "),
        })
    }
}

fn parse_custom_size(spec: &str) -> Option<PageSize> {
    let (w, h) = spec.trim().split_once(['x', 'X'])?;
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(w) || !is_digits(h) {
        return None;
    }
    let w = w.parse::<u32>().ok().filter(|v| *v > 0)?;
    let h = h.parse::<u32>().ok().filter(|v| *v > 0)?;
    Some(PageSize::new(f64::from(w), f64::from(h)))
}
