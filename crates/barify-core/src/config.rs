//! Optional YAML config file. Every field is optional; the CLI layers its flags on top.
//!
//! ```yaml
//! size: a5
//! block_mode: true
//! color_mode: sections
//! page_formats:
//!   pocket: [110, 178]
//! ```

use crate::chapter::ColorMode;
use crate::page::{PageFormats, PageSize};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BarifyConfig {
    pub size: Option<String>,
    pub flip: Option<bool>,
    pub margin: Option<f64>,
    pub bar_margin: Option<f64>,
    pub bar_height: Option<f64>,
    pub color: Option<String>,
    pub color_mode: Option<ColorMode>,
    pub block_mode: Option<bool>,
    pub text: Option<bool>,
    pub text_width: Option<f64>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    /// Extra presets, `name: [width, height]` in millimeters.
    pub page_formats: IndexMap<String, [u32; 2]>,
}

impl BarifyConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::InvalidConfig {
            message: format!("{}: {e}", path.display()),
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Built-in presets plus the ones declared in this config (config wins on name clashes).
    pub fn page_formats(&self) -> Result<PageFormats> {
        let mut formats = PageFormats::builtin();
        for (name, [w, h]) in &self.page_formats {
            if *w == 0 || *h == 0 {
                return Err(Error::InvalidConfig {
                    message: format!("page format `{name}` must have a non-zero size"),
                });
            }
            formats.insert(name, PageSize::new(f64::from(*w), f64::from(*h)));
        }
        Ok(formats)
    }
}
