//! Configuration loading and parsing.
//!
//! Parses `linefold.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [layout]
//! line_width = 80
//! tab_width = 4
//! placeholder_width = 1
//!
//! [render]
//! placeholder = "…"
//! ```
//!
//! Every field is optional. Unknown fields are ignored. A missing or
//! unparsable file yields defaults so the tool always starts. Layout values
//! of zero are clamped to one when the effective layout is computed.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    #[serde(default = "LayoutConfig::default_line_width")]
    pub line_width: usize,
    #[serde(default = "LayoutConfig::default_tab_width")]
    pub tab_width: usize,
    #[serde(default = "LayoutConfig::default_placeholder_width")]
    pub placeholder_width: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_width: Self::default_line_width(),
            tab_width: Self::default_tab_width(),
            placeholder_width: Self::default_placeholder_width(),
        }
    }
}

impl LayoutConfig {
    const fn default_line_width() -> usize {
        80
    }
    const fn default_tab_width() -> usize {
        4
    }
    const fn default_placeholder_width() -> usize {
        1
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_placeholder")]
    pub placeholder: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder: Self::default_placeholder(),
        }
    }
}

impl RenderConfig {
    fn default_placeholder() -> String {
        "…".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // file contents as read (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: `linefold.toml` in the working directory, then
/// the platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("linefold.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("linefold").join("linefold.toml");
    }
    PathBuf::from("linefold.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_not_found");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config {
            raw: Some(content),
            file,
        }),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Layout values with zero widths clamped to one. Each clamp is logged.
    pub fn effective_layout(&self) -> LayoutConfig {
        let raw = &self.file.layout;
        LayoutConfig {
            line_width: clamp_min_one("line_width", raw.line_width),
            tab_width: clamp_min_one("tab_width", raw.tab_width),
            placeholder_width: raw.placeholder_width,
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.file.render.placeholder
    }
}

fn clamp_min_one(field: &'static str, raw: usize) -> usize {
    if raw == 0 {
        info!(target: "config", field, raw, clamped = 1usize, "layout_value_clamped");
        1
    } else {
        raw
    }
}
