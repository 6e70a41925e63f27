//! Configuration file support
//!
//! Loads settings from ~/.highlight-selections.toml (or
//! %USERPROFILE%\.highlight-selections.toml on Windows)
//!
//! Keys may sit at the top level or inside a `[highlight-selections]`
//! table. Unknown keys are ignored.
//!
//! Example:
//! ```text
//! # highlight-selections configuration
//! border-width = "1px"
//! border-style = "dashed"
//! border-color = "orange"
//! debounce-ms = 25
//! max-cached-styles = 64
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// Name of the optional table holding the settings
const SECTION: &str = "highlight-selections";

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Highlight border width
    pub border_width: String,
    /// Highlight border style
    pub border_style: String,
    /// Border colour for light themes
    pub border_color_light: String,
    /// Border colour for dark themes
    pub border_color_dark: String,
    /// Quiet period before a burst of events triggers a recompute
    pub debounce_ms: u64,
    /// Upper bound on cached styles (None = unbounded)
    pub max_cached_styles: Option<usize>,
    /// Cap in bytes on a compiled selection pattern (None = regex default)
    pub pattern_size_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            border_width: "2px".to_string(),
            border_style: "solid".to_string(),
            border_color_light: "darkblue".to_string(),
            border_color_dark: "lightblue".to_string(),
            debounce_ms: 10,
            max_cached_styles: None,
            pattern_size_limit: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".highlight-selections.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".highlight-selections.toml"))
        }
    }

    /// Load configuration from the default file, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Build a configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config = Config::default();
        let settings = Self::parse(contents)?;
        config.apply(&settings);
        Ok(config)
    }

    /// Debounce quiet period
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> Result<HashMap<String, String>> {
        let table: toml::Table = contents.parse()?;
        let mut settings = HashMap::new();

        collect_values(&table, &mut settings);
        // Section values win over top-level ones
        if let Some(toml::Value::Table(section)) = table.get(SECTION) {
            collect_values(section, &mut settings);
        }

        Ok(settings)
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("border-width") {
            self.border_width = value.clone();
        }

        if let Some(value) = settings.get("border-style") {
            self.border_style = value.clone();
        }

        // One colour for both themes, then per-theme overrides
        if let Some(value) = settings.get("border-color") {
            self.border_color_light = value.clone();
            self.border_color_dark = value.clone();
        }

        if let Some(value) = settings.get("border-color-light") {
            self.border_color_light = value.clone();
        }

        if let Some(value) = settings.get("border-color-dark") {
            self.border_color_dark = value.clone();
        }

        if let Some(value) = settings.get("debounce-ms") {
            if let Ok(n) = value.parse::<u64>() {
                self.debounce_ms = n.min(1000);
            }
        }

        if let Some(value) = settings.get("max-cached-styles") {
            if let Ok(n) = value.parse::<usize>() {
                self.max_cached_styles = (n > 0).then_some(n);
            }
        }

        if let Some(value) = settings.get("pattern-size-limit") {
            if let Ok(n) = value.parse::<usize>() {
                self.pattern_size_limit = (n > 0).then_some(n);
            }
        }
    }
}

/// Copy scalar values of a TOML table into the settings map
fn collect_values(table: &toml::Table, settings: &mut HashMap<String, String>) {
    for (key, value) in table {
        let value = match value {
            toml::Value::String(s) => s.clone(),
            toml::Value::Integer(n) => n.to_string(),
            toml::Value::Float(f) => f.to_string(),
            toml::Value::Boolean(b) => b.to_string(),
            _ => continue,
        };
        settings.insert(key.to_lowercase(), value);
    }
}
