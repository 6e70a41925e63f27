//! Visual style types for selection highlights
//!
//! A `StyleConfig` describes how a highlight looks. The host turns it
//! into an opaque `StyleHandle` that the engine hands back when applying
//! or clearing regions.

use crate::config::Config;

/// Ruler colour used for every highlight style
pub const RULER_COLOR: &str = "blue";

/// Lane of the overview ruler where match markers are drawn.
///
/// Highlight markers always go in the right lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RulerLane {
    #[default]
    Right,
}

/// Options passed to the host when creating a visual style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    /// Border width (CSS length, e.g. "2px")
    pub border_width: String,
    /// Border style (e.g. "solid", "dashed")
    pub border_style: String,
    /// Border colour used with light themes
    pub border_color_light: String,
    /// Border colour used with dark themes
    pub border_color_dark: String,
    /// Overview ruler marker colour
    pub ruler_color: String,
    /// Overview ruler lane
    pub ruler_lane: RulerLane,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            border_width: "2px".to_string(),
            border_style: "solid".to_string(),
            border_color_light: "darkblue".to_string(),
            border_color_dark: "lightblue".to_string(),
            ruler_color: RULER_COLOR.to_string(),
            ruler_lane: RulerLane::Right,
        }
    }
}

impl StyleConfig {
    /// Build the style options from the current configuration.
    ///
    /// Ruler colour and lane are fixed.
    pub fn from_config(config: &Config) -> Self {
        Self {
            border_width: config.border_width.clone(),
            border_style: config.border_style.clone(),
            border_color_light: config.border_color_light.clone(),
            border_color_dark: config.border_color_dark.clone(),
            ..Self::default()
        }
    }

    /// Border colour for the given theme
    pub fn border_color(&self, dark: bool) -> &str {
        if dark {
            &self.border_color_dark
        } else {
            &self.border_color_light
        }
    }
}

/// Opaque handle to a visual style allocated by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleHandle(u64);

impl StyleHandle {
    /// Wrap a host-assigned identifier
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Host-assigned identifier
    pub fn id(&self) -> u64 {
        self.0
    }
}
