//! Backdrop settings and theme
//!
//! The host page tunes the backdrop through a JSON blob on the canvas
//! element; anything absent or malformed falls back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Host theme; only affects whole-surface opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Map the host's `data-theme` attribute; anything but "light" is dark.
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

/// Presentation settings for the backdrop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackdropSettings {
    /// Number of orbs; fixed once the backdrop starts
    pub orb_count: usize,
    /// Whole-surface opacity in light theme
    pub light_opacity: f32,
    /// Whole-surface opacity in dark theme
    pub dark_opacity: f32,
    /// Skip animating when the environment prefers reduced motion
    pub respect_reduced_motion: bool,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            orb_count: ORB_COUNT,
            light_opacity: LIGHT_OPACITY,
            dark_opacity: DARK_OPACITY,
            respect_reduced_motion: true,
        }
    }
}

impl BackdropSettings {
    /// Surface opacity for the current theme.
    pub fn opacity_for(&self, theme: Theme) -> f32 {
        match theme {
            Theme::Light => self.light_opacity,
            Theme::Dark => self.dark_opacity,
        }
    }

    /// Parse host-supplied JSON; malformed input logs and yields defaults.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed backdrop settings: {e}");
            Self::default()
        })
    }
}
