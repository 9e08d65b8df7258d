//! Editor configuration.

use crate::camera::{DEFAULT_FIT_MARGIN, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, valid_zoom_limits};
use crate::document::MIN_EMOJI_SIZE;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};

/// Font size, in document units, given to emoji dropped onto the canvas.
pub const DEFAULT_EMOJI_SIZE: i64 = 40;

/// Tunables for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Size given to emoji inserted by a drop.
    pub default_emoji_size: i64,
    /// Screen-space inset kept around the background by zoom-to-fit.
    pub fit_margin: f64,
    /// Lower bound for the committed canvas zoom.
    pub min_zoom: f64,
    /// Upper bound for the committed canvas zoom.
    pub max_zoom: f64,
    /// Emoji offered by the toolbar.
    pub palette: Palette,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_emoji_size: DEFAULT_EMOJI_SIZE,
            fit_margin: DEFAULT_FIT_MARGIN,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            palette: Palette::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a config. Unusable values are replaced by their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace values the editor cannot work with by their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !valid_zoom_limits(self.min_zoom, self.max_zoom) {
            log::warn!(
                "Config zoom limits [{}, {}] are unusable, using defaults",
                self.min_zoom,
                self.max_zoom
            );
            self.min_zoom = defaults.min_zoom;
            self.max_zoom = defaults.max_zoom;
        }
        if self.default_emoji_size < MIN_EMOJI_SIZE {
            log::warn!("Config emoji size {} is too small, using default", self.default_emoji_size);
            self.default_emoji_size = defaults.default_emoji_size;
        }
        if !self.fit_margin.is_finite() {
            self.fit_margin = defaults.fit_margin;
        }
        self
    }
}
