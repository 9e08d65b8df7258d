//! Emoji palette offered by the toolbar.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Emoji offered when no palette has been configured.
pub const DEFAULT_PALETTE: &str = "⭐️⛈🍎🌏🥨⚾️";

/// A string of emoji, one palette entry per grapheme cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    emojis: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE)
    }
}

impl Palette {
    pub fn new(emojis: impl Into<String>) -> Self {
        Self { emojis: emojis.into() }
    }

    /// Palette entries in order. Multi-codepoint emoji stay whole.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.emojis.graphemes(true).filter(|g| !g.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// Append an emoji unless it is already offered.
    pub fn add(&mut self, emoji: &str) -> bool {
        if emoji.trim().is_empty() || self.entries().any(|e| e == emoji) {
            return false;
        }
        self.emojis.push_str(emoji);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_entries() {
        let palette = Palette::default();
        let entries: Vec<_> = palette.entries().collect();
        assert_eq!(entries, vec!["⭐️", "⛈", "🍎", "🌏", "🥨", "⚾️"]);
        assert_eq!(palette.len(), 6);
    }

    #[test]
    fn test_compound_emoji_stay_whole() {
        let palette = Palette::new("👨‍👩‍👧🇳🇱");
        assert_eq!(palette.entries().collect::<Vec<_>>(), vec!["👨‍👩‍👧", "🇳🇱"]);
    }

    #[test]
    fn test_add_skips_duplicates() {
        let mut palette = Palette::new("🍎");
        assert!(!palette.add("🍎"));
        assert!(palette.add("🐶"));
        assert!(!palette.add(" "));
        assert_eq!(palette.entries().collect::<Vec<_>>(), vec!["🍎", "🐶"]);
    }

    #[test]
    fn test_empty_palette() {
        assert!(Palette::new("").is_empty());
    }
}
