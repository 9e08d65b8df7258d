//! The EmojiArt document: a background reference plus placed emoji.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

/// Identity of an emoji within its document.
pub type EmojiId = u64;

/// Smallest size an emoji can be scaled down to.
pub const MIN_EMOJI_SIZE: i64 = 1;

/// Document encode/decode errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to decode document: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Duplicate emoji id in document: {0}")]
    DuplicateId(EmojiId),
    #[error("Emoji id space exhausted: no id after {0}")]
    IdOverflow(EmojiId),
}

/// A text glyph placed on the canvas.
///
/// Coordinates are document units with the origin at the canvas center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    text: String,
    pub x: i64,
    pub y: i64,
    pub size: i64,
    id: EmojiId,
}

impl Emoji {
    pub fn id(&self) -> EmojiId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Location in document space.
    pub fn location(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Base font size in document units.
    pub fn font_size(&self) -> f64 {
        self.size as f64
    }
}

/// Serialized form of a document. The id counter is not part of it.
#[derive(Serialize, Deserialize)]
struct DocumentRecord {
    #[serde(rename = "backgroundURL", default, skip_serializing_if = "Option::is_none")]
    background_url: Option<Url>,
    #[serde(default)]
    emojis: Vec<Emoji>,
}

/// A single EmojiArt document.
#[derive(Debug, Clone, PartialEq)]
pub struct EmojiArt {
    background_url: Option<Url>,
    emojis: Vec<Emoji>,
    /// Next id to hand out. Strictly greater than every id ever issued.
    next_id: EmojiId,
}

impl Default for EmojiArt {
    fn default() -> Self {
        Self::new()
    }
}

impl EmojiArt {
    /// Create an empty document with no background.
    pub fn new() -> Self {
        Self {
            background_url: None,
            emojis: Vec::new(),
            next_id: 1,
        }
    }

    pub fn background_url(&self) -> Option<&Url> {
        self.background_url.as_ref()
    }

    /// Replace the background reference. Reachability is the loader's problem.
    pub fn set_background(&mut self, url: Option<Url>) {
        self.background_url = url;
    }

    /// Emoji in insertion order (back to front).
    pub fn emojis(&self) -> &[Emoji] {
        &self.emojis
    }

    pub fn emoji(&self, id: EmojiId) -> Option<&Emoji> {
        self.index_of(id).map(|index| &self.emojis[index])
    }

    pub fn contains(&self, id: EmojiId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    fn index_of(&self, id: EmojiId) -> Option<usize> {
        self.emojis.iter().position(|emoji| emoji.id == id)
    }

    /// Append a new emoji and return its freshly minted id.
    ///
    /// `decode` refuses documents whose largest id leaves no successor, so the
    /// counter can only saturate after `u64::MAX` additions to one document.
    pub fn add_emoji(&mut self, text: impl Into<String>, x: i64, y: i64, size: i64) -> EmojiId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.emojis.push(Emoji {
            text: text.into(),
            x,
            y,
            size,
            id,
        });
        id
    }

    /// Remove an emoji. Returns the removed emoji, or `None` if the id is unknown.
    pub fn delete_emoji(&mut self, id: EmojiId) -> Option<Emoji> {
        let index = self.index_of(id)?;
        Some(self.emojis.remove(index))
    }

    /// Translate an emoji by `offset` document units (rounded to whole units).
    /// Coordinates saturate at the `i64` range.
    ///
    /// Stale ids are ignored; gestures may finish after the emoji was deleted.
    pub fn move_emoji(&mut self, id: EmojiId, offset: Vec2) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let emoji = &mut self.emojis[index];
        emoji.x = emoji.x.saturating_add(offset.x.round() as i64);
        emoji.y = emoji.y.saturating_add(offset.y.round() as i64);
        true
    }

    /// Multiply an emoji's size by `factor`, rounding half to even.
    ///
    /// Non-positive or non-finite factors leave the emoji unchanged, and the
    /// result never drops below [`MIN_EMOJI_SIZE`].
    pub fn scale_emoji(&mut self, id: EmojiId, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("Ignoring scale of emoji {} by non-positive factor {}", id, factor);
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let emoji = &mut self.emojis[index];
        let scaled = (emoji.size as f64 * factor).round_ties_even();
        emoji.size = (scaled as i64).max(MIN_EMOJI_SIZE);
        true
    }

    /// Serialize the background reference and emoji list to JSON bytes.
    pub fn encode(&self) -> Result<Vec<u8>, DocumentError> {
        let record = DocumentRecord {
            background_url: self.background_url.clone(),
            emojis: self.emojis.clone(),
        };
        serde_json::to_vec(&record).map_err(DocumentError::Encode)
    }

    /// Parse a document from JSON bytes.
    ///
    /// Ids are kept verbatim; the counter resumes after the largest one. A
    /// document holding `u64::MAX` as an id is rejected, since no fresh id
    /// could follow it.
    pub fn decode(bytes: &[u8]) -> Result<Self, DocumentError> {
        let record: DocumentRecord = serde_json::from_slice(bytes).map_err(DocumentError::Decode)?;

        let mut seen = HashSet::with_capacity(record.emojis.len());
        for emoji in &record.emojis {
            if !seen.insert(emoji.id) {
                return Err(DocumentError::DuplicateId(emoji.id));
            }
        }

        let next_id = match record.emojis.iter().map(|emoji| emoji.id).max() {
            Some(max) => max.checked_add(1).ok_or(DocumentError::IdOverflow(max))?,
            None => 1,
        };

        Ok(Self {
            background_url: record.background_url,
            emojis: record.emojis,
            next_id,
        })
    }

    /// Pretty JSON, for files meant to be read by people.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        let record = DocumentRecord {
            background_url: self.background_url.clone(),
            emojis: self.emojis.clone(),
        };
        serde_json::to_string_pretty(&record).map_err(DocumentError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Self::decode(json.as_bytes())
    }

    /// Structural equality on the serialized content, ignoring the id counter.
    pub fn same_content(&self, other: &Self) -> bool {
        self.background_url == other.background_url && self.emojis == other.emojis
    }
}
