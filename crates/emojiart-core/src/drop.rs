//! Drag-and-drop payloads and how they resolve.

use serde::{Deserialize, Serialize};
use url::Url;

/// One item of a drop, as offered by the host's drag source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropPayload {
    /// Something URL-like, typically a dragged image.
    Url(String),
    /// Plain text, e.g. an emoji dragged from the palette.
    Text(String),
    /// Any other kind, identified by its type name. Always ignored.
    Unsupported(String),
}

impl DropPayload {
    /// Resolve this payload as a background image reference.
    pub fn image_url(&self) -> Option<Url> {
        match self {
            DropPayload::Url(raw) => resolve_image_url(raw),
            _ => None,
        }
    }

    /// Resolve this payload as emoji text.
    pub fn text(&self) -> Option<&str> {
        match self {
            DropPayload::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then_some(text)
            }
            _ => None,
        }
    }
}

/// Parse a dropped URL, unwrapping image-search links that carry the real
/// image location in an `imgurl` query parameter.
pub fn resolve_image_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    let embedded = url
        .query_pairs()
        .find(|(key, _)| key == "imgurl")
        .and_then(|(_, value)| Url::parse(&value).ok());
    Some(embedded.unwrap_or(url))
}
