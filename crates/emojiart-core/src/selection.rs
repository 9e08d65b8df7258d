//! Selection set and drag routing.

use crate::document::EmojiId;
use std::collections::BTreeSet;

/// The set of selected emoji, referenced by id only.
///
/// This is transient UI state: it is never persisted and must tolerate the
/// referenced emoji disappearing from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<EmojiId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: EmojiId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn remove(&mut self, id: EmojiId) -> bool {
        self.ids.remove(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: EmojiId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = EmojiId> + '_ {
        self.ids.iter().copied()
    }

    /// Snapshot of the selected ids.
    pub fn ids(&self) -> Vec<EmojiId> {
        self.iter().collect()
    }
}

/// What a drag gesture moves, decided once when the drag starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragMode {
    /// Panning the whole canvas.
    Canvas,
    /// Moving a single emoji that was not selected at drag start.
    Solo(EmojiId),
    /// Moving every emoji that was selected at drag start.
    Group(Vec<EmojiId>),
}

impl DragMode {
    /// Route a drag that starts on `emoji`.
    ///
    /// An unselected emoji is dragged on its own and the selection is left
    /// alone; a selected one drags the whole selection with it.
    pub fn for_emoji(emoji: EmojiId, selection: &Selection) -> Self {
        if selection.contains(emoji) {
            DragMode::Group(selection.ids())
        } else {
            DragMode::Solo(emoji)
        }
    }

    /// Whether the in-flight drag offset applies to `id`.
    pub fn moves(&self, id: EmojiId) -> bool {
        match self {
            DragMode::Canvas => false,
            DragMode::Solo(target) => *target == id,
            DragMode::Group(ids) => ids.contains(&id),
        }
    }

    /// Ids the drag commits a move for.
    pub fn targets(&self) -> &[EmojiId] {
        match self {
            DragMode::Canvas => &[],
            DragMode::Solo(target) => std::slice::from_ref(target),
            DragMode::Group(ids) => ids,
        }
    }
}

/// What a pinch gesture scales, decided once when the pinch starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinchMode {
    /// Nothing selected: zoom the canvas.
    Canvas,
    /// Resize the emoji that were selected at pinch start.
    Emojis(Vec<EmojiId>),
}

impl PinchMode {
    pub fn for_selection(selection: &Selection) -> Self {
        if selection.is_empty() {
            PinchMode::Canvas
        } else {
            PinchMode::Emojis(selection.ids())
        }
    }

    pub fn scales(&self, id: EmojiId) -> bool {
        match self {
            PinchMode::Canvas => false,
            PinchMode::Emojis(ids) => ids.contains(&id),
        }
    }
}
