//! Editing session: the document plus the interaction state around it.

use crate::background::{BackgroundEvent, BackgroundState};
use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::document::{DocumentError, EmojiArt, EmojiId};
use crate::drop::DropPayload;
use crate::gesture::{GestureEvent, GestureTarget, Phase};
use crate::selection::{DragMode, PinchMode, Selection};
use kurbo::{Point, Size, Vec2};
use url::Url;

/// A drag in progress.
#[derive(Debug, Clone)]
struct ActiveDrag {
    mode: DragMode,
    /// Raw screen translation of an emoji drag. Canvas drags keep theirs in the camera.
    translation: Vec2,
}

/// A pinch in progress.
#[derive(Debug, Clone)]
struct ActivePinch {
    mode: PinchMode,
    /// Live factor of an emoji pinch. Canvas pinches keep theirs in the camera.
    scale: f64,
}

/// Runtime editing state (not persisted).
///
/// Owns the document exclusively. Selection, camera and in-flight gestures
/// refer to emoji by id only.
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: EmojiArt,
    camera: Camera,
    selection: Selection,
    background: BackgroundState,
    config: EditorConfig,
    canvas_size: Size,
    drag: Option<ActiveDrag>,
    pinch: Option<ActivePinch>,
    /// Set whenever a committed change reaches the document.
    dirty: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Open a session on an empty document.
    pub fn new() -> Self {
        Self::with_config(EmojiArt::new(), EditorConfig::default())
    }

    /// Open a session on an existing document.
    pub fn with_document(document: EmojiArt) -> Self {
        Self::with_config(document, EditorConfig::default())
    }

    /// Open a session with explicit tunables. Unusable config values are
    /// replaced by their defaults.
    pub fn with_config(document: EmojiArt, config: EditorConfig) -> Self {
        let config = config.sanitized();
        let mut background = BackgroundState::new();
        background.set_url(document.background_url().cloned());
        Self {
            document,
            camera: Camera::with_limits(config.min_zoom, config.max_zoom),
            selection: Selection::new(),
            background,
            config,
            canvas_size: Size::new(800.0, 600.0),
            drag: None,
            pinch: None,
            dirty: false,
        }
    }

    pub fn document(&self) -> &EmojiArt {
        &self.document
    }

    pub fn into_document(self) -> EmojiArt {
        self.document
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Set the size of the canvas view, in screen units.
    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    /// Whether a committed change happened since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Replace the document with one decoded from `bytes`.
    ///
    /// On failure nothing about the session changes.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), DocumentError> {
        let document = match EmojiArt::decode(bytes) {
            Ok(document) => document,
            Err(e) => {
                log::warn!("Rejected document: {}", e);
                return Err(e);
            }
        };
        log::info!("Loaded document with {} emoji", document.len());
        self.cancel_gestures();
        self.selection.clear();
        self.background.set_url(document.background_url().cloned());
        self.document = document;
        self.dirty = false;
        Ok(())
    }

    /// Encode the current document.
    pub fn save(&self) -> Result<Vec<u8>, DocumentError> {
        self.document.encode()
    }

    // --- Document mutations ---

    pub fn add_emoji(&mut self, text: &str, x: i64, y: i64, size: i64) -> EmojiId {
        self.dirty = true;
        self.document.add_emoji(text, x, y, size)
    }

    /// Delete an emoji and forget it in the selection.
    pub fn delete_emoji(&mut self, id: EmojiId) -> bool {
        self.selection.remove(id);
        let removed = self.document.delete_emoji(id).is_some();
        self.dirty |= removed;
        removed
    }

    /// Delete every selected emoji, then clear the selection. Returns how many
    /// emoji were removed.
    pub fn delete_selected(&mut self) -> usize {
        let mut removed = 0;
        for id in self.selection.ids() {
            if self.document.delete_emoji(id).is_some() {
                removed += 1;
            }
        }
        self.selection.clear();
        self.dirty |= removed > 0;
        log::debug!("Deleted {} selected emoji", removed);
        removed
    }

    /// Replace the background reference and request its image. Setting the
    /// current reference again changes nothing.
    pub fn set_background(&mut self, url: Option<Url>) {
        if self.document.background_url() == url.as_ref() {
            return;
        }
        self.background.set_url(url.clone());
        self.document.set_background(url);
        self.dirty = true;
    }

    /// Drain background load requests for the host's image loader.
    pub fn poll_background_events(&mut self) -> Vec<BackgroundEvent> {
        self.background.poll_events()
    }

    /// Report a finished background load. Stale results are discarded.
    pub fn background_loaded(&mut self, url: &Url, image_size: Size) -> bool {
        self.background.complete_load(url, image_size)
    }

    pub fn background(&self) -> &BackgroundState {
        &self.background
    }

    // --- Geometry ---

    /// Where an emoji is drawn on screen, including any drag in progress.
    pub fn position_of(&self, id: EmojiId) -> Option<Point> {
        let emoji = self.document.emoji(id)?;
        let mut position = self.camera.position_on_screen(emoji.location(), self.canvas_size);
        if let Some(drag) = &self.drag {
            if drag.mode.moves(id) {
                position += drag.translation;
            }
        }
        Some(position)
    }

    /// Font size an emoji is drawn with, including any pinch in progress.
    pub fn font_size_of(&self, id: EmojiId) -> Option<f64> {
        let emoji = self.document.emoji(id)?;
        let mut size = emoji.font_size() * self.camera.zoom();
        if let Some(pinch) = &self.pinch {
            if pinch.mode.scales(id) {
                size *= pinch.scale;
            }
        }
        Some(size)
    }

    /// Convert a point in the canvas' screen space to document space.
    pub fn to_document_space(&self, screen_point: Point) -> Point {
        self.camera.to_document_space(screen_point, self.canvas_size)
    }

    /// Zoom so the loaded background fills the canvas. No-op until it has loaded.
    pub fn zoom_to_fit_background(&mut self) {
        if let Some(image_size) = self.background.image_size() {
            self.camera
                .zoom_to_fit(image_size, self.canvas_size, self.config.fit_margin);
        }
    }

    // --- Gestures ---

    /// Route a host gesture event.
    pub fn handle_event(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Tap { target, count } => self.tap(target, count),
            GestureEvent::Drag { target, phase } => match phase {
                Phase::Changed(translation) => {
                    if self.drag.is_none() {
                        self.begin_drag(target);
                    }
                    self.update_drag(translation);
                }
                Phase::Ended(translation) => {
                    if self.drag.is_none() {
                        self.begin_drag(target);
                    }
                    self.end_drag(translation);
                }
                Phase::Cancelled => self.cancel_drag(),
            },
            GestureEvent::Pinch { phase } => match phase {
                Phase::Changed(scale) => {
                    if self.pinch.is_none() {
                        self.begin_pinch();
                    }
                    self.update_pinch(scale);
                }
                Phase::Ended(scale) => {
                    if self.pinch.is_none() {
                        self.begin_pinch();
                    }
                    self.end_pinch(scale);
                }
                Phase::Cancelled => self.cancel_pinch(),
            },
        }
    }

    /// Single tap toggles an emoji or clears the selection; double tap on the
    /// canvas zooms to fit the background.
    pub fn tap(&mut self, target: GestureTarget, count: u32) {
        match (target, count) {
            (GestureTarget::Emoji(id), 1) => {
                if self.document.contains(id) {
                    self.selection.toggle(id);
                }
            }
            (GestureTarget::Canvas, 1) => self.selection.clear(),
            (GestureTarget::Canvas, 2) => self.zoom_to_fit_background(),
            _ => log::debug!("Ignoring {}-tap on {:?}", count, target),
        }
    }

    /// Start a drag. The mode is fixed here for the rest of the gesture.
    pub fn begin_drag(&mut self, target: GestureTarget) {
        let mode = match target {
            GestureTarget::Canvas => DragMode::Canvas,
            GestureTarget::Emoji(id) => DragMode::for_emoji(id, &self.selection),
        };
        self.cancel_drag();
        self.drag = Some(ActiveDrag {
            mode,
            translation: Vec2::ZERO,
        });
    }

    pub fn update_drag(&mut self, translation: Vec2) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        match drag.mode {
            DragMode::Canvas => self.camera.update_pan(translation),
            DragMode::Solo(_) | DragMode::Group(_) => drag.translation = translation,
        }
    }

    /// Commit a drag. Emoji moves are converted to document units at the
    /// current zoom.
    pub fn end_drag(&mut self, translation: Vec2) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        match drag.mode {
            DragMode::Canvas => self.camera.end_pan(translation),
            mode => {
                let offset = self.camera.screen_to_document_delta(translation);
                let mut moved = 0;
                for &id in mode.targets() {
                    if self.document.move_emoji(id, offset) {
                        moved += 1;
                    }
                }
                log::debug!("Moved {} emoji by ({:.1}, {:.1})", moved, offset.x, offset.y);
                self.dirty |= moved > 0;
            }
        }
    }

    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            if drag.mode == DragMode::Canvas {
                self.camera.cancel_pan();
            }
        }
    }

    /// Start a pinch. Zooms the canvas when nothing is selected, otherwise
    /// resizes the selected emoji.
    pub fn begin_pinch(&mut self) {
        let mode = PinchMode::for_selection(&self.selection);
        self.cancel_pinch();
        self.pinch = Some(ActivePinch { mode, scale: 1.0 });
    }

    pub fn update_pinch(&mut self, scale: f64) {
        let Some(pinch) = &mut self.pinch else {
            return;
        };
        match pinch.mode {
            PinchMode::Canvas => self.camera.update_zoom(scale),
            PinchMode::Emojis(_) => {
                if scale.is_finite() && scale > 0.0 {
                    pinch.scale = scale;
                }
            }
        }
    }

    pub fn end_pinch(&mut self, scale: f64) {
        let Some(pinch) = self.pinch.take() else {
            return;
        };
        match pinch.mode {
            PinchMode::Canvas => self.camera.end_zoom(scale),
            PinchMode::Emojis(ids) => {
                let mut scaled = 0;
                for id in ids {
                    if self.document.scale_emoji(id, scale) {
                        scaled += 1;
                    }
                }
                log::debug!("Scaled {} emoji by {}", scaled, scale);
                self.dirty |= scaled > 0;
            }
        }
    }

    pub fn cancel_pinch(&mut self) {
        if let Some(pinch) = self.pinch.take() {
            if pinch.mode == PinchMode::Canvas {
                self.camera.cancel_zoom();
            }
        }
    }

    fn cancel_gestures(&mut self) {
        self.cancel_drag();
        self.cancel_pinch();
    }

    pub fn drag_mode(&self) -> Option<&DragMode> {
        self.drag.as_ref().map(|drag| &drag.mode)
    }

    pub fn pinch_mode(&self) -> Option<&PinchMode> {
        self.pinch.as_ref().map(|pinch| &pinch.mode)
    }

    // --- Drop ---

    /// Apply a drop at `location` (canvas screen space).
    ///
    /// The first image URL wins and becomes the background. Without one, every
    /// text payload becomes an emoji at the drop location. Returns whether
    /// anything was handled.
    pub fn drop_payloads(&mut self, payloads: &[DropPayload], location: Point) -> bool {
        if let Some(url) = payloads.iter().find_map(DropPayload::image_url) {
            log::debug!("Drop set background to {}", url);
            self.set_background(Some(url));
            return true;
        }

        let point = self.to_document_space(location);
        let (x, y) = (point.x.round() as i64, point.y.round() as i64);
        let size = self.config.default_emoji_size;
        let mut handled = false;
        for text in payloads.iter().filter_map(DropPayload::text) {
            let id = self.add_emoji(text, x, y, size);
            log::debug!("Drop added emoji {} at ({}, {})", id, x, y);
            handled = true;
        }
        handled
    }
}
