//! EmojiArt Core Library
//!
//! Document model, pan/zoom transforms, selection and gesture routing for a
//! canvas of emoji over a background image. Rendering, gesture recognition and
//! image fetching are left to the host.

pub mod background;
pub mod camera;
pub mod config;
pub mod document;
pub mod drop;
pub mod gesture;
pub mod palette;
pub mod selection;
pub mod session;
pub mod storage;

pub use background::{BackgroundEvent, BackgroundState};
pub use camera::{Camera, DEFAULT_FIT_MARGIN, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
pub use config::{DEFAULT_EMOJI_SIZE, EditorConfig};
pub use document::{DocumentError, Emoji, EmojiArt, EmojiId};
pub use drop::DropPayload;
pub use gesture::{GestureEvent, GestureTarget, Phase};
pub use palette::Palette;
pub use selection::{DragMode, PinchMode, Selection};
pub use session::EditorSession;
pub use storage::{AutoSaveManager, MemoryStorage, Storage, StorageError, StorageResult};
