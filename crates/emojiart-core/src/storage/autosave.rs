//! Auto-save functionality for document persistence.
//!
//! The editor keeps a single untitled document that is written back whenever
//! it has changed and the save interval has elapsed.

use crate::document::EmojiArt;
use crate::storage::{Storage, StorageResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Key the untitled document is stored under.
pub const UNTITLED_DOCUMENT_KEY: &str = "EmojiArtDocument.Untitled";

/// Key holding a copy of whichever document was saved most recently.
pub const LAST_DOCUMENT_KEY: &str = "EmojiArtDocument.Last";

/// Manages automatic document persistence.
pub struct AutoSaveManager<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Auto-save interval.
    interval: Duration,
    /// Last save timestamp.
    last_save: Option<Instant>,
    /// Whether the document has unsaved changes.
    dirty: bool,
    /// Key the document is saved under.
    key: String,
}

impl<S: Storage> AutoSaveManager<S> {
    /// Create a manager for the untitled document.
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_key(storage, UNTITLED_DOCUMENT_KEY)
    }

    /// Create a manager that saves under `key`.
    pub fn with_key(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: false,
            key: key.into(),
        }
    }

    /// Set the auto-save interval.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mark the document as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Check if the document is dirty and the interval has elapsed.
    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }

        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save the document if needed. Returns true if a save was performed.
    pub async fn maybe_save(&mut self, document: &EmojiArt) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }

        self.save(document).await?;
        Ok(true)
    }

    /// Force save the document immediately.
    pub async fn save(&mut self, document: &EmojiArt) -> StorageResult<()> {
        self.storage.save(&self.key, document).await?;
        // Also save as the "last document" for restoring on the next launch
        self.storage.save(LAST_DOCUMENT_KEY, document).await?;
        log::debug!("Auto-saved {} ({} emoji)", self.key, document.len());

        self.last_save = Some(Instant::now());
        self.dirty = false;
        Ok(())
    }

    /// Load the document this manager saves, if one was stored before.
    pub async fn load(&mut self) -> Option<EmojiArt> {
        match self.storage.load(&self.key).await {
            Ok(document) => {
                self.dirty = false;
                self.last_save = Some(Instant::now());
                Some(document)
            }
            Err(e) => {
                log::info!("No saved document under {}: {}", self.key, e);
                None
            }
        }
    }

    /// Load the most recently saved document, whichever key it was saved under.
    pub async fn load_last(&mut self) -> Option<EmojiArt> {
        match self.storage.load(LAST_DOCUMENT_KEY).await {
            Ok(document) => {
                self.dirty = false;
                self.last_save = Some(Instant::now());
                Some(document)
            }
            Err(e) => {
                log::info!("No last document to restore: {}", e);
                None
            }
        }
    }

    /// Keys of stored documents, without the last-document copy.
    pub async fn list_documents(&self) -> StorageResult<Vec<String>> {
        let mut keys = self.storage.list().await?;
        keys.retain(|key| key != LAST_DOCUMENT_KEY);
        Ok(keys)
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}
