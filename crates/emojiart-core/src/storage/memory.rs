//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::document::EmojiArt;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Documents are kept encoded, the same way a persistent backend holds them.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, document: &EmojiArt) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let encoded = document.encode();
        Box::pin(async move {
            let encoded = encoded?;
            self.documents.write().map_err(lock_error)?.insert(key, encoded);
            Ok(())
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<EmojiArt>> {
        let key = key.to_string();
        Box::pin(async move {
            let docs = self.documents.read().map_err(lock_error)?;
            let bytes = docs.get(&key).ok_or_else(|| StorageError::NotFound(key.clone()))?;
            Ok(EmojiArt::decode(bytes)?)
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            self.documents.write().map_err(lock_error)?.remove(&key);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let docs = self.documents.read().map_err(lock_error)?;
            Ok(docs.keys().cloned().collect())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move {
            let docs = self.documents.read().map_err(lock_error)?;
            Ok(docs.contains_key(&key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    fn sample() -> EmojiArt {
        let mut doc = EmojiArt::new();
        doc.add_emoji("🍎", 1, 2, 40);
        doc.add_emoji("🌏", -3, 4, 50);
        doc
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let doc = sample();

        block_on(storage.save("test", &doc)).unwrap();
        let loaded = block_on(storage.load("test")).unwrap();

        assert!(loaded.same_content(&doc));
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();

        assert!(!block_on(storage.exists("test")).unwrap());
        block_on(storage.save("test", &sample())).unwrap();
        assert!(block_on(storage.exists("test")).unwrap());

        block_on(storage.delete("test")).unwrap();
        assert!(!block_on(storage.exists("test")).unwrap());
        // Deleting again is fine.
        block_on(storage.delete("test")).unwrap();
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        let doc = EmojiArt::new();

        block_on(storage.save("doc1", &doc)).unwrap();
        block_on(storage.save("doc2", &doc)).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"doc1".to_string()));
        assert!(list.contains(&"doc2".to_string()));
    }
}
