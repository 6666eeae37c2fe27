use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::CommonResult;

/// String key-value store abstraction (the browser's `localStorage`)
pub trait KeyValueStore {
    /// Read a value
    fn get_item(&self, key: &str) -> CommonResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> CommonResult<()>;

    /// Remove a value (no-op when absent)
    fn remove_item(&self, key: &str) -> CommonResult<()>;
}

/// In-memory store for testing and non-browser hosts
///
/// Clones share the same underlying map, the way every script on a page
/// shares one `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> CommonResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> CommonResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> CommonResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("authToken").unwrap(), None);

        store.set_item("authToken", "abc").unwrap();
        assert_eq!(store.get_item("authToken").unwrap(), Some("abc".to_string()));

        store.remove_item("authToken").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_items() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set_item("messages", "[]").unwrap();
        assert_eq!(other.get_item("messages").unwrap(), Some("[]".to_string()));
        assert_eq!(other.len(), 1);
    }
}
