//! Process-local session storage.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::ports::{SessionStorage, SessionStorageError};

/// Session storage that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionStorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::TOKEN_KEY;

    #[test]
    fn set_get_remove() {
        let storage = MemorySessionStorage::new();
        assert_eq!(storage.get(TOKEN_KEY).expect("get"), None);

        storage.set(TOKEN_KEY, "abc").expect("set");
        storage.set(TOKEN_KEY, "def").expect("overwrite");
        assert_eq!(storage.get(TOKEN_KEY).expect("get").as_deref(), Some("def"));

        storage.remove(TOKEN_KEY).expect("remove");
        storage.remove(TOKEN_KEY).expect("absent keys remove cleanly");
        assert_eq!(storage.get(TOKEN_KEY).expect("get"), None);
    }
}
