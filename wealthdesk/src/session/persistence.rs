//! Token and user persisted across runs.

use std::sync::Arc;

use tracing::warn;

use crate::domain::User;
use crate::domain::ports::{SessionStorage, SessionStorageError, TOKEN_KEY, USER_KEY};

/// Reads and writes the `token` and `user` keys as one unit.
#[derive(Clone)]
pub struct PersistedSession {
    storage: Arc<dyn SessionStorage>,
}

impl PersistedSession {
    /// Session persisted in `storage`.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Stored user and token, when both are present and the user parses.
    pub fn load(&self) -> Option<(User, String)> {
        let read = |key: &str| match self.storage.get(key) {
            Ok(value) => value.filter(|value| !value.is_empty()),
            Err(err) => {
                warn!(key, error = %err, "session storage read failed");
                None
            }
        };
        let token = read(TOKEN_KEY)?;
        let raw_user = read(USER_KEY)?;
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some((user, token)),
            Err(err) => {
                warn!(error = %err, "discarding unreadable persisted user");
                None
            }
        }
    }

    /// Write both keys, rolling back on failure.
    ///
    /// # Errors
    /// Returns the storage failure after removing any half-written state.
    pub fn save(&self, user: &User, token: &str) -> Result<(), SessionStorageError> {
        let raw_user = serde_json::to_string(user)
            .map_err(|err| SessionStorageError::write(err.to_string()))?;
        let written = self
            .storage
            .set(TOKEN_KEY, token)
            .and_then(|()| self.storage.set(USER_KEY, &raw_user));
        if written.is_err() {
            self.clear();
        }
        written
    }

    /// Remove both keys. Failures are logged and otherwise ignored.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, error = %err, "session storage remove failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::MockSessionStorage;
    use crate::outbound::storage::MemorySessionStorage;

    #[fixture]
    fn user() -> User {
        let at = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().expect("timestamp");
        User {
            id: "admin-1".into(),
            username: "admin".into(),
            email: "admin@example.com".into(),
            first_name: None,
            last_name: None,
            role: "admin".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn saves_and_loads_together(user: User) {
        let session = PersistedSession::new(Arc::new(MemorySessionStorage::new()));
        session.save(&user, "tok").expect("memory storage writes");
        assert_eq!(session.load(), Some((user, "tok".to_owned())));
        session.clear();
        assert_eq!(session.load(), None);
    }

    #[rstest]
    fn token_without_user_is_no_session() {
        let storage = Arc::new(MemorySessionStorage::new());
        storage.set(TOKEN_KEY, "tok").expect("write");
        storage.set(USER_KEY, "{not json").expect("write");
        assert_eq!(PersistedSession::new(storage).load(), None);
    }

    #[rstest]
    fn failed_write_rolls_back(user: User) {
        let mut storage = MockSessionStorage::new();
        storage.expect_set().withf(|key, _| key == TOKEN_KEY).returning(|_, _| Ok(()));
        storage
            .expect_set()
            .withf(|key, _| key == USER_KEY)
            .returning(|_, _| Err(SessionStorageError::write("disk full")));
        storage.expect_remove().times(2).returning(|_| Ok(()));
        let session = PersistedSession::new(Arc::new(storage));
        assert!(session.save(&user, "tok").is_err());
    }
}
