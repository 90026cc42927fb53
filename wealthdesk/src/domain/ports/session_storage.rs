//! Driven port for the persisted key-value session state.

use super::define_port_error;

/// Key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-encoded signed-in user.
pub const USER_KEY: &str = "user";

define_port_error! {
    /// Errors raised by session storage adapters.
    pub enum SessionStorageError {
        /// Stored state could not be read.
        Read { message: String } => "session storage read failed: {message}",
        /// State could not be written.
        Write { message: String } => "session storage write failed: {message}",
    }
}

/// String key-value storage that outlives one console run.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    /// Value at `key`, if present.
    fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError>;

    /// Store `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), SessionStorageError>;
}
