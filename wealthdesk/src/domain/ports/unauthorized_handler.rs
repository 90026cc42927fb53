//! Driven port notified when the backend rejects the session.

/// Reacts to an HTTP 401 seen by the API client.
#[cfg_attr(test, mockall::automock)]
pub trait UnauthorizedHandler: Send + Sync {
    /// Clear the session and force the operator back to the login route.
    fn session_rejected(&self);
}
