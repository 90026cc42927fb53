//! Authentication state and its pure transition function.

use serde::Serialize;

use crate::domain::User;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthPhase {
    /// Nothing has been checked yet.
    #[default]
    Uninitialized,
    /// Rehydration or a login attempt is in flight.
    Loading,
    /// A user is signed in.
    Authenticated,
    /// Nobody is signed in.
    Unauthenticated,
}

/// Snapshot published to observers.
///
/// ## Invariants
/// - `user` and `token` are both present when `phase` is
///   [`AuthPhase::Authenticated`] and both absent when it is
///   [`AuthPhase::Unauthenticated`]. A login in flight keeps any prior pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    /// Lifecycle phase.
    pub phase: AuthPhase,
    /// Signed-in user.
    pub user: Option<User>,
    /// Bearer token.
    #[serde(skip)]
    pub token: Option<String>,
    /// Message from the last failed login, kept until the next attempt.
    pub error: Option<String>,
}

impl AuthState {
    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    /// Whether the outcome is not known yet.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, AuthPhase::Uninitialized | AuthPhase::Loading)
    }

    fn signed_in(user: User, token: String) -> Self {
        Self {
            phase: AuthPhase::Authenticated,
            user: Some(user),
            token: Some(token),
            error: None,
        }
    }

    fn signed_out(error: Option<String>) -> Self {
        Self {
            phase: AuthPhase::Unauthenticated,
            user: None,
            token: None,
            error,
        }
    }
}

/// Everything that can move the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Start-up began reading persisted state.
    RehydrateStarted,
    /// Persisted user and token were found.
    Rehydrated {
        /// Restored user.
        user: User,
        /// Restored token.
        token: String,
    },
    /// Persisted state was missing or unreadable.
    RehydrateFailed,
    /// A login attempt began.
    LoginStarted,
    /// The backend accepted the credentials.
    LoginSucceeded {
        /// Signed-in user.
        user: User,
        /// Issued token.
        token: String,
    },
    /// The attempt failed.
    LoginFailed {
        /// Reason shown on the login form.
        message: String,
    },
    /// The operator signed out.
    LoggedOut,
    /// The backend rejected the token.
    SessionExpired,
}

/// Next state after `event`.
///
/// Loading only clears the error when a login starts; rehydration keeps
/// whatever error was already shown.
pub fn transition(state: AuthState, event: AuthEvent) -> AuthState {
    match event {
        AuthEvent::RehydrateStarted => AuthState {
            phase: AuthPhase::Loading,
            ..state
        },
        AuthEvent::LoginStarted => AuthState {
            phase: AuthPhase::Loading,
            error: None,
            ..state
        },
        AuthEvent::Rehydrated { user, token } | AuthEvent::LoginSucceeded { user, token } => {
            AuthState::signed_in(user, token)
        }
        AuthEvent::RehydrateFailed | AuthEvent::LoggedOut | AuthEvent::SessionExpired => {
            AuthState::signed_out(None)
        }
        AuthEvent::LoginFailed { message } => match (state.user, state.token) {
            // A failed re-login leaves the active session, and its stored copy, in place.
            (Some(user), Some(token)) => AuthState {
                error: Some(message),
                ..AuthState::signed_in(user, token)
            },
            _ => AuthState::signed_out(Some(message)),
        },
    }
}
