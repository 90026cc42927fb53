//! Session context: who is signed in and where the operator is.
//!
//! [`AuthStore`] is injected into controllers and registered with the HTTP
//! client as its [`UnauthorizedHandler`](crate::domain::ports::UnauthorizedHandler),
//! so a rejected token clears the session and sends the operator to
//! [`Route::Login`].

pub mod navigation;
pub mod persistence;
pub mod state;
pub mod store;

pub use navigation::{GuardDecision, Navigator, Route, UnknownRoute, guard};
pub use persistence::PersistedSession;
pub use state::{AuthEvent, AuthPhase, AuthState, transition};
pub use store::{AuthStore, SESSION_NOT_SAVED};
