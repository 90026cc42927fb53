//! Process-wide authentication store.
//!
//! The store owns the only copy of the auth state and publishes every change
//! through a `watch` channel. Controllers and the route guard read snapshots;
//! only the store's own operations and the 401 path apply events.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::navigation::{Navigator, Route};
use super::persistence::PersistedSession;
use super::state::{self, AuthEvent, AuthState};
use crate::domain::messages::LOGIN_FAILED;
use crate::domain::ports::{AuthService, SessionStorage, UnauthorizedHandler};
use crate::domain::{LoginCredentials, LoginValidationError};

/// Shown when the session could not be written after a successful login.
pub const SESSION_NOT_SAVED: &str = "Could not save the session";

/// Single source of truth for who is signed in.
pub struct AuthStore {
    auth: Arc<dyn AuthService>,
    persisted: PersistedSession,
    navigator: Navigator,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    /// Store in the uninitialised phase.
    pub fn new(
        auth: Arc<dyn AuthService>,
        storage: Arc<dyn SessionStorage>,
        navigator: Navigator,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            auth,
            persisted: PersistedSession::new(storage),
            navigator,
            state,
        }
    }

    /// Pure transition applied for every event.
    pub fn transition(state: AuthState, event: AuthEvent) -> AuthState {
        state::transition(state, event)
    }

    /// Current snapshot.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Follow state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Navigator the store redirects on expiry.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Bearer token of the signed-in user.
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    fn apply(&self, event: AuthEvent) {
        debug!(event = event_name(&event), "auth event");
        self.state.send_modify(|current| {
            let previous = std::mem::take(current);
            *current = Self::transition(previous, event);
        });
    }

    /// Restore the persisted session, if any.
    pub fn initialize(&self) {
        self.apply(AuthEvent::RehydrateStarted);
        match self.persisted.load() {
            Some((user, token)) => {
                info!(user = %user.email, "session restored");
                self.apply(AuthEvent::Rehydrated { user, token });
            }
            None => self.apply(AuthEvent::RehydrateFailed),
        }
    }

    /// Sign in; returns whether this attempt succeeded.
    ///
    /// Failures leave the message in [`AuthState::error`] and persist nothing.
    /// A session that was already active stays signed in, in state and in
    /// storage.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.apply(AuthEvent::LoginStarted);
        let credentials = match LoginCredentials::try_from_parts(email, password) {
            Ok(credentials) => credentials,
            Err(err) => {
                self.fail(validation_message(&err));
                return false;
            }
        };

        match self.auth.login(&credentials).await.into_result() {
            Ok(Some(session)) => {
                if let Err(err) = self.persisted.save(&session.user, &session.token) {
                    warn!(error = %err, "could not persist session");
                    self.fail(SESSION_NOT_SAVED);
                    return false;
                }
                info!(user = %session.user.email, "signed in");
                self.apply(AuthEvent::LoginSucceeded {
                    user: session.user,
                    token: session.token,
                });
                true
            }
            Ok(None) => {
                self.fail(LOGIN_FAILED);
                false
            }
            Err(message) => {
                self.fail(&message);
                false
            }
        }
    }

    fn fail(&self, message: &str) {
        info!(reason = message, "sign-in failed");
        self.apply(AuthEvent::LoginFailed {
            message: message.to_owned(),
        });
    }

    /// Clear the persisted session and sign out. Does not navigate.
    pub fn logout(&self) {
        self.persisted.clear();
        self.apply(AuthEvent::LoggedOut);
        info!("signed out");
    }
}

impl UnauthorizedHandler for AuthStore {
    fn session_rejected(&self) {
        warn!("session rejected by backend");
        self.persisted.clear();
        self.apply(AuthEvent::SessionExpired);
        self.navigator.navigate(Route::Login);
    }
}

fn validation_message(err: &LoginValidationError) -> &'static str {
    match err {
        LoginValidationError::EmptyEmail => "Email is required",
        LoginValidationError::EmptyPassword => "Password is required",
    }
}

const fn event_name(event: &AuthEvent) -> &'static str {
    match event {
        AuthEvent::RehydrateStarted => "rehydrate_started",
        AuthEvent::Rehydrated { .. } => "rehydrated",
        AuthEvent::RehydrateFailed => "rehydrate_failed",
        AuthEvent::LoginStarted => "login_started",
        AuthEvent::LoginSucceeded { .. } => "login_succeeded",
        AuthEvent::LoginFailed { .. } => "login_failed",
        AuthEvent::LoggedOut => "logged_out",
        AuthEvent::SessionExpired => "session_expired",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};
    use pagination::Envelope;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{MockAuthService, TOKEN_KEY, USER_KEY};
    use crate::domain::{AuthSession, User};
    use crate::outbound::storage::MemorySessionStorage;
    use crate::session::state::AuthPhase;

    #[fixture]
    fn admin() -> User {
        let at = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().expect("timestamp");
        User {
            id: "admin-1".into(),
            username: "admin".into(),
            email: "admin@example.com".into(),
            first_name: Some("Super".into()),
            last_name: Some("Admin".into()),
            role: "admin".into(),
            created_at: at,
            updated_at: at,
        }
    }

    fn store_with(auth: MockAuthService, storage: Arc<MemorySessionStorage>) -> AuthStore {
        AuthStore::new(Arc::new(auth), storage, Navigator::new(Route::Customers))
    }

    #[rstest]
    #[tokio::test]
    async fn successful_login_persists_user_and_token(admin: User) {
        let mut auth = MockAuthService::new();
        let session = AuthSession {
            user: admin.clone(),
            token: "tok-1".into(),
        };
        auth.expect_login()
            .returning(move |_| Envelope::ok("Login successful", session.clone()));
        let storage = Arc::new(MemorySessionStorage::new());
        let store = store_with(auth, storage.clone());

        assert!(store.login("admin@example.com", "admin123").await);
        let state = store.state();
        assert_eq!(state.phase, AuthPhase::Authenticated);
        assert_eq!(state.user, Some(admin));
        assert_eq!(storage.get(TOKEN_KEY).expect("read"), Some("tok-1".to_owned()));
        assert!(storage.get(USER_KEY).expect("read").is_some());
    }

    #[tokio::test]
    async fn rejected_login_keeps_error_and_persists_nothing() {
        let mut auth = MockAuthService::new();
        auth.expect_login()
            .returning(|_| Envelope::failure("Invalid email or password"));
        let storage = Arc::new(MemorySessionStorage::new());
        let store = store_with(auth, storage.clone());

        assert!(!store.login("admin@example.com", "wrong").await);
        let state = store.state();
        assert!(!state.is_authenticated());
        assert_eq!(state.error.as_deref(), Some("Invalid email or password"));
        assert_eq!(storage.get(TOKEN_KEY).expect("read"), None);
    }

    #[tokio::test]
    async fn blank_credentials_fail_without_calling_the_service() {
        let mut auth = MockAuthService::new();
        auth.expect_login().never();
        let store = store_with(auth, Arc::new(MemorySessionStorage::new()));

        assert!(!store.login("  ", "admin123").await);
        assert_eq!(store.state().error.as_deref(), Some("Email is required"));
    }

    #[rstest]
    fn initialize_restores_persisted_session(admin: User) {
        let storage = Arc::new(MemorySessionStorage::new());
        storage.set(TOKEN_KEY, "tok-1").expect("write");
        storage
            .set(USER_KEY, &serde_json::to_string(&admin).expect("json"))
            .expect("write");
        let store = store_with(MockAuthService::new(), storage);

        store.initialize();
        assert!(store.state().is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok-1"));
    }

    #[test]
    fn initialize_without_state_is_unauthenticated() {
        let store = store_with(MockAuthService::new(), Arc::new(MemorySessionStorage::new()));
        let mut changes = store.subscribe();
        store.initialize();
        assert!(changes.has_changed().expect("sender alive"));
        assert_eq!(changes.borrow_and_update().phase, AuthPhase::Unauthenticated);
    }

    #[rstest]
    fn rejection_clears_session_and_redirects(admin: User) {
        let storage = Arc::new(MemorySessionStorage::new());
        storage.set(TOKEN_KEY, "tok-1").expect("write");
        storage
            .set(USER_KEY, &serde_json::to_string(&admin).expect("json"))
            .expect("write");
        let store = store_with(MockAuthService::new(), storage.clone());
        store.initialize();

        store.session_rejected();
        assert_eq!(store.state().phase, AuthPhase::Unauthenticated);
        assert_eq!(store.navigator().current(), Route::Login);
        assert_eq!(storage.get(TOKEN_KEY).expect("read"), None);
    }

    #[rstest]
    fn logout_clears_without_navigating(admin: User) {
        let storage = Arc::new(MemorySessionStorage::new());
        storage.set(TOKEN_KEY, "tok-1").expect("write");
        storage
            .set(USER_KEY, &serde_json::to_string(&admin).expect("json"))
            .expect("write");
        let store = store_with(MockAuthService::new(), storage.clone());
        store.initialize();

        store.logout();
        assert!(!store.state().is_authenticated());
        assert_eq!(store.navigator().current(), Route::Customers);
        assert_eq!(storage.get(USER_KEY).expect("read"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_relogin_keeps_state_and_storage_in_step(admin: User) {
        let attempts = AtomicUsize::new(0);
        let session = AuthSession {
            user: admin.clone(),
            token: "tok-1".into(),
        };
        let mut auth = MockAuthService::new();
        auth.expect_login().times(2).returning(move |_| {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Envelope::ok("Login successful", session.clone())
            } else {
                Envelope::failure("Invalid email or password")
            }
        });
        let storage = Arc::new(MemorySessionStorage::new());
        let store = store_with(auth, storage.clone());

        assert!(store.login("admin@example.com", "admin123").await);
        assert!(!store.login("admin@example.com", "wrong").await);

        let state = store.state();
        assert!(state.is_authenticated());
        assert_eq!(state.error.as_deref(), Some("Invalid email or password"));
        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert_eq!(storage.get(TOKEN_KEY).expect("read"), Some("tok-1".to_owned()));

        let reloaded = store_with(MockAuthService::new(), storage);
        reloaded.initialize();
        assert!(reloaded.state().is_authenticated());
        assert_eq!(reloaded.token(), store.token());
    }
}
