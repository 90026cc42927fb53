//! Current route and the auth-aware route guard.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::state::{AuthPhase, AuthState};

/// Console screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in form.
    Login,
    /// Statistics overview.
    Dashboard,
    /// Customer list.
    Customers,
    /// SIP investment list.
    SipInvestments,
    /// Lumpsum investment list.
    LumpsumInvestments,
    /// Notification list.
    Notifications,
}

impl Route {
    /// Every route.
    pub const ALL: [Self; 6] = [
        Self::Login,
        Self::Dashboard,
        Self::Customers,
        Self::SipInvestments,
        Self::LumpsumInvestments,
        Self::Notifications,
    ];

    /// URL path.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Customers => "/customers",
            Self::SipInvestments => "/investments/sip",
            Self::LumpsumInvestments => "/investments/lumpsum",
            Self::Notifications => "/notifications",
        }
    }

    /// Whether the route needs a signed-in user.
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Raised for paths no route serves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no route for path {0}")]
pub struct UnknownRoute(String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim_end_matches('/');
        if path.is_empty() {
            return Ok(Self::Dashboard);
        }
        Self::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .ok_or_else(|| UnknownRoute(s.to_owned()))
    }
}

/// What the shell should do before showing a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the route.
    Allow,
    /// Show a loading screen until the session settles.
    Wait,
    /// Replace the route with the login form.
    RedirectToLogin,
    /// Replace the login form with the dashboard.
    RedirectToDashboard,
}

/// Decide whether `route` may be shown in `state`.
pub fn guard(route: Route, state: &AuthState) -> GuardDecision {
    match (state.phase, route.is_protected()) {
        (AuthPhase::Uninitialized | AuthPhase::Loading, true) => GuardDecision::Wait,
        (AuthPhase::Unauthenticated, true) => GuardDecision::RedirectToLogin,
        (AuthPhase::Authenticated, false) => GuardDecision::RedirectToDashboard,
        _ => GuardDecision::Allow,
    }
}

/// Shared current-route holder.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Arc<watch::Sender<Route>>,
}

impl Navigator {
    /// Navigator starting at `initial`.
    pub fn new(initial: Route) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            current: Arc::new(sender),
        }
    }

    /// Current route.
    pub fn current(&self) -> Route {
        *self.current.borrow()
    }

    /// Move to `route`.
    pub fn navigate(&self, route: Route) {
        let previous = self.current.send_replace(route);
        if previous != route {
            debug!(from = %previous, to = %route, "navigated");
        }
    }

    /// Follow route changes.
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }

    /// Apply the guard to the current route, redirecting when it says so.
    pub fn enforce(&self, state: &AuthState) -> GuardDecision {
        let decision = guard(self.current(), state);
        match decision {
            GuardDecision::RedirectToLogin => self.navigate(Route::Login),
            GuardDecision::RedirectToDashboard => self.navigate(Route::Dashboard),
            GuardDecision::Allow | GuardDecision::Wait => {}
        }
        decision
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}
