//! Navigation guards consulted before the router enters a route.
//!
//! Guards only shape navigation; any real access control still happens on the
//! API, which validates the bearer token.

use crate::router::{RouteId, RouteMatch};
use crate::session::Session;

/// What a guard decided about a pending navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Redirect(RouteId),
}

/// `to` is the route being entered, `from` the route being left (if any)
pub type Guard = fn(to: &RouteMatch, from: Option<&RouteMatch>, session: &Session) -> GuardOutcome;

/// Keep anonymous users out: send them to the login view
pub fn require_authorized(to: &RouteMatch, _from: Option<&RouteMatch>, session: &Session) -> GuardOutcome {
    if session.logged_in() {
        GuardOutcome::Proceed
    } else {
        tracing::debug!("{} requires a session, redirecting to login", to.path);
        GuardOutcome::Redirect(RouteId::Login)
    }
}

/// Keep signed-in users off the login view: send them to the dashboard
pub fn require_unauthorized(to: &RouteMatch, _from: Option<&RouteMatch>, session: &Session) -> GuardOutcome {
    if session.logged_in() {
        tracing::debug!("{} is for anonymous users, redirecting to dashboard", to.path);
        GuardOutcome::Redirect(RouteId::Dashboard)
    } else {
        GuardOutcome::Proceed
    }
}
