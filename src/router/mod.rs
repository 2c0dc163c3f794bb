pub mod routes;

pub use routes::{RouteId, RouteKind, RouteMatch, RouteRecord, ROUTES};

use std::collections::BTreeMap;

use crate::error::{Result, ShellError};
use crate::guards::GuardOutcome;
use crate::session::Session;

/// Upper bound on guard/catch-all redirects for one navigation
pub const MAX_REDIRECTS: usize = 8;

/// Where a navigation finally landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: RouteId,
    pub path: String,
    pub params: BTreeMap<String, String>,
    /// The requested path, when guards or the catch-all sent us elsewhere
    pub redirected_from: Option<String>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// Resolves paths, runs guards and tracks the current route
#[derive(Debug, Default)]
pub struct Router {
    current: Option<RouteMatch>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&RouteMatch> {
        self.current.as_ref()
    }

    pub fn current_route(&self) -> Option<RouteId> {
        match self.current.as_ref()?.record.kind {
            RouteKind::View(id) => Some(id),
            RouteKind::Redirect(_) => None,
        }
    }

    /// Navigate by route name, e.g. `push(RouteId::Details, {"id": "7"})`
    pub fn push(
        &mut self,
        route: RouteId,
        params: &BTreeMap<String, String>,
        session: &Session,
    ) -> Result<Navigation> {
        let path = routes::path_for(route, params);
        self.navigate(&path, session)
    }

    /// Navigate to `path`, following redirects until a view's guards all proceed
    pub fn navigate(&mut self, path: &str, session: &Session) -> Result<Navigation> {
        let requested = routes::normalize(path);
        let mut target = routes::resolve(&requested);
        let mut hops = 0;

        loop {
            let redirect = match target.record.kind {
                RouteKind::Redirect(to) => Some(to),
                RouteKind::View(_) => self.run_guards(&target, session),
            };

            let Some(next) = redirect else { break };

            hops += 1;
            if hops > MAX_REDIRECTS {
                tracing::warn!("Navigation to {} keeps redirecting, giving up", requested);
                return Err(ShellError::RedirectLoop(requested));
            }

            tracing::debug!("Redirecting {} -> {}", target.path, next);
            target = routes::resolve(&routes::path_for(next, &BTreeMap::new()));
        }

        let route = match target.record.kind {
            RouteKind::View(id) => id,
            // the loop only breaks on a view
            RouteKind::Redirect(to) => to,
        };

        let navigation = Navigation {
            route,
            path: target.path.clone(),
            params: target.params.clone(),
            redirected_from: (hops > 0).then(|| requested.clone()),
        };

        tracing::debug!("Entered {} at {}", route, navigation.path);
        self.current = Some(target);
        Ok(navigation)
    }

    /// First redirect among the record's guards, evaluated in order
    fn run_guards(&self, to: &RouteMatch, session: &Session) -> Option<RouteId> {
        to.record
            .guards
            .iter()
            .find_map(|guard| match guard(to, self.current.as_ref(), session) {
                GuardOutcome::Proceed => None,
                GuardOutcome::Redirect(next) => Some(next),
            })
    }
}
