// Route table for the dashboard shell
//
// Records are matched in order; the catch-all must stay last.

use std::collections::BTreeMap;
use std::fmt;

use crate::guards::{require_authorized, require_unauthorized, Guard};

/// Layout every view renders inside
pub const MAIN_LAYOUT: &str = "main-layout";

/// Named views of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Login,
    Dashboard,
    Details,
}

impl RouteId {
    pub fn name(&self) -> &'static str {
        match self {
            RouteId::Login => "login-view",
            RouteId::Dashboard => "dashboard-view",
            RouteId::Details => "details-view",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "login-view" => Some(RouteId::Login),
            "dashboard-view" => Some(RouteId::Dashboard),
            "details-view" => Some(RouteId::Details),
            _ => None,
        }
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Render the view once its guards pass
    View(RouteId),
    /// Send the navigation elsewhere without rendering anything
    Redirect(RouteId),
}

pub struct RouteRecord {
    /// Pattern: literal segments, `:param` and optional `:param?`; `*` matches anything
    pub path: &'static str,
    pub kind: RouteKind,
    pub layout: Option<&'static str>,
    /// Evaluated in order; the first redirect wins
    pub guards: &'static [Guard],
}

impl fmt::Debug for RouteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRecord")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("layout", &self.layout)
            .field("guards", &self.guards.len())
            .finish()
    }
}

impl RouteRecord {
    pub fn name(&self) -> &'static str {
        match self.kind {
            RouteKind::View(id) => id.name(),
            RouteKind::Redirect(_) => "catch-all",
        }
    }
}

pub static ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: "/",
        kind: RouteKind::View(RouteId::Login),
        layout: Some(MAIN_LAYOUT),
        guards: &[require_unauthorized],
    },
    RouteRecord {
        path: "/dashboard",
        kind: RouteKind::View(RouteId::Dashboard),
        layout: Some(MAIN_LAYOUT),
        guards: &[require_authorized],
    },
    RouteRecord {
        path: "/details/:id?",
        kind: RouteKind::View(RouteId::Details),
        layout: Some(MAIN_LAYOUT),
        guards: &[require_authorized],
    },
    RouteRecord {
        path: "*",
        kind: RouteKind::Redirect(RouteId::Login),
        layout: None,
        guards: &[],
    },
];

/// A path resolved against the route table
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub record: &'static RouteRecord,
    /// Normalized path (no query, no fragment, no trailing slash)
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    pub fn name(&self) -> &'static str {
        self.record.name()
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Match `path` against [`ROUTES`]; the catch-all guarantees a result
pub fn resolve(path: &str) -> RouteMatch {
    let path = normalize(path);
    let found = {
        let parts: Vec<&str> = segments(&path).collect();
        ROUTES.iter().find_map(|record| {
            match_pattern(record.path, &parts).map(|params| (record, params))
        })
    };

    // The table ends with "*", so the fallback only runs if someone removes it
    let (record, params) = found.unwrap_or_else(|| (&ROUTES[ROUTES.len() - 1], BTreeMap::new()));

    RouteMatch {
        record,
        path,
        params,
    }
}

/// Find the record rendering `id`
pub fn record_for(id: RouteId) -> Option<&'static RouteRecord> {
    ROUTES.iter().find(|r| r.kind == RouteKind::View(id))
}

/// Build the concrete path for a named route; unknown or missing params are dropped.
/// Param values are percent-encoded so `/`, `?` and `#` survive a round trip through [`resolve`].
pub fn path_for(id: RouteId, params: &BTreeMap<String, String>) -> String {
    let pattern = record_for(id).map(|r| r.path).unwrap_or("/");
    let mut path = String::new();

    for segment in segments(pattern) {
        match segment.strip_prefix(':') {
            Some(param) => {
                let key = param.trim_end_matches('?');
                if let Some(value) = params.get(key).filter(|v| !v.is_empty()) {
                    path.push('/');
                    path.push_str(&urlencoding::encode(value));
                }
            }
            None => {
                path.push('/');
                path.push_str(segment);
            }
        }
    }

    if path.is_empty() {
        path.push('/');
    }
    path
}

/// Strip query and fragment, force a leading slash, drop trailing slashes
pub fn normalize(path: &str) -> String {
    let end = path.find(|c| c == '?' || c == '#').unwrap_or(path.len());
    let joined = segments(&path[..end]).collect::<Vec<_>>().join("/");
    format!("/{}", joined)
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_pattern(pattern: &str, path: &[&str]) -> Option<BTreeMap<String, String>> {
    if pattern == "*" {
        return Some(BTreeMap::new());
    }

    let mut params = BTreeMap::new();
    let mut remaining = path.iter();

    for segment in segments(pattern) {
        let actual = remaining.next();
        match segment.strip_prefix(':') {
            Some(param) => {
                let (key, optional) = match param.strip_suffix('?') {
                    Some(key) => (key, true),
                    None => (param, false),
                };
                match actual {
                    Some(value) => {
                        let decoded = urlencoding::decode(value)
                            .map(|v| v.into_owned())
                            .unwrap_or_else(|_| value.to_string());
                        params.insert(key.to_string(), decoded);
                    }
                    None if optional => {}
                    None => return None,
                }
            }
            None => {
                if actual != Some(&segment) {
                    return None;
                }
            }
        }
    }

    if remaining.next().is_some() {
        return None;
    }

    Some(params)
}
