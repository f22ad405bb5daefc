//! Client route surface and the guarded router.
//!
//! Routes are history-style paths:
//!
//! | Path | Route |
//! |---|---|
//! | `/login` | [`Route::Login`] |
//! | `/` | [`Route::Backlog`] |
//! | `/issue/:id` | [`Route::Issue`] |
//! | `/timelog` | [`Route::TimeLog`] |
//! | `/reports` | [`Route::Reports`] |

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::fmt;

use crate::guard::{IdentityCheck, Navigation, NavigationGuard};
use crate::session::SessionState;

pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    /// Project backlog, the landing page.
    Backlog,
    Issue(i64),
    TimeLog,
    Reports,
    NotFound(String),
}

impl Route {
    /// Match a path against the route table. Query string, fragment and a
    /// trailing slash are ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let path = normalize_path(raw);
        match path {
            LOGIN_PATH => Self::Login,
            "/" => Self::Backlog,
            "/timelog" => Self::TimeLog,
            "/reports" => Self::Reports,
            _ => path
                .strip_prefix("/issue/")
                .and_then(|id| id.parse::<i64>().ok())
                .map_or_else(|| Self::NotFound(path.to_owned()), Self::Issue),
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_owned(),
            Self::Backlog => "/".to_owned(),
            Self::Issue(id) => format!("/issue/{id}"),
            Self::TimeLog => "/timelog".to_owned(),
            Self::Reports => "/reports".to_owned(),
            Self::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Path component of `raw` without query, fragment or trailing slash.
pub(crate) fn normalize_path(raw: &str) -> &str {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = &raw[..end];
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Where a navigation ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

impl Resolution {
    #[must_use]
    pub fn route(&self) -> &Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }

    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Route table behind a [`NavigationGuard`].
pub struct Router<C> {
    guard: NavigationGuard<C>,
}

impl<C: IdentityCheck> Router<C> {
    #[must_use]
    pub fn new(guard: NavigationGuard<C>) -> Self {
        Self { guard }
    }

    #[must_use]
    pub fn guard(&self) -> &NavigationGuard<C> {
        &self.guard
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        self.guard.session()
    }

    /// Run the guard for `path`, then resolve the route that is rendered.
    pub async fn navigate(&self, path: &str) -> Resolution {
        match self.guard.before_each(path).await {
            Navigation::Proceed => Resolution::Render(Route::parse(path)),
            Navigation::Redirect(to) => Resolution::Redirect(Route::parse(&to)),
        }
    }

    /// Forget the confirmed session; the next protected navigation checks
    /// identity again.
    pub fn logout(&self) {
        tracing::info!("session reset");
        self.guard.session().reset();
    }
}
