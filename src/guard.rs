//! Navigation guard: authentication check before a route is resolved.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before every transition. The login route always passes. Any other
//! route passes once the session has been confirmed; until then the guard
//! asks the identity endpoint and redirects to login on anything but a
//! present user.
//!
//! A failed check leaves the session unchecked, so the next transition asks
//! again. There is no backoff.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use crate::config::{ClientConfig, GuardMode};
use crate::error::ApiError;
use crate::net::types::MeResponse;
use crate::routes::{LOGIN_PATH, normalize_path};
use crate::session::SessionState;

/// Source of the current session's identity.
#[async_trait::async_trait]
pub trait IdentityCheck: Send + Sync {
    /// Ask who the session belongs to. `Ok` with `user: None` means
    /// anonymous.
    ///
    /// # Errors
    ///
    /// Any failure reaching or parsing the identity endpoint.
    async fn check_identity(&self) -> Result<MeResponse, ApiError>;
}

#[async_trait::async_trait]
impl<T: IdentityCheck + ?Sized> IdentityCheck for Arc<T> {
    async fn check_identity(&self) -> Result<MeResponse, ApiError> {
        (**self).check_identity().await
    }
}

/// Guard decision for one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(String),
}

pub struct NavigationGuard<C> {
    identity: C,
    session: SessionState,
    mode: GuardMode,
}

impl<C: IdentityCheck> NavigationGuard<C> {
    #[must_use]
    pub fn new(identity: C, mode: GuardMode) -> Self {
        Self::with_session(identity, mode, SessionState::new())
    }

    /// Guard over an existing session state, shared with other holders.
    #[must_use]
    pub fn with_session(identity: C, mode: GuardMode, session: SessionState) -> Self {
        Self { identity, session, mode }
    }

    #[must_use]
    pub fn from_config(identity: C, config: &ClientConfig) -> Self {
        Self::new(identity, config.guard)
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn identity(&self) -> &C {
        &self.identity
    }

    #[must_use]
    pub fn mode(&self) -> GuardMode {
        self.mode
    }

    /// Decide whether the transition to `target` may proceed.
    pub async fn before_each(&self, target: &str) -> Navigation {
        if self.mode == GuardMode::Disabled || normalize_path(target) == LOGIN_PATH {
            return Navigation::Proceed;
        }
        if self.session.is_checked() {
            return Navigation::Proceed;
        }

        match self.identity.check_identity().await {
            Ok(MeResponse { user: Some(user) }) => {
                tracing::info!(user_id = user.id, username = %user.username, "session confirmed");
                self.session.mark_checked();
                Navigation::Proceed
            }
            Ok(MeResponse { user: None }) => {
                tracing::debug!(path = %target, "anonymous session; redirecting to login");
                Navigation::Redirect(LOGIN_PATH.to_owned())
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!(path = %target, status = e.status(), "session rejected; redirecting to login");
                Navigation::Redirect(LOGIN_PATH.to_owned())
            }
            Err(e) => {
                tracing::warn!(path = %target, error = %e, "identity check failed; redirecting to login");
                Navigation::Redirect(LOGIN_PATH.to_owned())
            }
        }
    }
}
