//! Client configuration parsed from environment variables.
//!
//! The backend origin is injected here instead of being derived from a
//! browser location at call time. [`origin_from_host`] keeps the original
//! host-based derivation available for front ends that only know their own
//! hostname.

use crate::error::ApiError;

pub const DEFAULT_STRIP_PREFIX: &str = "app.";
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";

/// Whether the navigation guard consults the identity endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardMode {
    #[default]
    Enabled,
    /// Every transition proceeds and no identity check is made.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme + host (+ port) of the backend, without a trailing slash.
    pub origin: String,
    /// Value of the `user_id` session cookie, seeded into the cookie jar.
    pub session_token: Option<String>,
    pub guard: GuardMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_owned(),
            session_token: None,
            guard: GuardMode::Enabled,
        }
    }
}

impl ClientConfig {
    /// Config for an explicit origin with every other field defaulted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidOrigin`] if `origin` is not an absolute
    /// http(s) URL.
    pub fn with_origin(origin: &str) -> Result<Self, ApiError> {
        Ok(Self { origin: normalize_origin(origin)?, ..Self::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `TIMETRACK_ORIGIN`: backend origin, takes precedence over the host
    /// - `TIMETRACK_HOST`: front-end hostname the origin is derived from
    /// - `TIMETRACK_STRIP_PREFIX`: subdomain label stripped from the host, default `app.`
    /// - `TIMETRACK_SESSION_TOKEN`: `user_id` cookie value
    /// - `TIMETRACK_GUARD`: `on`/`off` (also `true`/`false`, `1`/`0`, `yes`/`no`)
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is malformed or the guard flag is not a
    /// recognised boolean.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let origin = match (var("TIMETRACK_ORIGIN"), var("TIMETRACK_HOST")) {
            (Some(origin), _) => normalize_origin(&origin)?,
            (None, Some(host)) => {
                let prefix = var("TIMETRACK_STRIP_PREFIX").unwrap_or_else(|| DEFAULT_STRIP_PREFIX.to_owned());
                origin_from_host(host.trim(), &prefix)
            }
            (None, None) => DEFAULT_ORIGIN.to_owned(),
        };

        let guard = match var("TIMETRACK_GUARD") {
            None => GuardMode::Enabled,
            Some(raw) => match parse_bool(&raw) {
                Some(true) => GuardMode::Enabled,
                Some(false) => GuardMode::Disabled,
                None => return Err(ApiError::Config(format!("unrecognised TIMETRACK_GUARD: {raw}"))),
            },
        };

        Ok(Self { origin, session_token: var("TIMETRACK_SESSION_TOKEN"), guard })
    }
}

/// Derive the backend origin from the front-end hostname.
///
/// A leading `prefix` label (e.g. `app.`) is removed and `https://` is
/// prepended: `app.example.com` becomes `https://example.com`. Hosts without
/// the prefix are used as-is.
#[must_use]
pub fn origin_from_host(host: &str, prefix: &str) -> String {
    let stripped = host.strip_prefix(prefix).unwrap_or(host);
    format!("https://{stripped}")
}

pub(crate) fn normalize_origin(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed).map_err(|_| ApiError::InvalidOrigin(raw.to_owned()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ApiError::InvalidOrigin(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
