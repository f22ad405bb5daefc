//! REST gateway for the time-tracking backend.
//!
//! Every outbound call goes through [`ApiClient::send`] or
//! [`ApiClient::request`]: one attempt, credentials always attached,
//! non-success statuses surfaced as [`ApiError::Request`] carrying the raw
//! response body.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here recovers. Callers decide what a failure means; the
//! navigation guard is the only caller that turns failures into a redirect.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::query::Query;
use super::request::RequestDescriptor;
use super::types::{
    Ack, Issue, MeResponse, Project, StopTimerRequest, TimeEntry, TimeEntryRow, TimerStarted, TimerStatus,
    TimerStopped, User, WeekReport,
};
use crate::config::{ClientConfig, normalize_origin};
use crate::error::ApiError;
use crate::guard::IdentityCheck;

/// Name of the session cookie set by the backend after GitHub login.
pub const SESSION_COOKIE: &str = "user_id";

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    origin: String,
}

impl ApiClient {
    /// Build a client for `config.origin`.
    ///
    /// The HTTP client keeps a cookie jar so every request carries the
    /// session cookie. A configured `session_token` is seeded into the jar
    /// as the `user_id` cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is not an absolute http(s) URL or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let origin = normalize_origin(&config.origin)?;
        let origin_url = Url::parse(&origin).map_err(|_| ApiError::InvalidOrigin(origin.clone()))?;

        let jar = Arc::new(Jar::default());
        if let Some(token) = &config.session_token {
            jar.add_cookie_str(&format!("{SESSION_COOKIE}={token}; Path=/"), &origin_url);
        }

        let http = reqwest::Client::builder().cookie_provider(jar).build()?;
        Ok(Self { http, origin })
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Issue `req` and return the parsed JSON body.
    ///
    /// # Errors
    ///
    /// [`ApiError::Request`] on a non-success status (message = raw body),
    /// [`ApiError::Transport`] when no response arrives, [`ApiError::Decode`]
    /// when a success body is not JSON.
    pub async fn send(&self, req: RequestDescriptor) -> Result<Value, ApiError> {
        self.request(req).await
    }

    /// Issue `req` and deserialize the success body into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send`]; a body that does not match `T` is an
    /// [`ApiError::Decode`].
    pub async fn request<T: DeserializeOwned>(&self, req: RequestDescriptor) -> Result<T, ApiError> {
        let text = self.execute(req).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn execute(&self, req: RequestDescriptor) -> Result<String, ApiError> {
        let url = req.url(&self.origin)?;
        let mut builder = self.http.request(req.method().to_reqwest(), url);
        if let Some(body) = req.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(method = req.method().as_str(), path = req.path(), error = %e, "request failed");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(method = req.method().as_str(), path = req.path(), status = status.as_u16(), "request done");

        if !status.is_success() {
            return Err(ApiError::Request { status: status.as_u16(), message: text });
        }
        Ok(text)
    }

    fn url_for(&self, path: &str, query: &Query) -> Result<String, ApiError> {
        let req = RequestDescriptor::get(path).with_query(query.clone());
        Ok(req.url(&self.origin)?.to_string())
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `GET /auth/me`: the identity check.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn me(&self) -> Result<MeResponse, ApiError> {
        self.request(RequestDescriptor::get("/auth/me")).await
    }

    /// Where a browser should be sent to start GitHub OAuth. No request is
    /// made.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidOrigin`] if the URL cannot be formed.
    pub fn github_login_url(&self) -> Result<String, ApiError> {
        self.url_for("/auth/github/login", &Query::new())
    }

    // =========================================================================
    // DIRECTORY
    // =========================================================================

    /// `GET /api/users`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.request(RequestDescriptor::get("/api/users")).await
    }

    /// `GET /api/projects`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.request(RequestDescriptor::get("/api/projects")).await
    }

    // =========================================================================
    // ISSUES
    // =========================================================================

    /// `GET /api/issues?…` with the given filters passed through.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn issues(&self, params: &Query) -> Result<Vec<Issue>, ApiError> {
        self.request(RequestDescriptor::get("/api/issues").with_query(params.clone())).await
    }

    /// `GET /api/issues/{id}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn issue(&self, id: i64) -> Result<Issue, ApiError> {
        self.request(RequestDescriptor::get(format!("/api/issues/{id}"))).await
    }

    /// `GET /api/issues/by-gh/{owner}/{repo}/{number}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn issue_by_github(&self, owner: &str, repo: &str, number: i64) -> Result<Issue, ApiError> {
        let req = RequestDescriptor::get("/api/issues/by-gh")
            .with_segment(owner)
            .with_segment(repo)
            .with_segment(number);
        self.request(req).await
    }

    /// `POST /api/github/refresh`: re-import issues from GitHub.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn refresh_issues(&self) -> Result<Ack, ApiError> {
        self.request(RequestDescriptor::post("/api/github/refresh")).await
    }

    // =========================================================================
    // TIMER
    // =========================================================================

    /// `POST /api/issues/{issue_id}/timer/start`. The server stops any timer
    /// already running for the user.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn start_timer(&self, issue_id: i64) -> Result<TimerStarted, ApiError> {
        self.request(RequestDescriptor::post(format!("/api/issues/{issue_id}/timer/start"))).await
    }

    /// `POST /api/timer/stop` with `{"notes": …}`; `None` is sent as `null`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn stop_timer(&self, notes: Option<&str>) -> Result<TimerStopped, ApiError> {
        let body = serde_json::to_value(StopTimerRequest { notes: notes.map(str::to_owned) })?;
        self.request(RequestDescriptor::post("/api/timer/stop").with_json(body)).await
    }

    /// `GET /api/timer/status`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn timer_status(&self) -> Result<TimerStatus, ApiError> {
        self.request(RequestDescriptor::get("/api/timer/status")).await
    }

    // =========================================================================
    // TIME ENTRIES
    // =========================================================================

    /// `POST /api/issues/{issue_id}/time-entries` with `body` as JSON.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn add_time<B: Serialize>(&self, issue_id: i64, body: &B) -> Result<TimeEntry, ApiError> {
        let body = serde_json::to_value(body)?;
        self.request(RequestDescriptor::post(format!("/api/issues/{issue_id}/time-entries")).with_json(body))
            .await
    }

    /// `GET /api/time-entries?…`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn time_entries(&self, params: &Query) -> Result<Vec<TimeEntryRow>, ApiError> {
        self.request(RequestDescriptor::get("/api/time-entries").with_query(params.clone())).await
    }

    /// `DELETE /api/time-entries/{id}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete_time_entry(&self, id: i64) -> Result<Ack, ApiError> {
        self.request(RequestDescriptor::delete(format!("/api/time-entries/{id}"))).await
    }

    // =========================================================================
    // REPORTS
    // =========================================================================

    /// `GET /api/reports/week?…`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn report_week(&self, params: &Query) -> Result<WeekReport, ApiError> {
        self.request(RequestDescriptor::get("/api/reports/week").with_query(params.clone())).await
    }

    /// Absolute URL of the printable weekly report. Pure construction; the
    /// PDF is never fetched here.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidOrigin`] if the URL cannot be formed.
    pub fn report_pdf_url(&self, params: &Query) -> Result<String, ApiError> {
        self.url_for("/api/reports/week.pdf", params)
    }

    // =========================================================================
    // SERVICE
    // =========================================================================

    /// `GET /health`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn health(&self) -> Result<Ack, ApiError> {
        self.request(RequestDescriptor::get("/health")).await
    }
}

#[async_trait::async_trait]
impl IdentityCheck for ApiClient {
    async fn check_identity(&self) -> Result<MeResponse, ApiError> {
        self.me().await
    }
}
