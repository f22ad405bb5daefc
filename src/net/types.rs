//! Wire DTOs for the time-tracking REST API.
//!
//! DESIGN
//! ======
//! Field names mirror the backend JSON exactly so serde needs no renames.
//! Dates travel as ISO-8601 strings and are not parsed on the client.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use super::query::Query;

/// Body of `GET /auth/me`. `user` is `null` for anonymous sessions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub user: Option<User>,
}

impl MeResponse {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// A user record. `/auth/me` only sends `id`, `username` and `email`; the
/// remaining fields are filled by `/api/users`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// GitHub account id, if the user signed in through GitHub.
    #[serde(default)]
    pub github_id: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_role() -> String {
    "user".to_owned()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    /// `owner/repo` of the linked GitHub repository.
    #[serde(default)]
    pub github_repo: Option<String>,
}

/// An issue imported from (or mirrored to) GitHub.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub project_id: i64,
    /// Issue number within the GitHub repository.
    #[serde(default)]
    pub github_number: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    /// HTML URL of the GitHub issue.
    #[serde(default)]
    pub url: Option<String>,
    /// `"open"` or `"closed"`.
    pub state: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

/// A stored time entry, as returned when one is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: i64,
    pub project_id: i64,
    pub issue_id: i64,
    pub date: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A row of `GET /api/time-entries`, joined with issue, user and project names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeEntryRow {
    pub id: i64,
    pub date: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub notes: Option<String>,
    pub issue_id: i64,
    pub issue_title: String,
    /// Username of the entry owner.
    pub user: String,
    /// Project name.
    pub project: String,
}

/// Body of `POST /api/issues/{id}/time-entries`. The server defaults `date`
/// to today and rejects non-positive durations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTimeEntry {
    pub duration_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /api/timer/stop`. `notes` is always serialized, as `null`
/// when absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StopTimerRequest {
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimerStarted {
    pub timer_id: i64,
    /// Start timestamp (ISO-8601, UTC).
    pub started: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimerStopped {
    pub stopped: bool,
    pub duration_minutes: i64,
    /// Time entry created from the stopped timer.
    #[serde(default)]
    pub entry_id: Option<i64>,
}

/// Body of `GET /api/timer/status`. Only `running` is present when idle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerStatus {
    pub running: bool,
    #[serde(default)]
    pub issue_id: Option<i64>,
    #[serde(default)]
    pub issue_title: Option<String>,
    #[serde(default)]
    pub elapsed_seconds: Option<i64>,
}

/// Weekly aggregate: seven day labels and per-issue minute series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekReport {
    pub labels: Vec<String>,
    pub datasets: Vec<ReportDataset>,
}

impl WeekReport {
    /// Sum of all minutes across every dataset and day.
    #[must_use]
    pub fn total_minutes(&self) -> i64 {
        self.datasets.iter().flat_map(|d| d.data.iter()).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportDataset {
    /// Issue title.
    pub label: String,
    /// Minutes per day, Monday first.
    pub data: Vec<i64>,
    pub stack: String,
}

/// Generic `{ "ok": true }` acknowledgement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// FILTERS
// =============================================================================

/// Filters accepted by `GET /api/issues`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub project_id: Option<i64>,
    pub state: Option<String>,
    pub label: Option<String>,
    pub assignee: Option<String>,
}

impl IssueFilter {
    #[must_use]
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.set_opt("project_id", self.project_id);
        query.set_opt("state", self.state.as_deref());
        query.set_opt("label", self.label.as_deref());
        query.set_opt("assignee", self.assignee.as_deref());
        query
    }
}

/// Filters accepted by `GET /api/time-entries` and the weekly reports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Monday of the week, `YYYY-MM-DD`.
    pub week_start: Option<String>,
    pub project_id: Option<i64>,
    pub user_id: Option<i64>,
    pub label: Option<String>,
    pub assignee: Option<String>,
}

impl EntryFilter {
    #[must_use]
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.set_opt("week_start", self.week_start.as_deref());
        query.set_opt("project_id", self.project_id);
        query.set_opt("user_id", self.user_id);
        query.set_opt("label", self.label.as_deref());
        query.set_opt("assignee", self.assignee.as_deref());
        query
    }
}
