use super::*;
use serde_json::json;

// =============================================================
// MeResponse
// =============================================================

#[test]
fn me_response_null_user_is_anonymous() {
    let me: MeResponse = serde_json::from_value(json!({ "user": null })).unwrap();
    assert!(!me.is_authenticated());
}

#[test]
fn me_response_missing_user_is_anonymous() {
    let me: MeResponse = serde_json::from_value(json!({})).unwrap();
    assert!(me.user.is_none());
}

#[test]
fn me_response_with_minimal_user() {
    let me: MeResponse = serde_json::from_value(json!({
        "user": { "id": 1, "username": "domi413", "email": "d@example.com" }
    }))
    .unwrap();
    let user = me.user.unwrap();
    assert_eq!(user.username, "domi413");
    assert_eq!(user.role, "user");
    assert!(user.github_id.is_none());
}

// =============================================================
// Request bodies
// =============================================================

#[test]
fn stop_timer_request_without_notes_serializes_null() {
    let body = serde_json::to_string(&StopTimerRequest::default()).unwrap();
    assert_eq!(body, r#"{"notes":null}"#);
}

#[test]
fn stop_timer_request_with_notes() {
    let body = serde_json::to_string(&StopTimerRequest { notes: Some("review".into()) }).unwrap();
    assert_eq!(body, r#"{"notes":"review"}"#);
}

#[test]
fn new_time_entry_omits_absent_fields() {
    let entry = NewTimeEntry { duration_minutes: 30, date: None, notes: None };
    assert_eq!(serde_json::to_value(&entry).unwrap(), json!({ "duration_minutes": 30 }));
}

// =============================================================
// Responses
// =============================================================

#[test]
fn timer_status_idle_has_only_running() {
    let status: TimerStatus = serde_json::from_value(json!({ "running": false })).unwrap();
    assert_eq!(status, TimerStatus::default());
}

#[test]
fn timer_status_running() {
    let status: TimerStatus = serde_json::from_value(json!({
        "running": true, "issue_id": 4, "issue_title": "Fix login", "elapsed_seconds": 125
    }))
    .unwrap();
    assert!(status.running);
    assert_eq!(status.issue_id, Some(4));
    assert_eq!(status.elapsed_seconds, Some(125));
}

#[test]
fn issue_with_labels_and_nulls() {
    let issue: Issue = serde_json::from_value(json!({
        "id": 9, "project_id": 1, "github_number": 17, "title": "Crash on start",
        "body": null, "url": null, "state": "open", "assignee": null, "labels": ["bug"]
    }))
    .unwrap();
    assert_eq!(issue.labels.as_deref(), Some(&["bug".to_owned()][..]));
    assert!(issue.assignee.is_none());
}

#[test]
fn week_report_total_minutes() {
    let report: WeekReport = serde_json::from_value(json!({
        "labels": ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05", "2024-01-06", "2024-01-07"],
        "datasets": [
            { "label": "A", "data": [30, 0, 0, 0, 0, 0, 0], "stack": "time" },
            { "label": "B", "data": [0, 45, 15, 0, 0, 0, 0], "stack": "time" }
        ]
    }))
    .unwrap();
    assert_eq!(report.labels.len(), 7);
    assert_eq!(report.total_minutes(), 90);
}

// =============================================================
// Filters
// =============================================================

#[test]
fn issue_filter_emits_only_set_fields_in_order() {
    let filter = IssueFilter { state: Some("open".into()), project_id: Some(2), ..IssueFilter::default() };
    let pairs: Vec<_> = filter.to_query().iter().map(|(k, v)| format!("{k}={v}")).collect();
    assert_eq!(pairs, vec!["project_id=2", "state=open"]);
}

#[test]
fn empty_filters_produce_empty_query() {
    assert!(IssueFilter::default().to_query().is_empty());
    assert!(EntryFilter::default().to_query().is_empty());
}

#[test]
fn entry_filter_week_and_user() {
    let filter = EntryFilter { week_start: Some("2024-01-01".into()), user_id: Some(5), ..EntryFilter::default() };
    let query = filter.to_query();
    assert_eq!(query.get("week_start"), Some("2024-01-01"));
    assert_eq!(query.get("user_id"), Some("5"));
    assert_eq!(query.len(), 2);
}
