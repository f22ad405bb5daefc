use super::*;
use serde_json::json;

const ORIGIN: &str = "https://tracker.test";

#[test]
fn url_without_query_is_origin_plus_path() {
    let req = RequestDescriptor::get("/api/time-entries");
    assert_eq!(req.url(ORIGIN).unwrap().as_str(), "https://tracker.test/api/time-entries");
}

#[test]
fn url_with_query_appends_encoded_pairs() {
    let req = RequestDescriptor::get("/api/reports/week")
        .with_query(Query::new().with("week_start", "2024-01-01").with("user_id", 2));
    assert_eq!(
        req.url(ORIGIN).unwrap().as_str(),
        "https://tracker.test/api/reports/week?week_start=2024-01-01&user_id=2"
    );
}

#[test]
fn url_keeps_origin_port() {
    let req = RequestDescriptor::get("/auth/me");
    assert_eq!(req.url("http://127.0.0.1:8000").unwrap().as_str(), "http://127.0.0.1:8000/auth/me");
}

#[test]
fn url_rejects_garbage_origin() {
    let req = RequestDescriptor::get("/auth/me");
    assert!(matches!(req.url("nowhere"), Err(ApiError::InvalidOrigin(_))));
}

#[test]
fn constructors_set_method() {
    assert_eq!(RequestDescriptor::get("/a").method(), Method::Get);
    assert_eq!(RequestDescriptor::post("/a").method(), Method::Post);
    assert_eq!(RequestDescriptor::delete("/a").method(), Method::Delete);
}

#[test]
fn with_json_sets_body() {
    let req = RequestDescriptor::post("/api/timer/stop").with_json(json!({ "notes": null }));
    assert_eq!(req.body(), Some(&json!({ "notes": null })));
    assert!(RequestDescriptor::get("/a").body().is_none());
}

#[test]
fn method_names() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Post.as_str(), "POST");
    assert_eq!(Method::Delete.as_str(), "DELETE");
}

#[test]
fn segments_are_escaped_into_the_path() {
    let req = RequestDescriptor::get("/api/issues/by-gh")
        .with_segment("org")
        .with_segment("re#po?x/y")
        .with_segment(3);
    assert_eq!(req.url(ORIGIN).unwrap().as_str(), "https://tracker.test/api/issues/by-gh/org/re%23po%3Fx%2Fy/3");
}

#[test]
fn segments_come_before_the_query() {
    let req = RequestDescriptor::get("/api/items").with_segment("a b").with_query(Query::new().with("k", "v"));
    assert_eq!(req.url(ORIGIN).unwrap().as_str(), "https://tracker.test/api/items/a%20b?k=v");
}
