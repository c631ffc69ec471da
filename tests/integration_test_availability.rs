mod common;

use axum::http::{header, StatusCode};
use common::{body_text, location, TestApp};
use serde_json::Value;

async fn check_json(app: &TestApp, form: &str) -> (bool, Value) {
    let res = app.post_form("/search-availability-json", form).await;
    assert_eq!(res.status(), StatusCode::OK);
    let sets_cookie = res.headers().contains_key(header::SET_COOKIE);
    let body = body_text(res).await;
    (sets_cookie, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_search_lists_free_rooms() {
    let app = TestApp::new().await;

    let res = app.post_form("/search-availability", "start=2031-06-01&end=2031-06-05").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_text(res).await;
    assert!(body.contains("/choose-room/1"));
    assert!(body.contains("/choose-room/2"));
    assert!(body.contains("2031-06-01"));
}

#[tokio::test]
async fn test_search_skips_overlapping_rooms_but_not_touching_ones() {
    let app = TestApp::new().await;
    app.reserve(1, "2031-06-01", "2031-06-05").await;
    app.reserve(2, "2031-06-03", "2031-06-10").await;

    // Room 1 is free again from its departure day; room 2 still occupied.
    let res = app.post_form("/search-availability", "start=2031-06-05&end=2031-06-08").await;
    let body = body_text(res).await;
    assert!(body.contains("/choose-room/1"));
    assert!(!body.contains("/choose-room/2"));
}

#[tokio::test]
async fn test_no_availability_flashes_once() {
    let app = TestApp::new().await;
    app.reserve(1, "2031-07-01", "2031-07-10").await;
    app.reserve(2, "2031-07-01", "2031-07-10").await;

    let res = app.post_form("/search-availability", "start=2031-07-02&end=2031-07-04").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/search-availability");

    let first = body_text(app.get("/search-availability").await).await;
    assert!(first.contains("No Availability"));

    let second = body_text(app.get("/search-availability").await).await;
    assert!(!second.contains("No Availability"));
}

#[tokio::test]
async fn test_search_rejects_malformed_dates() {
    let app = TestApp::new().await;

    for form in ["start=2031-6-01&end=2031-06-05", "start=01-06-2031&end=2031-06-05", "start=2031-06-01", "start=2031-02-30&end=2031-03-01"] {
        let res = app.post_form("/search-availability", form).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "form {}", form);
    }
}

#[tokio::test]
async fn test_json_check_reports_availability_without_touching_session() {
    let app = TestApp::new().await;
    app.reserve(1, "2031-08-10", "2031-08-15").await;

    let (sets_cookie, free) = check_json(&app, "start_date=2031-08-15&end_date=2031-08-18&room_id=1").await;
    assert!(!sets_cookie);
    assert_eq!(free["ok"], true);
    assert_eq!(free["message"], "");
    assert_eq!(free["room_id"], "1");
    assert_eq!(free["start_date"], "2031-08-15");
    assert_eq!(free["end_date"], "2031-08-18");

    let (_, taken) = check_json(&app, "start_date=2031-08-12&end_date=2031-08-13&room_id=1").await;
    assert_eq!(taken["ok"], false);
}

#[tokio::test]
async fn test_json_check_tolerates_garbage() {
    let app = TestApp::new().await;

    let (_, body) = check_json(&app, "start_date=soon&end_date=later&room_id=abc").await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["room_id"], "0");
    assert_eq!(body["start_date"], "soon");
    assert_eq!(body["end_date"], "later");
}
