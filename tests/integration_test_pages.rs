mod common;

use axum::http::StatusCode;
use common::{body_text, TestApp};
use serde_json::Value;

#[tokio::test]
async fn test_public_pages_render() {
    let app = TestApp::new().await;

    for (uri, marker) in [
        ("/", "Welcome"),
        ("/about", "About"),
        ("/general", "Quarters"),
        ("/suite", "Suite"),
        ("/contact", "Contact"),
        ("/search-availability", "Search for Availability"),
        ("/user/login", "Login"),
    ] {
        let res = app.get(uri).await;
        assert_eq!(res.status(), StatusCode::OK, "{}", uri);
        assert!(body_text(res).await.contains(marker), "{}", uri);
    }
}

#[tokio::test]
async fn test_room_pages_check_their_own_room() {
    let app = TestApp::new().await;

    let general = body_text(app.get("/general").await).await;
    assert!(general.contains("name=\"room_id\" value=\"1\""));
    let suite = body_text(app.get("/suite").await).await;
    assert!(suite.contains("name=\"room_id\" value=\"2\""));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let res = app.get("/health").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(res).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["rooms"], 2);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;
    assert_eq!(app.get("/nope").await.status(), StatusCode::NOT_FOUND);
}
