mod common;

use axum::http::StatusCode;
use common::{body_text, location, TestApp, ADMIN_EMAIL};

#[tokio::test]
async fn test_admin_requires_login() {
    let app = TestApp::new().await;

    for uri in ["/admin/dashboard", "/admin/reservation-new", "/admin/reservation-calendar", "/admin/process-reservation/new/1/do"] {
        let res = app.get(uri).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&res), "/user/login");
    }

    let login = body_text(app.get("/user/login").await).await;
    assert!(login.contains("Log in first!"));
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new().await;
    app.state.auth_service.ensure_admin(ADMIN_EMAIL, "right-password").await.unwrap();

    let res = app.post_form("/user/login", &format!("email={}&password=wrong", ADMIN_EMAIL)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/user/login");

    let page = body_text(app.get("/user/login").await).await;
    assert!(page.contains("Invalid login credentials"));
    assert_eq!(location(&app.get("/admin/dashboard").await), "/user/login");
}

#[tokio::test]
async fn test_login_form_validation() {
    let app = TestApp::new().await;

    let res = app.post_form("/user/login", "email=not-an-email&password=").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("Invalid email address"));
    assert!(body.contains("This field cannot be blank"));
    assert!(body.contains("value=\"not-an-email\""));
}

#[tokio::test]
async fn test_login_and_logout() {
    let app = TestApp::new().await;
    app.login_admin().await;

    let home = body_text(app.get("/").await).await;
    assert!(home.contains("Logged in successfully"));
    assert!(home.contains("/user/logout"));

    assert_eq!(app.get("/admin/dashboard").await.status(), StatusCode::OK);

    let res = app.get("/user/logout").await;
    assert_eq!(location(&res), "/user/login");
    assert_eq!(location(&app.get("/admin/dashboard").await), "/user/login");
}

#[tokio::test]
async fn test_reservation_lists() {
    let app = TestApp::new().await;
    let first = app.reserve(1, "2031-05-01", "2031-05-03").await;
    let second = app.reserve(2, "2031-04-01", "2031-04-03").await;
    app.login_admin().await;

    let new_list = body_text(app.get("/admin/reservation-new").await).await;
    assert!(new_list.contains(&format!("/admin/reservations/new/{}/show", first.id)));
    assert!(new_list.contains(&format!("/admin/reservations/new/{}/show", second.id)));
    // Ordered by arrival.
    assert!(new_list.find("2031-04-01").unwrap() < new_list.find("2031-05-01").unwrap());

    let res = app.get(&format!("/admin/process-reservation/new/{}/do", first.id)).await;
    assert_eq!(location(&res), "/admin/reservation-new");

    let new_list = body_text(app.get("/admin/reservation-new").await).await;
    assert!(new_list.contains("Reservation marked as processed"));
    assert!(!new_list.contains(&format!("/admin/reservations/new/{}/show", first.id)));

    let all_list = body_text(app.get("/admin/reservation-all").await).await;
    assert!(all_list.contains(&format!("/admin/reservations/all/{}/show", first.id)));
    assert!(all_list.contains(&format!("/admin/reservations/all/{}/show", second.id)));
}

#[tokio::test]
async fn test_show_and_update_reservation() {
    let app = TestApp::new().await;
    let reservation = app.reserve(1, "2031-05-01", "2031-05-03").await;
    app.login_admin().await;

    let res = app.get(&format!("/admin/reservations/all/{}/show", reservation.id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = body_text(res).await;
    assert!(page.contains("Existing Guest"));
    assert!(page.contains("Quarters"));

    let res = app.post_form(
        &format!("/admin/reservations/all/{}", reservation.id),
        "first_name=Mina&last_name=Murray&email=mina%40example.com&phone=999&year=&month=",
    ).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/admin/reservation-all");

    let stored = app.state.reservation_repo.find_by_id(reservation.id).await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Mina");
    assert_eq!(stored.email, "mina@example.com");
    assert_eq!(stored.start_date, reservation.start_date);

    let list = body_text(app.get("/admin/reservation-all").await).await;
    assert!(list.contains("Changes saved"));

    let res = app.post_form(
        &format!("/admin/reservations/cal/{}", reservation.id),
        "first_name=Mina&last_name=Harker&email=mina%40example.com&phone=999&year=2031&month=5",
    ).await;
    assert_eq!(location(&res), "/admin/reservation-calendar?y=2031&m=5");
}

#[tokio::test]
async fn test_unknown_reservation() {
    let app = TestApp::new().await;
    app.login_admin().await;

    assert_eq!(app.get("/admin/reservations/all/404/show").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/admin/process-reservation/all/404/do").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_reservation_frees_the_room() {
    let app = TestApp::new().await;
    let reservation = app.reserve(1, "2031-05-01", "2031-05-03").await;
    app.login_admin().await;

    let res = app.get(&format!("/admin/delete-reservation/cal/{}/do?y=2031&m=5", reservation.id)).await;
    assert_eq!(location(&res), "/admin/reservation-calendar?y=2031&m=5");

    assert!(app.state.reservation_repo.find_by_id(reservation.id).await.unwrap().is_none());
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM room_restriction")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let available = app.state.room_repo
        .is_room_available(1, common::date("2031-05-01"), common::date("2031-05-03"))
        .await
        .unwrap();
    assert!(available);
}
