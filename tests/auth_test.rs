mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

#[tokio::test]
async fn test_login_page_renders() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = common::get(app, "/auth/login", "").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    assert!(body.contains("Log in"));
}

#[tokio::test]
async fn test_login_page_redirects_when_signed_in() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "alice", "password123").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = common::get(app, "/auth/login", &cookie).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/workouts");
}

#[tokio::test]
async fn test_login_valid_credentials() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    common::create_test_user(&pool, "alice", "password123").await;

    let response = common::post_form(
        app.clone(),
        "/auth/login",
        "",
        "username=alice&password=password123",
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/workouts");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("session="));

    // The issued cookie opens the workouts page
    let cookie = common::extract_cookie_header(&set_cookie);
    let response = common::get(app, "/workouts", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    common::create_test_user(&pool, "alice", "password123").await;

    let response =
        common::post_form(app, "/auth/login", "", "username=alice&password=wrongpass").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = common::body_string(response).await;
    assert!(body.contains("Invalid username or password"));
}

#[tokio::test]
async fn test_register_creates_user_and_logs_in() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let response = common::post_form(
        app,
        "/auth/register",
        "",
        "username=bob&password=secret123",
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/workouts");
    assert!(response.headers().get(header::SET_COOKIE).is_some());

    let user_repo = liftplan::repositories::UserRepository::new(pool);
    assert!(user_repo.find_by_username("bob").await.unwrap().is_some());
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let response =
        common::post_form(app, "/auth/register", "", "username=bob&password=123").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    assert!(body.contains("Password must be at least 6 characters"));

    let user_repo = liftplan::repositories::UserRepository::new(pool);
    assert_eq!(user_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_rejects_taken_username() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    common::create_test_user(&pool, "alice", "password123").await;

    let response = common::post_form(
        app,
        "/auth/register",
        "",
        "username=alice&password=another123",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    assert!(body.contains("Username already exists"));
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "alice", "password123").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = common::post_form(app.clone(), "/auth/logout", &cookie, "").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/auth/login");

    let response = common::get(app, "/workouts", &cookie).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/auth/login");
}

#[tokio::test]
async fn test_unknown_session_cookie_redirects_to_login() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/workouts")
                .header(header::COOKIE, "session=not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/auth/login");
}

#[tokio::test]
async fn test_health_check() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = common::get(app, "/health", "").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_str(&common::body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}
