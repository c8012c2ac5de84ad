#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use liftplan::db::{create_memory_pool, DbPool};
use liftplan::handlers::{auth, workouts};
use liftplan::middleware::AuthUser;
use liftplan::models::{Exercise, ExerciseKind, User, Workout};
use liftplan::repositories::{
    ExerciseRepository, SessionRepository, UserRepository, WorkoutRepository,
};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    liftplan::migrations::run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn workouts_state(pool: &DbPool, workout_size: usize, swap_count: usize) -> workouts::WorkoutsState {
    workouts::WorkoutsState {
        workout_repo: WorkoutRepository::new(pool.clone()),
        exercise_repo: ExerciseRepository::new(pool.clone()),
        workout_size,
        swap_count,
    }
}

pub fn create_test_app(pool: DbPool) -> Router {
    create_test_app_with_sizes(pool, 1, 3)
}

pub fn create_test_app_with_sizes(pool: DbPool, workout_size: usize, swap_count: usize) -> Router {
    let auth_state = auth::AuthState {
        user_repo: UserRepository::new(pool.clone()),
        session_repo: SessionRepository::new(pool.clone()),
    };
    let workouts_state = workouts_state(&pool, workout_size, swap_count);

    liftplan::routes::create_router(auth_state, workouts_state, pool)
}

pub async fn create_test_user(pool: &DbPool, username: &str, password: &str) -> User {
    UserRepository::new(pool.clone())
        .create(username, password)
        .await
        .unwrap()
}

pub fn auth_user(user: &User) -> AuthUser {
    AuthUser::from(user.clone())
}

pub async fn create_session_cookie(pool: &DbPool, user: &User) -> String {
    let token = SessionRepository::new(pool.clone())
        .create(&user.id)
        .await
        .unwrap();
    format!("session={}", token)
}

pub fn extract_cookie_header(set_cookie: &str) -> String {
    // Keep only the name=value part for use in a Cookie header
    set_cookie.split(';').next().unwrap_or("").to_string()
}

pub async fn create_test_exercise(pool: &DbPool, name: &str, kind: ExerciseKind) -> Exercise {
    ExerciseRepository::new(pool.clone())
        .create(name, kind)
        .await
        .unwrap()
}

pub async fn create_test_workout(
    pool: &DbPool,
    user_id: &str,
    name: &str,
    exercise_ids: &[String],
) -> Workout {
    WorkoutRepository::new(pool.clone())
        .create(user_id, name, exercise_ids)
        .await
        .unwrap()
}

pub async fn get(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_form(app: Router, uri: &str, cookie: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).to_string()
}
