use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::db::DbPool;
use crate::handlers::{auth, found, health, workouts};
use crate::repositories::SessionRepository;

pub fn create_router(
    auth_state: auth::AuthState,
    workouts_state: workouts::WorkoutsState,
    pool: DbPool,
) -> Router {
    let session_repo: SessionRepository = auth_state.session_repo.clone();

    Router::new()
        .route("/", get(|| async { found("/workouts") }))
        // Health
        .route("/health", get(health::health_check))
        .with_state(pool)
        // Auth routes
        .route(
            "/auth/login",
            get(auth::login_page).post(auth::login_submit),
        )
        .route(
            "/auth/register",
            get(auth::register_page).post(auth::register_submit),
        )
        .route("/auth/logout", post(auth::logout))
        .with_state(auth_state)
        // Workout routes
        .route("/workouts", get(workouts::list).post(workouts::create))
        .route("/workouts/new", get(workouts::new_page))
        .route(
            "/workouts/{id}",
            get(workouts::show).delete(workouts::destroy),
        )
        .route("/workouts/{id}/delete", post(workouts::destroy))
        .with_state(workouts_state)
        // Session lookups for the AuthUser extractor
        .layer(Extension(session_repo))
}
