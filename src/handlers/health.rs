use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::db::DbPool;
use crate::version::GIT_VERSION;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: &'static str,
    git_version: &'static str,
}

fn ping(pool: &DbPool) -> bool {
    pool.get()
        .map(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)).is_ok())
        .unwrap_or(false)
}

pub async fn health_check(State(pool): State<DbPool>) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = tokio::task::spawn_blocking(move || ping(&pool))
        .await
        .unwrap_or(false);

    if database_ok {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "ok",
                git_version: GIT_VERSION,
            }),
        )
    } else {
        tracing::error!("Health check failed: database unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: "unavailable",
                git_version: GIT_VERSION,
            }),
        )
    }
}
