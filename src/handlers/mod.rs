use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

pub mod auth;
pub mod health;
pub mod workouts;

/// `302 Found` to `uri`.
pub fn found(uri: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, uri.to_string())]).into_response()
}
