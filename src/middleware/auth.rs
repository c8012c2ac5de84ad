use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::handlers::found;
use crate::models::User;
use crate::repositories::SessionRepository;
use crate::session::get_session_token;

/// The signed-in user. Extracting it is the login guard: handlers that take
/// an `AuthUser` never run for anonymous requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

impl AuthUser {
    async fn from_parts(parts: &Parts) -> Option<Self> {
        let sessions = parts.extensions.get::<SessionRepository>()?;
        let jar = CookieJar::from_headers(&parts.headers);
        let token = get_session_token(&jar)?;

        match sessions.find_user(&token).await {
            Ok(user) => user.map(AuthUser::from),
            Err(e) => {
                tracing::error!("Session lookup failed: {}", e);
                None
            }
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        AuthUser::from_parts(parts).await.ok_or(AuthRedirect)
    }
}

pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        found("/auth/login")
    }
}

/// Optional auth: `None` for anonymous requests instead of a redirect.
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(AuthUser::from_parts(parts).await))
    }
}
