use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form,
};
use axum_extra::extract::CookieJar;

use crate::error::{AppError, Result};
use crate::handlers::found;
use crate::middleware::OptionalAuthUser;
use crate::models::{CreateUser, LoginCredentials};
use crate::repositories::{SessionRepository, UserRepository};
use crate::session::{create_session_cookie, get_session_token, remove_session_cookie};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone)]
pub struct AuthState {
    pub user_repo: UserRepository,
    pub session_repo: SessionRepository,
}

// Templates
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/register.html")]
struct RegisterTemplate {
    error: Option<String>,
    username: String,
}

fn render(template: impl Template) -> Result<Html<String>> {
    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    ))
}

fn register_error(username: &str, message: &str) -> Result<Response> {
    Ok(render(RegisterTemplate {
        error: Some(message.to_string()),
        username: username.to_string(),
    })?
    .into_response())
}

// Handlers
pub async fn login_page(OptionalAuthUser(auth_user): OptionalAuthUser) -> Result<Response> {
    if auth_user.is_some() {
        return Ok(found("/workouts"));
    }

    Ok(render(LoginTemplate { error: None })?.into_response())
}

pub async fn login_submit(
    State(state): State<AuthState>,
    jar: CookieJar,
    Form(credentials): Form<LoginCredentials>,
) -> Result<Response> {
    let user = state
        .user_repo
        .verify_password(&credentials.username, &credentials.password)
        .await?;

    match user {
        Some(user) => {
            let token = state.session_repo.create(&user.id).await?;
            tracing::info!("User {} logged in", user.username);
            let jar = jar.add(create_session_cookie(&token));
            Ok((jar, found("/workouts")).into_response())
        }
        None => {
            let template = LoginTemplate {
                error: Some("Invalid username or password".to_string()),
            };
            Ok(render(template)?.into_response())
        }
    }
}

pub async fn register_page(OptionalAuthUser(auth_user): OptionalAuthUser) -> Result<Response> {
    if auth_user.is_some() {
        return Ok(found("/workouts"));
    }

    let template = RegisterTemplate {
        error: None,
        username: String::new(),
    };
    Ok(render(template)?.into_response())
}

pub async fn register_submit(
    State(state): State<AuthState>,
    jar: CookieJar,
    Form(form): Form<CreateUser>,
) -> Result<Response> {
    let username = form.username.trim();

    if username.is_empty() {
        return register_error(username, "Username is required");
    }

    if form.password.len() < MIN_PASSWORD_LEN {
        return register_error(username, "Password must be at least 6 characters");
    }

    if state.user_repo.find_by_username(username).await?.is_some() {
        return register_error(username, "Username already exists");
    }

    let user = state.user_repo.create(username, &form.password).await?;
    tracing::info!("Registered user {}", user.username);

    let token = state.session_repo.create(&user.id).await?;
    let jar = jar.add(create_session_cookie(&token));

    Ok((jar, found("/workouts")).into_response())
}

pub async fn logout(State(state): State<AuthState>, jar: CookieJar) -> Result<Response> {
    if let Some(token) = get_session_token(&jar) {
        state.session_repo.delete(&token).await?;
    }

    let jar = jar.add(remove_session_cookie());
    Ok((jar, found("/auth/login")).into_response())
}
