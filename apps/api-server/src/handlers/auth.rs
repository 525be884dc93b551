//! Login, logout and registration.

use actix_web::{HttpResponse, http::header, web};

use plaza_core::domain::User;
use plaza_core::error::DomainError;
use plaza_core::services::accounts;
use plaza_shared::MessageResponse;
use plaza_shared::dto::{LoginForm, RegisterForm};

use crate::middleware::auth::{removal_cookie, session_cookie};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Issue a session for `user` and send them to the index.
fn start_session(state: &AppState, user: &User) -> AppResult<HttpResponse> {
    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(session_cookie(token, state.tokens.expiration_seconds()))
        .finish())
}

/// POST /login
pub async fn login(state: web::Data<AppState>, form: web::Form<LoginForm>) -> AppResult<HttpResponse> {
    let user = accounts::authenticate(
        &state.repos,
        state.passwords.as_ref(),
        &form.username,
        &form.password,
    )
    .await?;

    match user {
        Some(user) => {
            tracing::info!(user_id = user.id, "User logged in");
            start_session(&state, &user)
        }
        None => {
            tracing::debug!(username = %form.username, "Rejected login");
            Ok(HttpResponse::Ok().json(MessageResponse::new("Invalid username and/or password.")))
        }
    }
}

/// POST /logout
pub async fn logout() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(removal_cookie())
        .finish()
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    match accounts::register(&state.repos, state.passwords.as_ref(), &form).await {
        Ok(user) => start_session(&state, &user),
        Err(DomainError::Validation(message)) | Err(DomainError::Duplicate(message)) => {
            Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
        }
        Err(e) => Err(e.into()),
    }
}
