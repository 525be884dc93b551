//! Post authoring, likes and comments.

use actix_web::{HttpResponse, web};

use plaza_core::services::{posts, social};
use plaza_shared::MessageResponse;
use plaza_shared::dto::ContentRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /new
pub async fn new_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ContentRequest>,
) -> AppResult<HttpResponse> {
    posts::create_post(&state.repos, &identity.actor(), &body.content).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Post successfully uploaded.")))
}

/// Any other method on /new.
pub async fn new_post_wrong_method(_identity: Identity) -> AppResult<HttpResponse> {
    Err(AppError::BadRequest("POST request is required.".to_string()))
}

/// POST /like/{post_id}
pub async fn like_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let liked = social::toggle_like(&state.repos, &identity.actor(), path.into_inner()).await?;
    let action = if liked { "liked" } else { "unliked" };
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!("Successfully {action}"))))
}

/// PUT /edit/{post_id}
///
/// A bad body is only reported once the post exists and belongs to the caller.
pub async fn edit_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: Result<web::Json<ContentRequest>, actix_web::Error>,
) -> actix_web::Result<HttpResponse> {
    let post = posts::editable_post(&state.repos, &identity.actor(), path.into_inner())
        .await
        .map_err(AppError::from)?;
    let body = body?;

    posts::apply_edit(&state.repos, &post, &body.content)
        .await
        .map_err(AppError::from)?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Post updated successfully")))
}

/// Any other method on /edit/{post_id}.
pub async fn edit_post_wrong_method(_identity: Identity) -> AppResult<HttpResponse> {
    Err(AppError::BadRequest("Must be a PUT request".to_string()))
}

/// POST /comment/{post_id}
pub async fn comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: Result<web::Json<ContentRequest>, actix_web::Error>,
) -> actix_web::Result<HttpResponse> {
    let post = posts::existing_post(&state.repos, path.into_inner())
        .await
        .map_err(AppError::from)?;
    let body = body?;

    posts::comment_on(&state.repos, &identity.actor(), &post, &body.content)
        .await
        .map_err(AppError::from)?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Comment was successfully added")))
}

/// Any other method on /comment/{post_id}.
pub async fn comment_wrong_method(_identity: Identity) -> AppResult<HttpResponse> {
    Err(AppError::BadRequest("Must be a post request".to_string()))
}
