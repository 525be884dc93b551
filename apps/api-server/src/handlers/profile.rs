//! Profile view and follow toggle.

use actix_web::{HttpResponse, web};

use plaza_core::services::profile;
use plaza_shared::MessageResponse;

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /profile/{user_id}
pub async fn view_profile(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let viewer = identity.actor();
    let data = profile::get_profile(&state.repos, path.into_inner(), viewer.as_ref()).await?;
    Ok(HttpResponse::Ok().json(data))
}

/// POST /profile/{user_id}
pub async fn follow(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let viewer = identity.actor();
    let outcome = profile::follow_profile(&state.repos, path.into_inner(), viewer.as_ref()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Successfully {}",
        outcome.as_str()
    ))))
}
