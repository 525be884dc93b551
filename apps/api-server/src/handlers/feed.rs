//! Paginated post listings.

use actix_web::{HttpResponse, web};

use plaza_core::services::feed;
use plaza_shared::dto::PageQuery;

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /posts/{view}?page=N
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let viewer = identity.actor();
    let page = feed::list_posts(
        &state.repos,
        &path.into_inner(),
        viewer.as_ref(),
        query.page.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(page))
}
