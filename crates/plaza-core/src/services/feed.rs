//! Paginated post listings.

use std::collections::HashSet;

use plaza_shared::dto::{FeedPage, FeedPost};

use crate::domain::{Actor, FeedView, PAGE_SIZE, Paginator, PostFilter, parse_page_number};
use crate::error::DomainError;
use crate::ports::Repositories;
use crate::services::serialize::serialize_posts;

/// Turn a view into a post filter, resolving the viewer's follow set or
/// checking that the requested author exists.
async fn resolve_filter(
    repos: &Repositories,
    view: FeedView,
    viewer: Option<&Actor>,
) -> Result<PostFilter, DomainError> {
    match view {
        FeedView::All => Ok(PostFilter::All),
        FeedView::Following => match viewer {
            Some(actor) => Ok(PostFilter::Authors(
                repos.follows.following_ids(actor.user_id).await?,
            )),
            None => Ok(PostFilter::Authors(Vec::new())),
        },
        FeedView::Author(user_id) => {
            if repos.users.find_by_id(user_id).await?.is_none() {
                return Err(DomainError::not_found("user", user_id));
            }
            Ok(PostFilter::Author(user_id))
        }
    }
}

/// List one page of posts for `view` (`all`, `following` or a user id).
///
/// Each post is annotated with the viewer's like state and edit permission.
pub async fn list_posts(
    repos: &Repositories,
    view: &str,
    viewer: Option<&Actor>,
    page: Option<&str>,
) -> Result<FeedPage, DomainError> {
    let view: FeedView = view.parse()?;
    let filter = resolve_filter(repos, view, viewer).await?;
    let page_number = parse_page_number(page)?;

    let paginator = Paginator::new(repos.posts.count(&filter).await?, PAGE_SIZE);
    let window = paginator.page(page_number)?;

    let posts = repos
        .posts
        .list_page(&filter, window.offset, window.limit)
        .await?;

    let liked: HashSet<i64> = match viewer {
        Some(actor) => {
            let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
            repos.likes.liked_among(actor.user_id, &ids).await?
        }
        None => HashSet::new(),
    };

    let items = posts
        .iter()
        .zip(serialize_posts(repos, &posts).await?)
        .map(|(post, json)| FeedPost {
            is_authenticated: viewer.is_some(),
            is_liked: liked.contains(&post.id),
            can_edit: viewer.is_some_and(|actor| actor.is(post.author_id)),
            post: json,
        })
        .collect();

    tracing::debug!(
        ?view,
        page = window.number,
        num_pages = window.num_pages,
        total = paginator.count(),
        "Feed page listed"
    );

    Ok(FeedPage {
        posts: items,
        has_next: window.has_next(),
        has_previous: window.has_previous(),
        num_pages: window.num_pages,
        current_page: window.number,
    })
}
