//! Profile view and follow-from-profile.

use plaza_shared::dto::ProfileResponse;

use crate::domain::{Actor, PostFilter};
use crate::error::DomainError;
use crate::ports::Repositories;
use crate::services::serialize::serialize_posts;
use crate::services::social::{FollowOutcome, toggle_follow};

pub async fn get_profile(
    repos: &Repositories,
    user_id: i64,
    viewer: Option<&Actor>,
) -> Result<ProfileResponse, DomainError> {
    let user = repos
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("user", user_id))?;

    let posts = repos.posts.list_all(&PostFilter::Author(user.id)).await?;
    let followers = repos.follows.follower_count(user.id).await?;
    let following = repos.follows.following_count(user.id).await?;

    let is_following = match viewer {
        Some(actor) if !actor.is(user.id) => {
            Some(repos.follows.is_following(actor.user_id, user.id).await?)
        }
        _ => None,
    };

    Ok(ProfileResponse {
        id: user.id,
        username: user.username,
        followers,
        following,
        posts: serialize_posts(repos, &posts).await?,
        is_following,
    })
}

/// Follow or unfollow the profile `user_id` as `viewer`.
///
/// An unknown profile is reported before a missing session.
pub async fn follow_profile(
    repos: &Repositories,
    user_id: i64,
    viewer: Option<&Actor>,
) -> Result<FollowOutcome, DomainError> {
    if repos.users.find_by_id(user_id).await?.is_none() {
        return Err(DomainError::not_found("user", user_id));
    }

    let actor = viewer.ok_or_else(|| {
        DomainError::Forbidden("You can't follow a user if you are not signed in".to_string())
    })?;

    toggle_follow(repos, actor, user_id).await
}
