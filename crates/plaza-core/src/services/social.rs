//! Follow and like toggles.

use crate::domain::Actor;
use crate::error::DomainError;
use crate::ports::Repositories;

/// Result of a follow toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Followed,
    Unfollowed,
}

impl FollowOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Followed => "followed",
            Self::Unfollowed => "unfollowed",
        }
    }
}

/// Flip whether `actor` follows `target_id`.
///
/// Following yourself is rejected without touching the edge set.
pub async fn toggle_follow(
    repos: &Repositories,
    actor: &Actor,
    target_id: i64,
) -> Result<FollowOutcome, DomainError> {
    if actor.is(target_id) {
        return Err(DomainError::validation("You cannot follow yourself."));
    }

    if repos.users.find_by_id(target_id).await?.is_none() {
        return Err(DomainError::not_found("user", target_id));
    }

    let now_following = repos.follows.toggle(actor.user_id, target_id).await?;
    tracing::debug!(
        follower = actor.user_id,
        followee = target_id,
        now_following,
        "Follow toggled"
    );

    Ok(if now_following {
        FollowOutcome::Followed
    } else {
        FollowOutcome::Unfollowed
    })
}

/// Flip whether `actor` likes `post_id`. Returns the new state.
///
/// Any signed-in user may like any post, their own included.
pub async fn toggle_like(
    repos: &Repositories,
    actor: &Actor,
    post_id: i64,
) -> Result<bool, DomainError> {
    if repos.posts.find_by_id(post_id).await?.is_none() {
        return Err(DomainError::not_found("post", post_id));
    }

    let liked = repos.likes.toggle(actor.user_id, post_id).await?;
    tracing::debug!(user = actor.user_id, post = post_id, liked, "Like toggled");
    Ok(liked)
}
