//! Entity to wire projection.
//!
//! Posts are serialized in batches: one query each for comments, users and
//! like counts, whatever the number of posts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use plaza_shared::dto::{AuthorRef, CommentJson, PostJson};

use crate::domain::{Comment, Post, User};
use crate::error::DomainError;
use crate::ports::Repositories;

/// Human-readable timestamp, e.g. `Jan 05 2024, 03:15 PM`.
pub const TIMESTAMP_FORMAT: &str = "%b %d %Y, %I:%M %p";

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

pub fn author_ref(user: &User) -> AuthorRef {
    AuthorRef {
        id: user.id,
        username: user.username.clone(),
    }
}

fn comment_json(comment: &Comment, users: &HashMap<i64, User>) -> CommentJson {
    CommentJson {
        id: comment.id,
        author: comment
            .author_id
            .and_then(|id| users.get(&id))
            .map(author_ref),
        content: comment.content.clone(),
        timestamp: format_timestamp(&comment.created_at),
    }
}

/// Serialize `posts` in the order given, each with its like count and
/// comments (most recent first).
pub async fn serialize_posts(
    repos: &Repositories,
    posts: &[Post],
) -> Result<Vec<PostJson>, DomainError> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    let comments = repos.comments.list_for_posts(&post_ids).await?;
    let like_counts = repos.likes.like_counts(&post_ids).await?;

    let mut user_ids: Vec<i64> = posts
        .iter()
        .map(|p| p.author_id)
        .chain(comments.iter().filter_map(|c| c.author_id))
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let users: HashMap<i64, User> = repos
        .users
        .find_many(&user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut comments_by_post: HashMap<i64, Vec<CommentJson>> = HashMap::new();
    for comment in &comments {
        comments_by_post
            .entry(comment.post_id)
            .or_default()
            .push(comment_json(comment, &users));
    }

    posts
        .iter()
        .map(|post| {
            let author = users.get(&post.author_id).map(author_ref).ok_or_else(|| {
                DomainError::Internal(format!("post {} references missing author", post.id))
            })?;

            Ok(PostJson {
                id: post.id,
                author,
                content: post.content.clone(),
                timestamp: format_timestamp(&post.created_at),
                likes: like_counts.get(&post.id).copied().unwrap_or(0),
                comments: comments_by_post.remove(&post.id).unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 15, 15, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Jan 05 2024, 03:15 PM");
    }

    #[test]
    fn test_timestamp_format_morning() {
        let ts = Utc.with_ymd_and_hms(2023, 11, 30, 0, 7, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Nov 30 2023, 12:07 AM");
    }

    #[test]
    fn test_removed_author_maps_to_none() {
        let comment = Comment {
            id: 1,
            author_id: Some(99),
            post_id: 1,
            content: "orphan".to_string(),
            created_at: Utc::now(),
        };
        assert!(comment_json(&comment, &HashMap::new()).author.is_none());
    }
}
