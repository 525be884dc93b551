//! Post authoring, editing and commenting.

use crate::domain::{Actor, Comment, NewComment, NewPost, Post, normalize_content};
use crate::error::DomainError;
use crate::ports::Repositories;

pub async fn create_post(
    repos: &Repositories,
    author: &Actor,
    content: &str,
) -> Result<Post, DomainError> {
    let content = normalize_content(content, "Post cannot be empty.")?;
    let post = repos
        .posts
        .create(NewPost::new(author.user_id, content))
        .await?;

    tracing::info!(post_id = post.id, author = author.user_id, "Post created");
    Ok(post)
}

/// Look up a post the editor may change.
///
/// Fails with not-found before forbidden.
pub async fn editable_post(
    repos: &Repositories,
    editor: &Actor,
    post_id: i64,
) -> Result<Post, DomainError> {
    let post = existing_post(repos, post_id).await?;

    if !editor.is(post.author_id) {
        tracing::warn!(
            post_id,
            editor = editor.user_id,
            "Rejected edit of another user's post"
        );
        return Err(DomainError::Forbidden(
            "You cannot edit someone else's post".to_string(),
        ));
    }

    Ok(post)
}

/// Replace the content of a post already cleared by [`editable_post`].
pub async fn apply_edit(
    repos: &Repositories,
    post: &Post,
    content: &str,
) -> Result<Post, DomainError> {
    let content = normalize_content(content, "Post cannot be empty.")?;
    let updated = repos.posts.update_content(post.id, &content).await?;
    Ok(updated)
}

/// Replace the content of one of the editor's own posts.
///
/// Checks run in order: the post exists, the editor owns it, the new content
/// is not blank.
pub async fn edit_post(
    repos: &Repositories,
    editor: &Actor,
    post_id: i64,
    content: &str,
) -> Result<Post, DomainError> {
    let post = editable_post(repos, editor, post_id).await?;
    apply_edit(repos, &post, content).await
}

pub async fn existing_post(repos: &Repositories, post_id: i64) -> Result<Post, DomainError> {
    repos
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("post", post_id))
}

/// Attach a comment to a post already known to exist.
pub async fn comment_on(
    repos: &Repositories,
    author: &Actor,
    post: &Post,
    content: &str,
) -> Result<Comment, DomainError> {
    let content = normalize_content(content, "A comment cannot be empty")?;
    let comment = repos
        .comments
        .create(NewComment::new(author.user_id, post.id, content))
        .await?;

    tracing::debug!(comment_id = comment.id, post_id = post.id, "Comment added");
    Ok(comment)
}

pub async fn add_comment(
    repos: &Repositories,
    author: &Actor,
    post_id: i64,
    content: &str,
) -> Result<Comment, DomainError> {
    let post = existing_post(repos, post_id).await?;
    comment_on(repos, author, &post, content).await
}
