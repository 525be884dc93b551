use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Comment, NewComment, NewPost, NewUser, Post, PostFilter, User};
use crate::error::RepoError;

/// Generic repository trait shared by every entity table.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID, cascading the way the schema does.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Insert a user. Fails with `RepoError::Constraint` when the username is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Fetch several users at once; unknown ids are skipped.
    async fn find_many(&self, ids: &[i64]) -> Result<Vec<User>, RepoError>;
}

/// Post repository.
///
/// Every listing is ordered by creation time, most recent first, with ties
/// kept in insertion order.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite the content of a post, leaving its timestamp alone.
    async fn update_content(&self, id: i64, content: &str) -> Result<Post, RepoError>;

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    async fn list_page(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    async fn list_all(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i64> {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    /// All comments on the given posts, most recent first.
    async fn list_for_posts(&self, post_ids: &[i64]) -> Result<Vec<Comment>, RepoError>;
}

/// Directed follow edges between users (the `follows` join table).
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Flip the edge `follower -> followee` atomically.
    /// Returns `true` if the edge exists afterwards.
    async fn toggle(&self, follower_id: i64, followee_id: i64) -> Result<bool, RepoError>;

    async fn is_following(&self, follower_id: i64, followee_id: i64) -> Result<bool, RepoError>;

    async fn follower_count(&self, user_id: i64) -> Result<u64, RepoError>;

    async fn following_count(&self, user_id: i64) -> Result<u64, RepoError>;

    /// Ids of every user `user_id` follows.
    async fn following_ids(&self, user_id: i64) -> Result<Vec<i64>, RepoError>;
}

/// User/post like edges (the `likes` join table).
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Flip the like of `user_id` on `post_id` atomically.
    /// Returns `true` if the post is liked afterwards.
    async fn toggle(&self, user_id: i64, post_id: i64) -> Result<bool, RepoError>;

    /// Like count per post. Posts without likes may be absent from the map.
    async fn like_counts(&self, post_ids: &[i64]) -> Result<HashMap<i64, u64>, RepoError>;

    /// The subset of `post_ids` liked by `user_id`.
    async fn liked_among(&self, user_id: i64, post_ids: &[i64])
    -> Result<HashSet<i64>, RepoError>;
}

/// Every data-access port a request handler needs, injected as one value.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub likes: Arc<dyn LikeRepository>,
}

impl Repositories {
    /// Build the bundle from a single store that implements every port.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + PostRepository
            + CommentRepository
            + FollowRepository
            + LikeRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            follows: store.clone(),
            likes: store,
        }
    }
}
