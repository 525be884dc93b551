//! In-memory store - used when no database is configured, and in tests.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use plaza_core::domain::{Comment, NewComment, NewPost, NewUser, Post, PostFilter, User};
use plaza_core::error::RepoError;
use plaza_core::ports::{
    BaseRepository, CommentRepository, FollowRepository, LikeRepository, PostRepository,
    UserRepository,
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    /// (follower_id, followee_id)
    follows: BTreeSet<(i64, i64)>,
    /// (user_id, post_id)
    likes: BTreeSet<(i64, i64)>,
    last_user_id: i64,
    last_post_id: i64,
    last_comment_id: i64,
}

impl Tables {
    fn remove_post(&mut self, post_id: i64) -> Option<Post> {
        let post = self.posts.remove(&post_id)?;
        self.comments.retain(|_, c| c.post_id != post_id);
        self.likes.retain(|(_, p)| *p != post_id);
        Some(post)
    }

    fn remove_user(&mut self, user_id: i64) -> Option<User> {
        let user = self.users.remove(&user_id)?;

        let owned: Vec<i64> = self
            .posts
            .values()
            .filter(|p| p.author_id == user_id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            self.remove_post(post_id);
        }

        for comment in self.comments.values_mut() {
            if comment.author_id == Some(user_id) {
                comment.author_id = None;
            }
        }
        self.follows
            .retain(|(follower, followee)| *follower != user_id && *followee != user_id);
        self.likes.retain(|(u, _)| *u != user_id);
        Some(user)
    }

    fn filtered_posts(&self, filter: &PostFilter) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|p| filter.matches(p.author_id))
            .cloned()
            .collect();
        posts.sort_by(|a, b| newest_first(a.created_at, a.id, b.created_at, b.id));
        posts
    }
}

/// Most recent first, ties in insertion order.
fn newest_first<T: Ord>(a_time: T, a_id: i64, b_time: T, b_id: i64) -> Ordering {
    b_time.cmp(&a_time).then(a_id.cmp(&b_id))
}

/// In-memory implementation of every repository port.
///
/// All tables sit behind one async `RwLock`, so each operation (toggles
/// included) is atomic. Data is lost on process restart.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.tables
            .write()
            .await
            .remove_user(id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_many(&self, ids: &[i64]) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.tables
            .write()
            .await
            .remove_post(id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }

        tables.last_post_id += 1;
        let post = Post {
            id: tables.last_post_id,
            author_id: post.author_id,
            content: post.content,
            created_at: post.created_at,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_content(&self, id: i64, content: &str) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.content = content.to_string();
        Ok(post.clone())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| filter.matches(p.author_id))
            .count() as u64)
    }

    async fn list_page(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .filtered_posts(filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn list_all(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.filtered_posts(filter))
    }
}

#[async_trait]
impl BaseRepository<Comment, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.tables
            .write()
            .await
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }

        tables.last_comment_id += 1;
        let comment = Comment {
            id: tables.last_comment_id,
            author_id: Some(comment.author_id),
            post_id: comment.post_id,
            content: comment.content,
            created_at: comment.created_at,
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn list_for_posts(&self, post_ids: &[i64]) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| post_ids.contains(&c.post_id))
            .cloned()
            .collect();
        comments.sort_by(|a, b| newest_first(a.created_at, a.id, b.created_at, b.id));
        Ok(comments)
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn toggle(&self, follower_id: i64, followee_id: i64) -> Result<bool, RepoError> {
        if follower_id == followee_id {
            return Err(RepoError::Constraint("users cannot follow themselves".into()));
        }

        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&follower_id) || !tables.users.contains_key(&followee_id) {
            return Err(RepoError::Constraint("follow edge references unknown user".into()));
        }

        let edge = (follower_id, followee_id);
        if tables.follows.remove(&edge) {
            Ok(false)
        } else {
            tables.follows.insert(edge);
            Ok(true)
        }
    }

    async fn is_following(&self, follower_id: i64, followee_id: i64) -> Result<bool, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.follows.contains(&(follower_id, followee_id)))
    }

    async fn follower_count(&self, user_id: i64) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.follows.iter().filter(|(_, f)| *f == user_id).count() as u64)
    }

    async fn following_count(&self, user_id: i64) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.follows.range((user_id, i64::MIN)..=(user_id, i64::MAX)).count() as u64)
    }

    async fn following_ids(&self, user_id: i64) -> Result<Vec<i64>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .range((user_id, i64::MIN)..=(user_id, i64::MAX))
            .map(|(_, followee)| *followee)
            .collect())
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn toggle(&self, user_id: i64, post_id: i64) -> Result<bool, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) || !tables.posts.contains_key(&post_id) {
            return Err(RepoError::Constraint("like references unknown user or post".into()));
        }

        let edge = (user_id, post_id);
        if tables.likes.remove(&edge) {
            Ok(false)
        } else {
            tables.likes.insert(edge);
            Ok(true)
        }
    }

    async fn like_counts(&self, post_ids: &[i64]) -> Result<HashMap<i64, u64>, RepoError> {
        let tables = self.tables.read().await;
        let mut counts = HashMap::new();
        for (_, post_id) in tables.likes.iter().filter(|(_, p)| post_ids.contains(p)) {
            *counts.entry(*post_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn liked_among(
        &self,
        user_id: i64,
        post_ids: &[i64],
    ) -> Result<HashSet<i64>, RepoError> {
        let tables = self.tables.read().await;
        Ok(post_ids
            .iter()
            .copied()
            .filter(|p| tables.likes.contains(&(user_id, *p)))
            .collect())
    }
}
