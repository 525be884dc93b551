//! PostgreSQL repository implementations.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};

use plaza_core::domain::{Comment, NewComment, NewPost, NewUser, Post, PostFilter, User};
use plaza_core::error::RepoError;
use plaza_core::ports::{
    CommentRepository, FollowRepository, LikeRepository, PostRepository, UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::follow::{self, Entity as FollowEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_err, write_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL follow edges.
pub type PostgresFollowRepository = PostgresBaseRepository<FollowEntity>;

/// PostgreSQL like edges.
pub type PostgresLikeRepository = PostgresBaseRepository<LikeEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        tracing::debug!(username = %new_user.username, "Creating user");

        let model = user::ActiveModel::from(new_user)
            .insert(&self.db)
            .await
            .map_err(write_err)?;

        Ok(model.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_many(&self, ids: &[i64]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// Base select for a filter, newest first. `None` when nothing can match.
fn filtered_posts(filter: &PostFilter) -> Option<Select<PostEntity>> {
    let select = match filter {
        PostFilter::All => PostEntity::find(),
        PostFilter::Authors(ids) if ids.is_empty() => return None,
        PostFilter::Authors(ids) => {
            PostEntity::find().filter(post::Column::AuthorId.is_in(ids.iter().copied()))
        }
        PostFilter::Author(id) => PostEntity::find().filter(post::Column::AuthorId.eq(*id)),
    };

    Some(
        select
            .order_by_desc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id),
    )
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(&self.db)
            .await
            .map_err(write_err)?;

        Ok(model.into())
    }

    async fn update_content(&self, id: i64, content: &str) -> Result<Post, RepoError> {
        let existing = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: post::ActiveModel = existing.into();
        active.content = Set(content.to_string());
        let model = active.update(&self.db).await.map_err(write_err)?;

        Ok(model.into())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        match filtered_posts(filter) {
            Some(select) => select.count(&self.db).await.map_err(query_err),
            None => Ok(0),
        }
    }

    async fn list_page(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let Some(select) = filtered_posts(filter) else {
            return Ok(Vec::new());
        };

        let result = select
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let Some(select) = filtered_posts(filter) else {
            return Ok(Vec::new());
        };

        let result = select.all(&self.db).await.map_err(query_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(new_comment)
            .insert(&self.db)
            .await
            .map_err(write_err)?;

        Ok(model.into())
    }

    async fn list_for_posts(&self, post_ids: &[i64]) -> Result<Vec<Comment>, RepoError> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = CommentEntity::find()
            .filter(comment::Column::PostId.is_in(post_ids.iter().copied()))
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn toggle(&self, follower_id: i64, followee_id: i64) -> Result<bool, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let existing = FollowEntity::find_by_id((follower_id, followee_id))
            .one(&txn)
            .await
            .map_err(query_err)?;

        let now_following = if existing.is_some() {
            FollowEntity::delete_by_id((follower_id, followee_id))
                .exec(&txn)
                .await
                .map_err(query_err)?;
            false
        } else {
            follow::ActiveModel {
                follower_id: Set(follower_id),
                followee_id: Set(followee_id),
                created_at: Set(Utc::now().into()),
            }
            .insert(&txn)
            .await
            .map_err(write_err)?;
            true
        };

        txn.commit().await.map_err(query_err)?;
        Ok(now_following)
    }

    async fn is_following(&self, follower_id: i64, followee_id: i64) -> Result<bool, RepoError> {
        let edge = FollowEntity::find_by_id((follower_id, followee_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(edge.is_some())
    }

    async fn follower_count(&self, user_id: i64) -> Result<u64, RepoError> {
        FollowEntity::find()
            .filter(follow::Column::FolloweeId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn following_count(&self, user_id: i64) -> Result<u64, RepoError> {
        FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn following_ids(&self, user_id: i64) -> Result<Vec<i64>, RepoError> {
        let edges = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(edges.into_iter().map(|e| e.followee_id).collect())
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn toggle(&self, user_id: i64, post_id: i64) -> Result<bool, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let existing = LikeEntity::find_by_id((user_id, post_id))
            .one(&txn)
            .await
            .map_err(query_err)?;

        let liked = if existing.is_some() {
            LikeEntity::delete_by_id((user_id, post_id))
                .exec(&txn)
                .await
                .map_err(query_err)?;
            false
        } else {
            like::ActiveModel {
                user_id: Set(user_id),
                post_id: Set(post_id),
                created_at: Set(Utc::now().into()),
            }
            .insert(&txn)
            .await
            .map_err(write_err)?;
            true
        };

        txn.commit().await.map_err(query_err)?;
        Ok(liked)
    }

    async fn like_counts(&self, post_ids: &[i64]) -> Result<HashMap<i64, u64>, RepoError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = LikeEntity::find()
            .select_only()
            .column(like::Column::PostId)
            .column_as(Expr::col(like::Column::UserId).count(), "likes")
            .filter(like::Column::PostId.is_in(post_ids.iter().copied()))
            .group_by(like::Column::PostId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows
            .into_iter()
            .map(|(post_id, likes)| (post_id, likes.max(0) as u64))
            .collect())
    }

    async fn liked_among(
        &self,
        user_id: i64,
        post_ids: &[i64],
    ) -> Result<HashSet<i64>, RepoError> {
        if post_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let liked: Vec<i64> = LikeEntity::find()
            .select_only()
            .column(like::Column::PostId)
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.is_in(post_ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(liked.into_iter().collect())
    }
}
