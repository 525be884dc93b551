//! PostgreSQL persistence via SeaORM.

mod connections;
mod postgres_base;

pub mod entity;
pub mod postgres_repo;

use std::sync::Arc;

use sea_orm::DbConn;

use plaza_core::ports::Repositories;

pub use connections::{DatabaseConfig, connect};
pub use postgres_base::PostgresBaseRepository;
pub use postgres_repo::{
    PostgresCommentRepository, PostgresFollowRepository, PostgresLikeRepository,
    PostgresPostRepository, PostgresUserRepository,
};

/// Wire every repository port to the same connection pool.
pub fn repositories(db: &DbConn) -> Repositories {
    Repositories {
        users: Arc::new(PostgresUserRepository::new(db.clone())),
        posts: Arc::new(PostgresPostRepository::new(db.clone())),
        comments: Arc::new(PostgresCommentRepository::new(db.clone())),
        follows: Arc::new(PostgresFollowRepository::new(db.clone())),
        likes: Arc::new(PostgresLikeRepository::new(db.clone())),
    }
}
