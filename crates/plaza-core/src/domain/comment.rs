use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity. Survives its author's account removal with `author_id = None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub author_id: Option<i64>,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub author_id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(author_id: i64, post_id: i64, content: String) -> Self {
        Self {
            author_id,
            post_id,
            content,
            created_at: Utc::now(),
        }
    }
}
