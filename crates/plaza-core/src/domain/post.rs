use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Post entity - a short text update owned by exactly one author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    /// Set on creation, never touched by edits.
    pub created_at: DateTime<Utc>,
}

/// Insertable post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(author_id: i64, content: String) -> Self {
        Self {
            author_id,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Trim user-submitted text and reject it when nothing is left.
pub fn normalize_content(raw: &str, empty_message: &str) -> Result<String, DomainError> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(DomainError::validation(empty_message));
    }
    Ok(content.to_string())
}
