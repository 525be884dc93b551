//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Form submitted to `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

/// Form submitted to `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// JSON body for creating or editing a post, and for adding a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    pub content: String,
}

/// Query string of the posts listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Minimal author reference embedded in posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentJson {
    pub id: i64,
    /// `None` once the author account has been removed.
    pub author: Option<AuthorRef>,
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostJson {
    pub id: i64,
    pub author: AuthorRef,
    pub content: String,
    pub timestamp: String,
    pub likes: u64,
    pub comments: Vec<CommentJson>,
}

/// A post as seen by a particular viewer in a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: PostJson,
    pub is_authenticated: bool,
    pub is_liked: bool,
    pub can_edit: bool,
}

/// One page of a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<FeedPost>,
    pub has_next: bool,
    pub has_previous: bool,
    pub num_pages: u64,
    pub current_page: u64,
}

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub followers: u64,
    pub following: u64,
    pub posts: Vec<PostJson>,
    /// `None` for anonymous viewers and for the viewer's own profile.
    pub is_following: Option<bool>,
}
