//! Domain entities - the core business objects.

mod comment;
mod feed;
mod post;
mod user;

pub use comment::{Comment, NewComment};
pub use feed::{FeedView, PAGE_SIZE, PageWindow, Paginator, PostFilter, parse_page_number};
pub use post::{NewPost, Post, normalize_content};
pub use user::{Actor, NewUser, User};
