//! Domain operations over the repository ports.
//!
//! Every operation takes the injected [`Repositories`](crate::ports::Repositories)
//! and, where it matters, the acting user explicitly.

pub mod accounts;
pub mod feed;
pub mod posts;
pub mod profile;
pub mod serialize;
pub mod social;

pub use social::FollowOutcome;
