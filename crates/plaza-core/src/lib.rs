//! # Plaza Core
//!
//! The domain layer of the Plaza social backend: users, posts, comments,
//! follow and like relations, feeds and profiles.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
