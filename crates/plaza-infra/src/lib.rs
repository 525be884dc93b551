//! # Plaza Infrastructure
//!
//! Concrete implementations of the ports defined in `plaza-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//!
//! Without `postgres` only the in-memory store is built.

pub mod auth;
pub mod memory;

#[cfg(feature = "postgres")]
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::DatabaseConfig;
