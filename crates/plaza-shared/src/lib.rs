//! # Plaza Shared
//!
//! Wire types shared between the API server and its clients.
//! Everything here is a plain serde projection, no behavior.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
