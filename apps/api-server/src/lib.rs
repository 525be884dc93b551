//! # Plaza API Server
//!
//! Actix-web HTTP surface of the Plaza social backend.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use state::AppState;
