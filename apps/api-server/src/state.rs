//! Application state - shared across all handlers.

use std::sync::Arc;

use plaza_core::ports::{PasswordService, Repositories, TokenService};
use plaza_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            repos,
            tokens,
            passwords,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(tokens: Arc<dyn TokenService>, passwords: Arc<dyn PasswordService>) -> Self {
        Self::new(
            Repositories::from_store(Arc::new(InMemoryStore::new())),
            tokens,
            passwords,
        )
    }

    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or it cannot be reached.
    pub async fn from_config(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match plaza_infra::database::connect(db_config).await {
                Ok(conn) => {
                    tracing::info!("Application state initialized (postgres)");
                    return Self::new(
                        plaza_infra::database::repositories(&conn),
                        tokens,
                        passwords,
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = config;
            tracing::info!("Running without postgres feature - using in-memory store");
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(tokens, passwords)
    }
}
