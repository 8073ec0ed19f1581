//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::auth::CredentialHasher;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources: the configuration, the database pool, and the credential
/// hasher. All of it is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    hasher: CredentialHasher,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The credential hasher is keyed with the configuration's auth secret
    /// here, once; it is never re-read per request.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let hasher = CredentialHasher::new(config.auth_secret.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                hasher,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the credential hasher.
    #[must_use]
    pub fn hasher(&self) -> &CredentialHasher {
        &self.inner.hasher
    }
}
