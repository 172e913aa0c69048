//! Shared application state

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::{Config, SecurityConfig};
use crate::security::jwt::{JwtConfig, JwtService};
use crate::security::matcher::PathMatcher;
use crate::security::session::SessionRegistry;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt: Arc<JwtService>,
    pub sessions: SessionRegistry,
    pub security: Arc<SecurityConfig>,
    /// Compiled authenticated-URL patterns
    pub protected: Arc<PathMatcher>,
    /// Compiled unauthenticated-URL patterns
    pub public: Arc<PathMatcher>,
}

impl AppState {
    /// Connect to the database, run migrations, and build the shared state
    pub async fn new(config: &Config) -> Result<Self, sqlx::Error> {
        tracing::info!("Connecting to database...");
        let pool = PgPool::connect(&config.database_url).await?;

        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self::with_pool(pool, config))
    }

    /// Build state over an existing pool (tests use a lazy pool here)
    pub fn with_pool(pool: PgPool, config: &Config) -> Self {
        let security = config.security.clone();
        Self {
            pool,
            jwt: Arc::new(JwtService::new(JwtConfig {
                secret: config.jwt_secret.clone(),
                expiration_minutes: config.jwt_expiration_minutes,
                issuer: "admin-server".to_string(),
            })),
            sessions: SessionRegistry::new(),
            protected: Arc::new(PathMatcher::new(&security.authenticated_urls)),
            public: Arc::new(PathMatcher::new(&security.unauthenticated_urls)),
            security: Arc::new(security),
        }
    }
}
