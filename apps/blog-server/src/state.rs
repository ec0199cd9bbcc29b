//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{
    ArticleRepository, Cache, CommentRepository, PasswordService, TokenService, UserRepository,
};
use blog_infra::auth::{Argon2PasswordService, JwtTokenService};
use blog_infra::{
    InMemoryArticleRepository, InMemoryCache, InMemoryCommentRepository, InMemoryTables,
    InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use blog_infra::database::{
    DatabaseConnection, PostgresArticleRepository, PostgresCommentRepository,
    PostgresUserRepository,
};

use crate::config::AppConfig;
use crate::flash::FlashStore;

/// Shared application state. Every dependency is an injected port.
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<dyn ArticleRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub flash: FlashStore,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "postgres")]
        let state = match &config.database {
            Some(db_config) => match DatabaseConnection::init(db_config).await {
                Ok(connection) => Self::postgres(connection, tokens),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory(tokens)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(tokens)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::in_memory(tokens)
        };

        tracing::info!("Application state initialized");
        state
    }

    #[cfg(feature = "postgres")]
    fn postgres(connection: DatabaseConnection, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            articles: Arc::new(PostgresArticleRepository::new(connection.conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(connection.conn.clone())),
            users: Arc::new(PostgresUserRepository::new(connection.conn)),
            flash: FlashStore::new(Arc::new(InMemoryCache::new())),
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    /// State backed by process-local tables. Data is lost on restart.
    pub fn in_memory(tokens: Arc<dyn TokenService>) -> Self {
        let tables = InMemoryTables::new();
        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());

        Self {
            articles: Arc::new(InMemoryArticleRepository::new(tables.clone())),
            comments: Arc::new(InMemoryCommentRepository::new(tables.clone())),
            users: Arc::new(InMemoryUserRepository::new(tables)),
            flash: FlashStore::new(cache),
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }
}
