//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory storage only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `auth` - JWT session tokens + Argon2 password hashing

pub mod cache;
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use cache::InMemoryCache;
pub use database::{
    InMemoryArticleRepository, InMemoryCommentRepository, InMemoryTables,
    InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
pub use database::DatabaseConnection;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
