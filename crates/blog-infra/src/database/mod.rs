//! Storage: PostgreSQL via SeaORM, plus in-memory tables.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::{
    InMemoryArticleRepository, InMemoryCommentRepository, InMemoryTables,
    InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnection;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresArticleRepository, PostgresCommentRepository, PostgresUserRepository,
};

/// Mask an email for logging to keep PII out of logs.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}@{domain}")
        }
        None => "***".to_string(),
    }
}
