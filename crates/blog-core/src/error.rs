//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),
}

impl DomainError {
    pub fn article_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "Article",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl RepoError {
    /// Whether the store rejected the write because of a uniqueness or
    /// foreign key constraint.
    pub fn is_constraint(&self) -> bool {
        matches!(self, RepoError::Constraint(_))
    }
}
