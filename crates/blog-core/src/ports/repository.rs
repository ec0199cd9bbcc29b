//! Data access ports. Handlers receive these as injected trait objects.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Article, Comment, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities in storage order.
    async fn list_all(&self) -> Result<Vec<T>, RepoError>;

    /// Save an entity (insert, or overwrite the row with the same ID).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Article repository.
#[async_trait]
pub trait ArticleRepository: BaseRepository<Article, Uuid> {
    /// Exact-match lookup used by the `unique` title rule.
    async fn find_by_title(&self, title: &str) -> Result<Option<Article>, RepoError>;

    /// An article together with all of its comments.
    async fn find_with_comments(
        &self,
        id: Uuid,
    ) -> Result<Option<(Article, Vec<Comment>)>, RepoError>;
}

/// Comment repository. Comments are read through
/// `ArticleRepository::find_with_comments`.
pub trait CommentRepository: BaseRepository<Comment, Uuid> {}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
