//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use blog_core::domain::{Article, Comment, User};
use blog_core::error::RepoError;
use blog_core::ports::{ArticleRepository, CommentRepository, UserRepository};

use super::entity::article::{self, Entity as ArticleEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::mask_email;
use super::postgres_base::{PostgresBaseRepository, map_db_error};

/// PostgreSQL article repository.
pub type PostgresArticleRepository = PostgresBaseRepository<ArticleEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<Article>, RepoError> {
        let result = ArticleEntity::find()
            .filter(article::Column::Title.eq(title))
            .one(&self.db)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_with_comments(
        &self,
        id: Uuid,
    ) -> Result<Option<(Article, Vec<Comment>)>, RepoError> {
        let mut rows = ArticleEntity::find_by_id(id)
            .find_with_related(CommentEntity)
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_error)?;

        Ok(rows.pop().map(|(article, comments)| {
            (
                article.into(),
                comments.into_iter().map(Into::into).collect(),
            )
        }))
    }
}

impl CommentRepository for PostgresCommentRepository {}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Into::into))
    }
}
