//! In-memory repositories - used when no database is configured, and in tests.
//!
//! The tables mirror the PostgreSQL schema constraints: unique article titles,
//! unique user emails, comments must reference an existing article, and
//! deleting an article deletes its comments.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Article, Comment, User};
use blog_core::error::RepoError;
use blog_core::ports::{ArticleRepository, BaseRepository, CommentRepository, UserRepository};

use super::mask_email;

/// Shared row storage. Rows keep insertion order, like a heap table scan.
/// Locks are always taken in the order articles, comments, users.
#[derive(Default)]
pub struct InMemoryTables {
    articles: RwLock<Vec<Article>>,
    comments: RwLock<Vec<Comment>>,
    users: RwLock<Vec<User>>,
}

impl InMemoryTables {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// Insert `row`, or replace the row with the same key in place.
fn upsert<T: Clone>(rows: &mut Vec<T>, row: T, key: impl Fn(&T) -> Uuid) -> T {
    let id = key(&row);
    match rows.iter_mut().find(|r| key(r) == id) {
        Some(existing) => *existing = row.clone(),
        None => rows.push(row.clone()),
    }
    row
}

#[derive(Clone)]
pub struct InMemoryArticleRepository {
    tables: Arc<InMemoryTables>,
}

impl InMemoryArticleRepository {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl BaseRepository<Article, Uuid> for InMemoryArticleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepoError> {
        let articles = self.tables.articles.read().await;
        Ok(articles.iter().find(|a| a.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Article>, RepoError> {
        Ok(self.tables.articles.read().await.clone())
    }

    async fn save(&self, article: Article) -> Result<Article, RepoError> {
        let mut articles = self.tables.articles.write().await;

        if articles
            .iter()
            .any(|a| a.title == article.title && a.id != article.id)
        {
            return Err(RepoError::Constraint(
                "duplicate key value violates unique constraint \"articles_title_key\"".to_string(),
            ));
        }

        Ok(upsert(&mut articles, article, |a| a.id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut articles = self.tables.articles.write().await;
        let before = articles.len();
        articles.retain(|a| a.id != id);
        if articles.len() == before {
            return Err(RepoError::NotFound);
        }

        // ON DELETE CASCADE
        self.tables
            .comments
            .write()
            .await
            .retain(|c| c.article_id != id);

        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<Article>, RepoError> {
        let articles = self.tables.articles.read().await;
        Ok(articles.iter().find(|a| a.title == title).cloned())
    }

    async fn find_with_comments(
        &self,
        id: Uuid,
    ) -> Result<Option<(Article, Vec<Comment>)>, RepoError> {
        let articles = self.tables.articles.read().await;
        let Some(article) = articles.iter().find(|a| a.id == id).cloned() else {
            return Ok(None);
        };

        let comments = self.tables.comments.read().await;
        let related = comments
            .iter()
            .filter(|c| c.article_id == id)
            .cloned()
            .collect();

        Ok(Some((article, related)))
    }
}

#[derive(Clone)]
pub struct InMemoryCommentRepository {
    tables: Arc<InMemoryTables>,
}

impl InMemoryCommentRepository {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let comments = self.tables.comments.read().await;
        Ok(comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Comment>, RepoError> {
        Ok(self.tables.comments.read().await.clone())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let articles = self.tables.articles.read().await;
        if !articles.iter().any(|a| a.id == comment.article_id) {
            return Err(RepoError::Constraint(
                "insert on table \"comments\" violates foreign key constraint \"fk_comments_article\""
                    .to_string(),
            ));
        }

        let mut comments = self.tables.comments.write().await;
        Ok(upsert(&mut comments, comment, |c| c.id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut comments = self.tables.comments.write().await;
        let before = comments.len();
        comments.retain(|c| c.id != id);
        if comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

impl CommentRepository for InMemoryCommentRepository {}

#[derive(Clone)]
pub struct InMemoryUserRepository {
    tables: Arc<InMemoryTables>,
}

impl InMemoryUserRepository {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.tables.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.tables.users.read().await.clone())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.tables.users.write().await;
        if users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(RepoError::Constraint(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            ));
        }
        Ok(upsert(&mut users, user, |u| u.id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.tables.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let users = self.tables.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}
