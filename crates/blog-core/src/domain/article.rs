use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::RepoError;
use crate::ports::ArticleRepository;
use crate::validation::{self, ValidationErrors};

/// Article entity - a blog post written by an admin user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Create a new article authored by `user_id`.
    pub fn new(user_id: Uuid, draft: ArticleDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: draft.title,
            body: draft.body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite title and body. The author is never changed.
    pub fn revise(&mut self, draft: ArticleDraft) {
        self.title = draft.title;
        self.body = draft.body;
        self.updated_at = Utc::now();
    }
}

/// Submitted article input, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ArticleDraft {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
}

impl ArticleDraft {
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            body: body.trim().to_string(),
        }
    }

    /// Rules that need no storage: `title` required|max:255, `body` required.
    pub fn check_rules(&self) -> ValidationErrors {
        validation::collect(Validate::validate(self), &["title", "body"])
    }

    /// Full rule set including title uniqueness. `current` is the article
    /// being updated, whose own title does not count as taken.
    ///
    /// The uniqueness lookup is advisory; the unique index on `articles.title`
    /// stays the authority when two writers race.
    pub async fn validate(
        &self,
        articles: &dyn ArticleRepository,
        current: Option<Uuid>,
    ) -> Result<ValidationErrors, RepoError> {
        let mut errors = self.check_rules();
        if errors.has_field("title") {
            return Ok(errors);
        }

        if let Some(existing) = articles.find_by_title(&self.title).await? {
            if Some(existing.id) != current {
                validation::unique_taken(&mut errors, "title");
            }
        }

        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Comment;
    use crate::ports::BaseRepository;
    use async_trait::async_trait;

    /// Storage holding a single article.
    struct OneArticle(Article);

    #[async_trait]
    impl BaseRepository<Article, Uuid> for OneArticle {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepoError> {
            Ok((self.0.id == id).then(|| self.0.clone()))
        }

        async fn list_all(&self) -> Result<Vec<Article>, RepoError> {
            Ok(vec![self.0.clone()])
        }

        async fn save(&self, entity: Article) -> Result<Article, RepoError> {
            Ok(entity)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl ArticleRepository for OneArticle {
        async fn find_by_title(&self, title: &str) -> Result<Option<Article>, RepoError> {
            Ok((self.0.title == title).then(|| self.0.clone()))
        }

        async fn find_with_comments(
            &self,
            id: Uuid,
        ) -> Result<Option<(Article, Vec<Comment>)>, RepoError> {
            Ok(self.find_by_id(id).await?.map(|a| (a, Vec::new())))
        }
    }

    fn stored() -> OneArticle {
        OneArticle(Article::new(Uuid::new_v4(), ArticleDraft::new("Hello", "World")))
    }

    #[tokio::test]
    async fn test_taken_title_is_rejected() {
        let repo = stored();
        let errors = ArticleDraft::new("Hello", "Other body")
            .validate(&repo, None)
            .await
            .unwrap();

        assert_eq!(errors.messages(), vec!["The title has already been taken."]);
    }

    #[tokio::test]
    async fn test_own_title_is_not_taken() {
        let repo = stored();
        let errors = ArticleDraft::new("Hello", "Edited")
            .validate(&repo, Some(repo.0.id))
            .await
            .unwrap();

        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_uniqueness_skipped_when_title_invalid() {
        let repo = stored();
        let errors = ArticleDraft::new(&"a".repeat(256), "")
            .validate(&repo, None)
            .await
            .unwrap();

        assert_eq!(
            errors.messages(),
            vec![
                "The title may not be greater than 255 characters.",
                "The body field is required.",
            ]
        );
    }

    #[test]
    fn test_draft_trims_input() {
        let draft = ArticleDraft::new("  Hello ", "\nWorld\n");
        assert_eq!(draft.title, "Hello");
        assert_eq!(draft.body, "World");
    }

    #[test]
    fn test_rules_require_both_fields() {
        let errors = ArticleDraft::new("", " ").check_rules();
        assert!(errors.has_field("title"));
        assert!(errors.has_field("body"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_rules_cap_title_length() {
        let errors = ArticleDraft::new(&"a".repeat(256), "body").check_rules();
        assert!(errors.has_field("title"));
        assert!(ArticleDraft::new(&"a".repeat(255), "body").check_rules().is_empty());
    }

    #[test]
    fn test_revise_keeps_author() {
        let author = Uuid::new_v4();
        let mut article = Article::new(author, ArticleDraft::new("Hello", "World"));
        let created_at = article.created_at;

        article.revise(ArticleDraft::new("Hello again", "Updated"));

        assert_eq!(article.user_id, author);
        assert_eq!(article.title, "Hello again");
        assert_eq!(article.body, "Updated");
        assert_eq!(article.created_at, created_at);
        assert!(article.updated_at >= created_at);
    }
}
