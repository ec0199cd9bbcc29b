//! JSON renditions of the pages the server renders.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One error carried across a redirect. `field` is absent for form-wide messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

/// State handed from a redirecting request to the next rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    #[serde(default)]
    pub errors: Vec<FlashError>,
    #[serde(default)]
    pub old_input: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Flash {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.old_input.is_empty() && self.status.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Uuid,
    pub article_id: Uuid,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Public home page and admin article list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleListPage {
    pub articles: Vec<ArticleView>,
    #[serde(default)]
    pub flash: Flash,
}

/// Public article page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlePage {
    pub article: ArticleView,
    pub comments: Vec<CommentView>,
    #[serde(default)]
    pub flash: Flash,
}

/// Admin create/edit form. `article` is absent on the create form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleFormPage {
    pub article: Option<ArticleView>,
    #[serde(default)]
    pub flash: Flash,
}

/// Admin landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminHomePage {
    pub user_id: Uuid,
    pub email: String,
    pub article_count: usize,
}
