use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{self, ValidationErrors};

/// Comment entity - a reader's reply attached to one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: Uuid,
    pub nickname: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment on `article_id` from validated input.
    pub fn new(article_id: Uuid, draft: CommentDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            article_id,
            nickname: draft.nickname,
            email: draft.email,
            website: draft.website,
            body: draft.body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The only fields a reader may set on a comment.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CommentDraft {
    #[validate(length(min = 1, max = 64))]
    pub nickname: String,
    #[validate(email)]
    pub email: Option<String>,
    pub website: Option<String>,
    #[validate(length(min = 1))]
    pub body: String,
}

impl CommentDraft {
    pub fn new(
        nickname: &str,
        email: Option<&str>,
        website: Option<&str>,
        body: &str,
    ) -> Self {
        Self {
            nickname: nickname.trim().to_string(),
            email: non_blank(email),
            website: non_blank(website),
            body: body.trim().to_string(),
        }
    }

    /// `nickname` required|max:64, `email` nullable|email, `body` required.
    pub fn validate(&self) -> ValidationErrors {
        validation::collect(Validate::validate(self), &["nickname", "email", "body"])
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_optionals_become_none() {
        let draft = CommentDraft::new("reader", Some("  "), None, "Nice post");
        assert_eq!(draft.email, None);
        assert_eq!(draft.website, None);
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_failure() {
        let draft = CommentDraft::new("", Some("not-an-email"), None, "");
        let errors = draft.validate();
        assert!(errors.has_field("nickname"));
        assert!(errors.has_field("email"));
        assert!(errors.has_field("body"));
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        for bad in ["not an@email at all", "a@b@c", "x@ y", "<script>@>"] {
            let errors = CommentDraft::new("reader", Some(bad), None, "hi").validate();
            assert_eq!(
                errors.messages(),
                vec!["The email must be a valid email address."],
                "{bad}"
            );
        }
    }

    #[test]
    fn test_nickname_length_cap() {
        let long = "n".repeat(65);
        let errors = CommentDraft::new(&long, None, None, "hi").validate();
        assert_eq!(
            errors.messages(),
            vec!["The nickname may not be greater than 64 characters."]
        );
        assert!(CommentDraft::new(&long[..64], None, None, "hi").validate().is_empty());
    }

    #[test]
    fn test_new_comment_links_article() {
        let article_id = Uuid::new_v4();
        let comment = Comment::new(
            article_id,
            CommentDraft::new("reader", None, Some("https://example.com"), "Hi"),
        );
        assert_eq!(comment.article_id, article_id);
        assert_eq!(comment.website.as_deref(), Some("https://example.com"));
    }
}
