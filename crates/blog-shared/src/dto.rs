//! Data Transfer Objects - submitted form and request bodies.
//!
//! Every struct lists the accepted keys explicitly; unknown keys in a
//! submission are dropped during deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Article create/update form (`title`, `body`).
///
/// Missing keys deserialize as empty strings so the `required` rule reports
/// them instead of the extractor rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl ArticleForm {
    /// Submitted values, kept for re-filling the form after a redirect.
    pub fn old_input(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("title".to_string(), self.title.clone()),
            ("body".to_string(), self.body.clone()),
        ])
    }
}

/// Comment form posted from the article page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub body: String,
}

impl CommentForm {
    pub fn old_input(&self) -> BTreeMap<String, String> {
        let mut input = BTreeMap::from([
            ("nickname".to_string(), self.nickname.clone()),
            ("body".to_string(), self.body.clone()),
        ]);
        if let Some(email) = &self.email {
            input.insert("email".to_string(), email.clone());
        }
        if let Some(website) = &self.website {
            input.insert("website".to_string(), website.clone());
        }
        input
    }
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

/// Returned by a successful login; the token is also set as the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_form_drops_unknown_keys() {
        let form: CommentForm = serde_json::from_value(serde_json::json!({
            "nickname": "reader",
            "body": "Nice",
            "article_id": "00000000-0000-0000-0000-000000000000",
            "id": 42
        }))
        .unwrap();

        assert_eq!(form.nickname, "reader");
        assert_eq!(form.old_input().len(), 2);
    }

    #[test]
    fn test_article_form_defaults_missing_fields() {
        let form: ArticleForm = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(form.title.is_empty());
        assert!(form.body.is_empty());
    }
}
