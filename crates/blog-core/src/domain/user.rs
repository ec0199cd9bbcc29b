use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{self, ValidationErrors};

/// User entity - an account that can sign in to the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Submitted account details. The email is normalized to lower case.
#[derive(Debug, Clone, Validate)]
pub struct Registration {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

impl Registration {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        }
    }

    /// `name` required|max:255, `email` email, `password` min:8.
    pub fn validate(&self) -> ValidationErrors {
        validation::collect(Validate::validate(self), &["name", "email", "password"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_normalizes_email() {
        let registration = Registration::new(" Ada ", " Ada@Example.COM ", "correct-horse");
        assert_eq!(registration.name, "Ada");
        assert_eq!(registration.email, "ada@example.com");
        assert!(registration.validate().is_empty());
    }

    #[test]
    fn test_registration_rules() {
        let errors = Registration::new("", "nobody", "short").validate();
        assert_eq!(
            errors.messages(),
            vec![
                "The name field is required.",
                "The email must be a valid email address.",
                "The password must be at least 8 characters.",
            ]
        );
    }
}
