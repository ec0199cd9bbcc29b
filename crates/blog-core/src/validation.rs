//! Form error set. Rules are declared with `#[derive(Validate)]` on the
//! input drafts; every rule runs and failures accumulate so a form can show
//! all of them at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single rule failure. `field` is `None` for form-wide messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

/// Ordered collection of rule failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}", self.summary())]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// An error set holding one form-wide message.
    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(None, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.push(Some(field.to_string()), message);
    }

    fn push(&mut self, field: Option<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors
            .iter()
            .any(|e| e.field.as_deref() == Some(field))
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// `Ok(())` when no rule failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn summary(&self) -> String {
        self.messages().join(" ")
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Translate derived `validator` failures into form errors.
///
/// Fields are reported in `order`; fields missing from it follow by name.
pub fn collect(
    result: Result<(), validator::ValidationErrors>,
    order: &[&str],
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let Err(failures) = result else {
        return errors;
    };

    let mut fields: Vec<_> = failures.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| {
        let rank = order.iter().position(|f| *f == &**field);
        (rank.unwrap_or(order.len()), field.to_string())
    });

    for (field, failures) in fields {
        for failure in failures {
            errors.add(&field, describe(&field, failure));
        }
    }
    errors
}

fn describe(field: &str, failure: &validator::ValidationError) -> String {
    if let Some(message) = &failure.message {
        return message.to_string();
    }

    match &*failure.code {
        "length" => {
            let chars = failure
                .params
                .get("value")
                .and_then(|v| v.as_str())
                .map(|v| v.chars().count());
            let min = failure.params.get("min").and_then(|v| v.as_u64());
            let max = failure.params.get("max").and_then(|v| v.as_u64());

            match (chars, min, max) {
                (Some(0), _, _) => format!("The {field} field is required."),
                (Some(n), Some(min), _) if (n as u64) < min => {
                    format!("The {field} must be at least {min} characters.")
                }
                (_, _, Some(max)) => {
                    format!("The {field} may not be greater than {max} characters.")
                }
                _ => format!("The {field} field is required."),
            }
        }
        "email" => format!("The {field} must be a valid email address."),
        _ => format!("The {field} is invalid."),
    }
}

/// `unique`: reported by the caller after checking the store.
pub fn unique_taken(errors: &mut ValidationErrors, field: &str) {
    errors.add(field, format!("The {field} has already been taken."));
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 5))]
        name: String,
        #[validate(email)]
        contact: Option<String>,
        #[validate(length(min = 3))]
        code: String,
    }

    fn check(name: &str, contact: Option<&str>, code: &str) -> ValidationErrors {
        let sample = Sample {
            name: name.to_string(),
            contact: contact.map(String::from),
            code: code.to_string(),
        };
        collect(sample.validate(), &["name", "contact", "code"])
    }

    #[test]
    fn test_length_messages() {
        assert_eq!(
            check("", None, "abc").messages(),
            vec!["The name field is required."]
        );
        assert_eq!(
            check("abcdef", None, "abc").messages(),
            vec!["The name may not be greater than 5 characters."]
        );
        assert_eq!(
            check("ab", None, "ab").messages(),
            vec!["The code must be at least 3 characters."]
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(check("文文文文文", None, "abc").is_empty());
        assert!(check("文文文文文文", None, "abc").has_field("name"));
    }

    #[test]
    fn test_errors_follow_field_order() {
        let errors = check("", Some("nope"), "");
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field.as_deref()).collect();
        assert_eq!(fields, vec!["name", "contact", "code"]);
        assert!(errors
            .messages()
            .contains(&"The contact must be a valid email address.".to_string()));
    }

    #[test]
    fn test_malformed_emails_are_rejected() {
        for bad in ["not an@email at all", "a@b@c", "x@ y", "<script>@>", "reader@"] {
            assert!(check("a", Some(bad), "abc").has_field("contact"), "{bad}");
        }
        assert!(check("a", Some("reader@example.com"), "abc").is_empty());
    }

    #[test]
    fn test_unique_taken_message() {
        let mut errors = ValidationErrors::new();
        unique_taken(&mut errors, "title");
        assert_eq!(errors.messages(), vec!["The title has already been taken."]);
    }

    #[test]
    fn test_general_error_has_no_field() {
        let errors = ValidationErrors::general("Save failed");
        let first = errors.iter().next().unwrap();
        assert!(first.field.is_none());
        assert_eq!(errors.to_string(), "Save failed");
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(ValidationErrors::general("nope").into_result().is_err());
    }
}
