//! # Blog Core
//!
//! The domain layer of the blog.
//! Articles, comments and users, the rules their input must satisfy, and the
//! ports infrastructure implements. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::DomainError;
pub use validation::{FieldError, ValidationErrors};
