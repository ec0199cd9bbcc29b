//! Domain entities - the core business objects.

mod article;
mod comment;
mod user;

pub use article::{Article, ArticleDraft};
pub use comment::{Comment, CommentDraft};
pub use user::{Registration, User};
