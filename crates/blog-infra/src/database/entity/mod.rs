//! SeaORM entities for the `users`, `articles` and `comments` tables.

pub mod article;
pub mod comment;
pub mod user;
