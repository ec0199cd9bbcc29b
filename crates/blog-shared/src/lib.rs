//! # Blog Shared
//!
//! Wire types shared by the server and its clients: submitted forms, the JSON
//! renditions of each page, flash state, and the response envelopes.

pub mod dto;
pub mod response;
pub mod view;

pub use response::{ApiResponse, ErrorResponse};
