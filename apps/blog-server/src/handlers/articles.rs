//! Public article page.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::ports::ArticleRepository;
use blog_shared::view::ArticlePage;

use crate::flash::page;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{article_view, comment_view};

/// GET /article/{id} - the article with all of its comments.
pub async fn show(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let (article, comments) = state
        .articles
        .find_with_comments(id)
        .await?
        .ok_or_else(|| DomainError::article_not_found(id))?;
    let flash = state.flash.take(&req).await;

    Ok(page(
        &req,
        ArticlePage {
            article: article_view(article),
            comments: comments.into_iter().map(comment_view).collect(),
            flash,
        },
    ))
}
