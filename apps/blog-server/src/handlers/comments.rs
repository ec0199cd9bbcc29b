//! Comment submission from the article page.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Comment, CommentDraft};
use blog_core::ports::BaseRepository;
use blog_shared::dto::CommentForm;

use crate::flash::Redirect;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const COMMENT_FAILED: &str = "Failed to post comment";

/// POST /article/{id}/comments
///
/// Only the allow-listed form fields are read; the article comes from the path.
pub async fn store(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let article_id = path.into_inner();
    let form = form.into_inner();

    if state.articles.find_by_id(article_id).await?.is_none() {
        return Err(DomainError::article_not_found(article_id).into());
    }

    let back = Redirect::back(&req, &format!("/article/{article_id}"));
    let draft = CommentDraft::new(
        &form.nickname,
        form.email.as_deref(),
        form.website.as_deref(),
        &form.body,
    );

    let errors = draft.validate();
    if !errors.is_empty() {
        return Ok(back
            .with_input(form.old_input())
            .with_errors(errors)
            .finish(&state.flash)
            .await);
    }

    match state.comments.save(Comment::new(article_id, draft)).await {
        Ok(comment) => {
            tracing::info!(comment_id = %comment.id, %article_id, "Comment created");
            Ok(back.finish(&state.flash).await)
        }
        Err(e) => {
            tracing::warn!(%article_id, error = %e, "Failed to save comment");
            Ok(back
                .with_input(form.old_input())
                .with_error(COMMENT_FAILED)
                .finish(&state.flash)
                .await)
        }
    }
}
