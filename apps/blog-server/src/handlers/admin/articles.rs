//! Article management: list, create, edit, update and delete.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Article, ArticleDraft};
use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;
use blog_shared::dto::ArticleForm;
use blog_shared::view::{ArticleFormPage, ArticleListPage};

use crate::flash::{Redirect, page};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{article_view, article_views};

/// Where successful writes land.
pub const ARTICLE_INDEX: &str = "/admin/article";

const SAVE_FAILED: &str = "Save failed";
const UPDATE_FAILED: &str = "Update failed";
const DELETE_SUCCEEDED: &str = "Article deleted";
const DELETE_FAILED: &str = "Delete failed";

fn edit_path(id: Uuid) -> String {
    format!("{ARTICLE_INDEX}/{id}/edit")
}

async fn find_article(state: &AppState, id: Uuid) -> AppResult<Article> {
    Ok(state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::article_not_found(id))?)
}

/// GET /admin/article
pub async fn index(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let articles = state.articles.list_all().await?;
    let flash = state.flash.take(&req).await;

    Ok(page(
        &req,
        ArticleListPage {
            articles: article_views(articles),
            flash,
        },
    ))
}

/// GET /admin/article/create
pub async fn create(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let flash = state.flash.take(&req).await;
    page(
        &req,
        ArticleFormPage {
            article: None,
            flash,
        },
    )
}

/// GET /admin/article/{id} - there is no separate admin detail page.
pub async fn show(path: web::Path<Uuid>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, edit_path(path.into_inner())))
        .finish()
}

/// GET /admin/article/{id}/edit
pub async fn edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let article = find_article(&state, path.into_inner()).await?;
    let flash = state.flash.take(&req).await;

    Ok(page(
        &req,
        ArticleFormPage {
            article: Some(article_view(article)),
            flash,
        },
    ))
}

/// POST /admin/article
pub async fn store(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: Identity,
    form: web::Form<ArticleForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let back = Redirect::back(&req, &format!("{ARTICLE_INDEX}/create"));
    let draft = ArticleDraft::new(&form.title, &form.body);

    let errors = draft.validate(state.articles.as_ref(), None).await?;
    if !errors.is_empty() {
        return Ok(back
            .with_input(form.old_input())
            .with_errors(errors)
            .finish(&state.flash)
            .await);
    }

    let article = Article::new(identity.user_id, draft);
    match state.articles.save(article).await {
        Ok(saved) => {
            tracing::info!(article_id = %saved.id, user_id = %saved.user_id, "Article created");
            Ok(Redirect::to(ARTICLE_INDEX).finish(&state.flash).await)
        }
        Err(e) => {
            log_write_failure("create", None, &e);
            Ok(back
                .with_input(form.old_input())
                .with_error(SAVE_FAILED)
                .finish(&state.flash)
                .await)
        }
    }
}

/// PUT/PATCH /admin/article/{id}
pub async fn update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<ArticleForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    let mut article = find_article(&state, id).await?;
    let back = Redirect::back(&req, &edit_path(id));
    let draft = ArticleDraft::new(&form.title, &form.body);

    let errors = draft.validate(state.articles.as_ref(), Some(id)).await?;
    if !errors.is_empty() {
        return Ok(back
            .with_input(form.old_input())
            .with_errors(errors)
            .finish(&state.flash)
            .await);
    }

    article.revise(draft);
    match state.articles.save(article).await {
        Ok(saved) => {
            tracing::info!(article_id = %saved.id, "Article updated");
            Ok(Redirect::to(ARTICLE_INDEX).finish(&state.flash).await)
        }
        Err(e) => {
            log_write_failure("update", Some(id), &e);
            Ok(back
                .with_input(form.old_input())
                .with_error(UPDATE_FAILED)
                .finish(&state.flash)
                .await)
        }
    }
}

/// DELETE /admin/article/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    find_article(&state, id).await?;
    let back = Redirect::back(&req, ARTICLE_INDEX);

    let redirect = match state.articles.delete(id).await {
        Ok(()) => {
            tracing::info!(article_id = %id, "Article deleted");
            back.with_status(DELETE_SUCCEEDED)
        }
        // Deleted concurrently since the lookup above.
        Err(RepoError::NotFound) => return Err(DomainError::article_not_found(id).into()),
        Err(e) => {
            log_write_failure("delete", Some(id), &e);
            back.with_error(DELETE_FAILED)
        }
    };

    Ok(redirect.finish(&state.flash).await)
}

fn log_write_failure(action: &str, article_id: Option<Uuid>, err: &RepoError) {
    if err.is_constraint() {
        tracing::warn!(action, ?article_id, error = %err, "Article write rejected by constraint");
    } else {
        tracing::error!(action, ?article_id, error = %err, "Article write failed");
    }
}
