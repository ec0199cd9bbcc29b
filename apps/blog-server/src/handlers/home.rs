//! Public landing page and the server clock.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Local;

use blog_core::ports::BaseRepository;
use blog_shared::view::ArticleListPage;

use crate::flash::page;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::article_views;

/// Format of `GET /now`.
pub const NOW_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// GET / and GET /home
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

/// GET /now - server local time as plain text.
pub async fn now() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(Local::now().format(NOW_FORMAT).to_string())
}
