//! Admin panel. Every route here sits behind `RequireSession`.

pub mod articles;

use actix_web::{HttpResponse, web};

use blog_core::ports::BaseRepository;
use blog_shared::ApiResponse;
use blog_shared::view::AdminHomePage;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /admin/
pub async fn home(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let article_count = state.articles.list_all().await?.len();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AdminHomePage {
        user_id: identity.user_id,
        email: identity.email,
        article_count,
    })))
}
