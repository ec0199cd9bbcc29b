//! Account registration and session login/logout.

use actix_web::{HttpResponse, web};

use blog_core::DomainError;
use blog_core::domain::{Registration, User};
use blog_core::ports::{AuthError, BaseRepository, UserRepository};
use blog_shared::dto::{LoginRequest, RegisterUserRequest, SessionResponse, UserResponse};

use crate::middleware::auth::{session_cookie, session_removal_cookie};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let registration = Registration::new(&req.name, &req.email, &req.password);
    registration.validate().into_result().map_err(DomainError::from)?;

    if state.users.find_by_email(&registration.email).await?.is_some() {
        return Err(DomainError::Duplicate("Email already registered".to_string()).into());
    }

    let password_hash = state.passwords.hash(&registration.password)?;

    let user = User::new(registration.name, registration.email, password_hash);
    let user = state.users.save(user).await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().json(user_response(&user)))
}

/// POST /login - sets the session cookie.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim().to_lowercase();

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::info!(user_id = %user.id, "Login rejected");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.tokens.generate_token(user.id, &user.email)?;
    let expires_in = state.tokens.expiration_seconds();

    tracing::info!(user_id = %user.id, "Session started");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token.clone(), expires_in))
        .json(SessionResponse {
            user: user_response(&user),
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: expires_in.max(0) as u64,
        }))
}

/// POST /logout - drops the session cookie. Tokens are stateless, so a copied
/// token stays valid until it expires.
pub async fn logout() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, "/"))
        .cookie(session_removal_cookie())
        .finish()
}
