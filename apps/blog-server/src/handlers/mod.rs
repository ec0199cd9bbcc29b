//! HTTP handlers and route configuration.

mod admin;
mod articles;
mod auth;
mod comments;
mod health;
mod home;


use actix_web::web;

use crate::middleware::auth::RequireSession;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/", web::get().to(home::index))
        .route("/home", web::get().to(home::index))
        .route("/now", web::get().to(home::now))
        .route("/health", web::get().to(health::health_check))
        .route("/article/{id}", web::get().to(articles::show))
        .route("/article/{id}/comments", web::post().to(comments::store))
        // Auth routes
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::post().to(auth::logout))
        // Admin routes
        .service(
            web::scope("/admin")
                .wrap(RequireSession)
                .route("", web::get().to(admin::home))
                .route("/", web::get().to(admin::home))
                .service(
                    web::scope("/article")
                        .service(
                            web::resource("")
                                .route(web::get().to(admin::articles::index))
                                .route(web::post().to(admin::articles::store)),
                        )
                        .service(
                            web::resource("/create")
                                .route(web::get().to(admin::articles::create)),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(admin::articles::show))
                                .route(web::put().to(admin::articles::update))
                                .route(web::patch().to(admin::articles::update))
                                .route(web::delete().to(admin::articles::destroy)),
                        )
                        .service(
                            web::resource("/{id}/edit").route(web::get().to(admin::articles::edit)),
                        ),
                ),
        );
}
