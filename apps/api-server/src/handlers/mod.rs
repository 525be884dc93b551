//! HTTP handlers and route configuration.

mod auth;
mod feed;
mod health;
mod posts;
mod profile;

use actix_web::web;

use crate::middleware::error::json_error_handler;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health_check))
        // Session
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::post().to(auth::logout))
        .route("/register", web::post().to(auth::register))
        // Posts
        .service(
            web::resource("/new")
                .route(web::post().to(posts::new_post))
                .default_service(web::to(posts::new_post_wrong_method)),
        )
        .route("/posts/{view}", web::get().to(feed::list_posts))
        .service(
            web::resource("/profile/{user_id}")
                .route(web::get().to(profile::view_profile))
                .route(web::post().to(profile::follow)),
        )
        .route("/like/{post_id}", web::post().to(posts::like_post))
        .service(
            web::resource("/edit/{post_id}")
                .route(web::put().to(posts::edit_post))
                .default_service(web::to(posts::edit_post_wrong_method)),
        )
        .service(
            web::resource("/comment/{post_id}")
                .route(web::post().to(posts::comment))
                .default_service(web::to(posts::comment_wrong_method)),
        );
}
