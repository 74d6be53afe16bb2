//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;

use actix_web::{error, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _req| bad_request(err)))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/posts")
                        .route("", web::get().to(posts::list_posts))
                        .route("", web::post().to(posts::create_post))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update_post))
                        .route("/{id}", web::delete().to(posts::delete_post))
                        .route("/{id}/comments", web::post().to(comments::add_comment))
                        .route(
                            "/{id}/comments/{comment_id}",
                            web::delete().to(comments::remove_comment),
                        ),
                ),
        );
}

/// Malformed JSON, query strings and path segments are all 400s.
fn bad_request(err: impl std::fmt::Display) -> error::Error {
    AppError::BadRequest(err.to_string()).into()
}

#[cfg(test)]
mod tests;
