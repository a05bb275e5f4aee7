//! HTTP handlers and route configuration.

mod blogs;
mod health;
mod login;
mod users;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, error, web};
use bloglist_core::ports::TokenService;
use bloglist_shared::ErrorResponse;

use crate::observability::RequestId;
use crate::state::AppState;

/// Register state, extractor configuration and routes.
pub fn configure_app(cfg: &mut web::ServiceConfig, state: AppState, tokens: Arc<dyn TokenService>) {
    cfg.app_data(web::Data::new(state))
        .app_data(web::Data::new(tokens))
        .app_data(web::JsonConfig::default().error_handler(|err, req| {
            bad_request(req, err.to_string(), err)
        }))
        .app_data(web::PathConfig::default().error_handler(|err, req| {
            bad_request(req, "malformatted id".to_string(), err)
        }))
        .configure(configure_routes);
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/login", web::post().to(login::login))
            .service(
                web::scope("/blogs")
                    .route("", web::get().to(blogs::list))
                    .route("", web::post().to(blogs::create))
                    .route("/{id}", web::put().to(blogs::update))
                    .route("/{id}", web::delete().to(blogs::delete)),
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list))
                    .route("", web::post().to(users::register)),
            ),
    );
}

/// Render an extractor failure as a 400 problem response.
fn bad_request(
    req: &HttpRequest,
    detail: String,
    cause: impl std::fmt::Debug + std::fmt::Display + 'static,
) -> actix_web::Error {
    let mut body = ErrorResponse::bad_request(detail);
    if let Some(id) = req.extensions().get::<RequestId>() {
        body = body.with_request_id(id.as_str());
    }

    error::InternalError::from_response(cause, HttpResponse::BadRequest().json(body)).into()
}
