use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web,
};
use tracing::error;

use crate::{handlers, utils::helpers::ApiResponse};

pub fn scoped_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(
                web::JsonConfig::default()
                    .content_type_required(false)
                    .error_handler(json_error_handler),
            )
            .service(
                web::resource("/submit-donation")
                    .route(web::post().to(handlers::donations::submit))
                    .route(web::head().to(HttpResponse::MethodNotAllowed)),
            )
            .service(
                web::resource("/donation-form")
                    .route(web::get().to(handlers::donations::form_config)),
            ),
    );
}

/// Unreadable bodies are answered like any other unexpected failure.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    error!("Donation submission error: {}", err);
    let response = ApiResponse::<()>::error(handlers::donations::INTERNAL_ERROR.to_string())
        .to_response(StatusCode::INTERNAL_SERVER_ERROR);
    InternalError::from_response(err, response).into()
}
