//! Translation between core results and HTTP responses.

use actix_web::HttpResponse;
use reconciler_env::logger;

use crate::core::errors::ApiErrorResponse;

pub fn http_response_json<R: serde::Serialize>(response: R) -> HttpResponse {
    HttpResponse::Ok().json(response)
}

pub fn http_response_ok() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub fn log_and_return_error_response(error: ApiErrorResponse) -> HttpResponse {
    logger::error!(?error, "request failed");
    actix_web::ResponseError::error_response(&error)
}
