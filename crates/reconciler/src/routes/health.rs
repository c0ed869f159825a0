use actix_web::{web, HttpResponse};
use reconciler_env::{instrument, logger};

use super::app::AppState;

/// `GET /health`
#[instrument(skip_all)]
pub async fn health(_state: web::Data<AppState>) -> HttpResponse {
    logger::debug!("health was called");
    HttpResponse::Ok().body("health is good")
}
