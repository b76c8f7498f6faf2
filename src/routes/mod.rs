// Route exports
pub mod matches;
pub mod profiles;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::Matchmaker;
use crate::error::Error;
use crate::models::ErrorResponse;
use crate::services::PostgresStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matchmaker: Matchmaker,
    /// Present when running against PostgreSQL; used by the health check
    pub database: Option<Arc<PostgresStore>>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(profiles::configure),
    );
}

/// Map a crate error onto a JSON error response
pub(crate) fn error_response(err: &Error) -> HttpResponse {
    match err {
        Error::ProfileNotFound(_) | Error::SearchNotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: err.to_string(),
            status_code: 404,
        }),
        Error::ConstraintViolation { .. } => HttpResponse::Conflict().json(ErrorResponse {
            error: "Already exists".to_string(),
            message: err.to_string(),
            status_code: 409,
        }),
        Error::Database(_) | Error::Migration(_) => {
            tracing::error!("Storage failure: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage error".to_string(),
                message: err.to_string(),
                status_code: 500,
            })
        }
    }
}

pub(crate) fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}
