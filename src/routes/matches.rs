use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{HealthResponse, ProfileId, ProfilesResponse, RandomMatchesRequest, SearchId};
use crate::routes::{bad_request, error_response, AppState};

/// Configure health and match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/random", web::post().to(random_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match &state.database {
        Some(db) => db.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Random matches endpoint
///
/// POST /api/v1/matches/random
///
/// Request body:
/// ```json
/// {
///   "profileId": 1,
///   "searchId": 7
/// }
/// ```
///
/// Without `searchId` the candidates come from the profile's visible set.
async fn random_matches(
    state: web::Data<AppState>,
    req: web::Json<RandomMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for random_matches request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let requester = ProfileId(req.profile_id);
    let search_id = req.search_id.map(SearchId);

    match state.matchmaker.random_matches(requester, search_id).await {
        Ok(matches) => HttpResponse::Ok().json(ProfilesResponse::from(matches)),
        Err(e) => {
            tracing::warn!("Random matches failed for {}: {}", requester, e);
            error_response(&e)
        }
    }
}
