use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    CreateSearchRequest, NewProfile, ProfileId, ProfilesResponse, RelationKind, RelationRequest,
    RelationResponse, SetHiddenRequest,
};
use crate::routes::{bad_request, error_response, AppState};

/// Configure profile, relation and saved search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profiles", web::post().to(create_profile))
        .route("/profiles/{id}", web::delete().to(delete_profile))
        .route("/profiles/{id}/hidden", web::put().to(set_hidden))
        .route("/profiles/{id}/visible", web::get().to(visible_profiles))
        .route("/profiles/{id}/blocked", web::get().to(blocked_profiles))
        .route("/profiles/{id}/relations/{kind}", web::post().to(create_relation))
        .route("/profiles/{id}/relations/{kind}/{target}", web::delete().to(revoke_relation))
        .route("/profiles/{id}/searches", web::post().to(create_search));
}

async fn create_profile(
    state: web::Data<AppState>,
    req: web::Json<NewProfile>,
) -> impl Responder {
    match state.matchmaker.create_profile(req.into_inner()).await {
        Ok(profile) => HttpResponse::Created().json(profile),
        Err(e) => error_response(&e),
    }
}

async fn delete_profile(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    match state.matchmaker.delete_profile(ProfileId(path.into_inner())).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

async fn set_hidden(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<SetHiddenRequest>,
) -> impl Responder {
    match state.matchmaker.set_hidden(ProfileId(path.into_inner()), req.hidden).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/profiles/{id}/visible
///
/// Every other profile the requester may browse, newest first.
async fn visible_profiles(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let requester = ProfileId(path.into_inner());

    match state.matchmaker.compute_visible_profiles(requester).await {
        Ok(profiles) => HttpResponse::Ok().json(ProfilesResponse::from(profiles)),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/profiles/{id}/blocked
///
/// Profiles hidden by, or hiding, the requester.
async fn blocked_profiles(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let requester = ProfileId(path.into_inner());

    match state.matchmaker.compute_blocked_union(requester).await {
        Ok(profiles) => HttpResponse::Ok().json(ProfilesResponse::from(profiles)),
        Err(e) => error_response(&e),
    }
}

/// POST /api/v1/profiles/{id}/relations/{kind}
///
/// `kind` is one of hide, wink, favorite, view. Body: `{"targetId": 2}`.
/// A repeated wink or favorite answers 409.
async fn create_relation(
    state: web::Data<AppState>,
    path: web::Path<(i64, String)>,
    req: web::Json<RelationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let (source, kind) = path.into_inner();
    let kind: RelationKind = match kind.parse() {
        Ok(kind) => kind,
        Err(message) => return bad_request("Invalid relation kind", message),
    };
    let source = ProfileId(source);
    let target = ProfileId(req.target_id);

    let ledger = state.matchmaker.ledger();
    let result = match kind {
        RelationKind::Hide => ledger.create_hide(source, target).await,
        RelationKind::Wink => ledger.create_wink(source, target).await,
        RelationKind::Favorite => ledger.create_favorite(source, target).await,
        RelationKind::View => ledger.record_view(source, target).await,
    };

    match result {
        Ok(relation) => HttpResponse::Ok().json(RelationResponse {
            success: true,
            relation,
        }),
        Err(e) => {
            tracing::debug!("Failed to record {} {} -> {}: {}", kind, source, target, e);
            error_response(&e)
        }
    }
}

/// DELETE /api/v1/profiles/{id}/relations/{kind}/{target}
async fn revoke_relation(
    state: web::Data<AppState>,
    path: web::Path<(i64, String, i64)>,
) -> impl Responder {
    let (source, kind, target) = path.into_inner();
    let kind: RelationKind = match kind.parse() {
        Ok(kind) => kind,
        Err(message) => return bad_request("Invalid relation kind", message),
    };

    match state
        .matchmaker
        .ledger()
        .revoke(kind, ProfileId(source), ProfileId(target))
        .await
    {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().finish(),
        Err(e) => error_response(&e),
    }
}

async fn create_search(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<CreateSearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let owner = ProfileId(path.into_inner());
    match state.matchmaker.create_search(owner, req.into_inner().into()).await {
        Ok(search) => HttpResponse::Created().json(search),
        Err(e) => error_response(&e),
    }
}
