use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::auth::CredentialGate;
use crate::core::Recommender;
use crate::models::{HealthResponse, RecommendRequest};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub gate: CredentialGate,
    pub recommender: Recommender,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint.
///
/// Deliberately does not touch the graph store: connections are opened
/// per recommendation request, so there is nothing persistent to probe.
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommendation endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "email": "string?",
///   "diffbotUri": "string?",
///   "tenant": "string?",
///   "maxRecommendations": 9
/// }
/// ```
///
/// One linear pass: auth check, parse/validate, dispatch, respond.
/// Error responses are plain text; success is a JSON array of users.
async fn recommend(
    state: web::Data<AppState>,
    body: web::Bytes,
    http_req: HttpRequest,
) -> impl Responder {
    let authorization = http_req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if let Err(e) = state.gate.check(authorization) {
        tracing::info!("Rejected request on {}: {}", http_req.path(), e);
        return HttpResponse::Unauthorized().body(e.to_string());
    }

    let request: RecommendRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::info!("JSON parse failure on {}: {}", http_req.path(), e);
            return HttpResponse::BadRequest().body(format!("Could not parse payload: {}", e));
        }
    };

    if let Err(errors) = request.validate() {
        tracing::info!(
            "Validation failed: email={:?}, diffbotUri={:?}, maxRecommendations={}",
            request.email,
            request.diffbot_uri,
            request.max_recommendations
        );
        return HttpResponse::BadRequest().body(format!("Could not parse payload: {}", errors));
    }

    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        tenant = request.tenant.as_deref().unwrap_or("-"),
        limit = request.max_recommendations,
        "Computing recommendations"
    );

    match state.recommender.recommend(&request).await {
        Ok(users) => {
            tracing::info!(%request_id, returned = users.len(), "Returning recommendations");
            HttpResponse::Ok().json(users)
        }
        Err(e) => {
            tracing::error!(%request_id, "Recommendation dispatch failed: {}", e);
            HttpResponse::InternalServerError().body(format!("Processing error: {}", e))
        }
    }
}
