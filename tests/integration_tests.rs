// Integration tests for Mingle Algo
//
// The handler tests run against a graph client pointed at an unreachable
// store. Auth and validation failures short-circuit before any store
// interaction, and a dead store is absorbed into an empty result set, so
// none of these tests require a running Neo4j.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use base64::{engine::general_purpose, Engine as _};

use mingle_algo::auth::CredentialGate;
use mingle_algo::config::Neo4jSettings;
use mingle_algo::core::{EmailStrategy, Recommender};
use mingle_algo::routes::{self, recommendations::AppState};
use mingle_algo::services::GraphClient;

fn unreachable_store() -> GraphClient {
    GraphClient::new(Neo4jSettings {
        uri: "neo4j://127.0.0.1:1".to_string(),
        user: "neo4j".to_string(),
        password: "irrelevant".to_string(),
        database: "neo4j".to_string(),
    })
}

fn state(gate: CredentialGate) -> AppState {
    AppState {
        gate,
        recommender: Recommender::new(unreachable_store(), EmailStrategy::Weighted),
    }
}

fn open_state() -> AppState {
    state(CredentialGate::new(None, None))
}

fn armed_state() -> AppState {
    state(CredentialGate::new(
        Some("service".to_string()),
        Some("secret".to_string()),
    ))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_missing_auth_header_yields_401() {
    let app = app!(armed_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_payload(r#"{"email": "ada@example.com"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Missing authorization credentials");
}

#[actix_web::test]
async fn test_wrong_credentials_yield_401() {
    let app = app!(armed_state());

    let header = format!("Basic {}", general_purpose::STANDARD.encode("service:wrong"));
    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .insert_header(("Authorization", header))
        .set_payload(r#"{"email": "ada@example.com"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Unauthorized");
}

#[actix_web::test]
async fn test_matching_credentials_proceed_to_dispatch() {
    let app = app!(armed_state());

    let header = format!("Basic {}", general_purpose::STANDARD.encode("service:secret"));
    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .insert_header(("Authorization", header))
        .set_payload(r#"{"email": "ada@example.com"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    // The store is unreachable, which the executor absorbs: the request
    // still completes with an empty candidate list.
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn test_truncated_json_yields_400_with_reason() {
    let app = app!(open_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_payload(r#"{"email":"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert!(!body.is_empty());
    assert!(body.starts_with(b"Could not parse payload"));
}

#[actix_web::test]
async fn test_missing_identity_yields_400() {
    let app = app!(open_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_payload(r#"{"maxRecommendations": 5}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_invalid_email_yields_400() {
    let app = app!(open_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_payload(r#"{"email": "not-an-email"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_unreachable_store_yields_empty_list_not_500() {
    let app = app!(open_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_payload(r#"{"diffbotUri": "http://diffbot.com/entity/abc", "tenant": "graphconf"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = app!(open_state());

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}
