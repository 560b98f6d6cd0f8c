mod auth;
mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tracing::{error, info, warn};

use crate::auth::CredentialGate;
use crate::config::Settings;
use crate::core::{EmailStrategy, Recommender};
use crate::routes::recommendations::AppState;
use crate::services::GraphClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Mingle Algo recommendation service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Credential gate (optional static basic auth)
    let gate = CredentialGate::from_settings(&settings.auth);
    if gate.is_armed() {
        info!("Basic auth enabled for the recommendation endpoint");
    } else {
        warn!("BASIC_AUTH_USER/BASIC_AUTH_PASSWORD not configured, endpoint is open");
    }

    // Graph store client (connects per request, no pool)
    let graph = GraphClient::new(settings.neo4j.clone());
    info!(
        "Graph client configured for {} (database: {})",
        settings.neo4j.uri, settings.neo4j.database
    );

    // Email ranking strategy
    let strategy: EmailStrategy = settings.recommendation.strategy.parse().unwrap_or_else(|e| {
        error!("Failed to parse recommendation strategy: {}", e);
        panic!("Configuration error: {}", e);
    });

    let recommender = Recommender::new(graph, strategy);
    info!("Recommender initialized with strategy: {:?}", strategy);

    // Build application state
    let app_state = AppState { gate, recommender };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
