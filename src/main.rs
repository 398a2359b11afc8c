use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use naviriti_api::config::Settings;
use naviriti_api::core::StaticPredictor;
use naviriti_api::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use naviriti_api::services::{AuthClient, PreferenceStore};
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Naviriti API...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the auth collaborator client
    let auth = Arc::new(AuthClient::new(
        settings.auth.endpoint,
        settings.auth.service_key,
        &settings.auth.jwt_secret,
    ));

    info!("Auth client initialized");

    // Initialize the preference store
    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let store = Arc::new(
        PreferenceStore::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            panic!("PostgreSQL connection error: {}", e);
        }),
    );

    info!("Preference store initialized (max: {} connections)", db_max_conn);

    // Build application state; the predictor is the static stub until a
    // real scoring engine lands behind the same trait
    let app_state = AppState {
        store,
        auth,
        predictor: Arc::new(StaticPredictor),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
