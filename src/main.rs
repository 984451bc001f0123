use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use std::sync::Arc;

use notes_api::{
    auth::AuthKeys,
    config,
    handlers::rest,
    repository::Repository,
    service::{NoteService, SharedNoteService},
};

use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded notes API config");

    // Repository creation and migration
    let mut repo = Repository::new(&cfg.database_dsn).await.unwrap_or_else(|e| {
        tracing::error!("Failed to establish database connection: {e}");
        panic!("failed to establish database connection: {e}");
    });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let service: SharedNoteService = Arc::new(NoteService::new(Arc::new(repo)));
    let keys = Arc::new(AuthKeys::new(&cfg.jwt_secret));

    // Router config
    let router = Router::new()
        .route("/", get(root))
        .merge(rest::router(service, keys))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to port {}: {e}", cfg.port);
            panic!("failed to bind to port {}: {e}", cfg.port);
        });

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Notes API starting, listening on {}", addr);
    }

    axum::serve(listener, router)
        .await
        .expect("failed to start server");
}

async fn root() -> Response {
    (StatusCode::OK, "Hello world!").into_response()
}
