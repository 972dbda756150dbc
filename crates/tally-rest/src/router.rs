//! Main application router.

use axum::http::HeaderValue;
use axum::routing::get;
use axum::{middleware, Router};
use tally_config::{AppConfig, ServerConfig};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::controllers::{health_controller, transaction_controller};
use crate::middleware::{require_api_key, timing_middleware, ApiKeyState};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Creates the main application router.
///
/// The `/transaction` group sits behind the API key middleware; the root
/// greeting, health probe, and Swagger UI are open. The timing middleware is
/// added last so it wraps everything, including authentication rejections.
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let cors = create_cors_layer(&config.server);
    let auth_state = ApiKeyState::new(&config.security.api_key);

    let transaction_routes = transaction_controller::router()
        .layer(middleware::from_fn_with_state(auth_state, require_api_key))
        .with_state(state);

    let router = Router::new()
        .route("/", get(root))
        .merge(health_controller::router())
        .nest("/transaction", transaction_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(timing_middleware));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        if server_config.cors_origins.contains(&"*".to_string()) {
            CorsLayer::permissive()
        } else {
            let origins: Vec<HeaderValue> = server_config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
    }
}

/// Root endpoint handler. Plain text, no authentication.
async fn root() -> &'static str {
    "Tally API v1"
}
