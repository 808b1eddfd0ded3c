use std::{any::Any, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, request::Parts},
    response::{IntoResponse, Response},
    routing::get,
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyCors, CorsLayer},
};

use crate::{
    http_server::{
        error::ApiError,
        http_routes::{health, search},
        state::AppState,
    },
    services::search::SearchService,
};

pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub search: SearchService,
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(details).into_response()
}

/// Local development origins on any port.
fn is_local_origin(origin: &HeaderValue, _parts: &Parts) -> bool {
    origin.to_str().is_ok_and(|origin| {
        ["http://localhost", "http://127.0.0.1"]
            .iter()
            .any(|host| match origin.strip_prefix(host) {
                Some(rest) => rest.is_empty() || rest.starts_with(':'),
                None => false,
            })
    })
}

pub fn router(app_state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(is_local_origin))
        .allow_methods(AnyCors)
        .allow_headers(AnyCors);

    Router::new()
        .route("/health", get(health::health))
        .route("/search", get(search::search_get).post(search::search_post))
        .route(
            "/search/detailed",
            get(search::search_detailed_get).post(search::search_detailed_post),
        )
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer)
                .layer(CatchPanicLayer::custom(panic_response)),
        )
        .with_state(app_state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down HTTP server");
}

pub async fn start(config: HttpServerConfig) -> color_eyre::Result<()> {
    let address = format!("{}:{}", config.host, config.port);
    let app_state = Arc::new(AppState {
        search: config.search,
    });
    if !app_state.search.is_available() {
        log::warn!("Catalog client unavailable, searches will fail until restart");
    }

    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .wrap_err_with(|| eyre!("Failed to bind to {}", address))?;

    log::info!("Health check: http://{}/health", address);
    log::info!("Search endpoint: http://{}/search?q=<query>", address);
    log::info!("Detailed search: http://{}/search/detailed?q=<query>", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}
