//! HTTP surface for ragna.
//!
//! Exposes the search assistant and the coding coach as JSON endpoints under
//! the configured prefix, plus a server-sent-events variant of search chat.

mod error;
mod handlers;
mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::{get, post};
use log::{info, warn};
use ragna_rs_config::ServerConfig;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build the application router for the given state.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let api = Router::new()
        .route("/validate-key", post(handlers::validate_key))
        .route("/chat", post(handlers::chat))
        .route("/chat/stream", post(handlers::chat_stream))
        .route("/leetchat", post(handlers::leet_chat))
        .route("/problem-hint", post(handlers::problem_hint))
        .route("/topic-problems", post(handlers::topic_problems))
        .route("/code-review", post(handlers::code_review))
        .route("/study-plan", post(handlers::study_plan))
        .route("/pattern-recognition", post(handlers::pattern_recognition))
        .route("/daily-challenge", get(handlers::daily_challenge));

    let prefix = server.api_prefix.trim_end_matches('/');
    let routes = if prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(prefix, api)
    };

    routes
        .route("/", get(handlers::root))
        .layer(cors_layer(&server.cors_origins))
        .with_state(state)
}

/// CORS policy from the configured allow-list.
///
/// Credentials are allowed, so methods and headers mirror the preflight
/// request instead of using wildcards. A `"*"` entry mirrors any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("ignoring invalid CORS origin: {origin}");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Serve the router on `listener` until Ctrl-C.
pub async fn serve(state: AppState, listener: TcpListener) -> io::Result<()> {
    log_startup(&state.config.server, &listener);
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

/// Bind the configured address and serve.
pub async fn bind_and_serve(state: AppState) -> io::Result<()> {
    let listener = TcpListener::bind(&state.config.server.bind).await?;
    serve(state, listener).await
}

fn log_startup(server: &ServerConfig, listener: &TcpListener) {
    let addr = listener
        .local_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| server.bind.clone());
    info!(
        "listening (addr={}, prefix={}, cors_origins={})",
        addr,
        server.api_prefix,
        server.cors_origins.len()
    );
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
