//! HTTP API for the tournament leaderboard.
//!
//! # Modules
//!
//! - [`players`]: Player registration, score updates, listing and lookup
//! - [`middleware`]: Basic authentication for the player endpoints
//! - [`request_id`]: Correlation ids, request logging and HTTP metrics
//! - [`error`]: Mapping of tournament errors onto status codes
//! - [`openapi`]: OpenAPI description of these endpoints
//!
//! # Endpoints Overview
//!
//! ## Players (Basic auth required)
//! - `POST /players` - Register a player
//! - `PUT /players` - Overwrite a player's score
//! - `DELETE /players` - Clear the tournament
//! - `GET /players` - List players by rank
//! - `GET /players/{id}` - Get one player with their rank
//!
//! ## Public
//! - `GET /health` - Store health status
//! - `GET /openapi` - OpenAPI 3.0 document
//! - `GET /static/*` - Files from the configured static directory
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use lb_server::api::{create_router, AppState};
//! use lb_server::config::SecurityConfig;
//! use leaderboard::db::InMemoryPlayerStore;
//! use leaderboard::player::TournamentService;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState {
//!     service: TournamentService::with_log_reporter(Arc::new(InMemoryPlayerStore::new())),
//!     security: Arc::new(SecurityConfig::new("admin", "password123")),
//!     static_dir: "static".into(),
//! };
//!
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod middleware;
pub mod openapi;
pub mod players;
pub mod request_id;

use axum::{
    Router,
    extract::State,
    http::{
        Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Json},
    routing::get,
};
use leaderboard::player::TournamentService;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::config::SecurityConfig;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request.
#[derive(Clone)]
pub struct AppState {
    pub service: TournamentService,
    pub security: Arc<SecurityConfig>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

/// Create the complete API router with all endpoints and middleware.
///
/// ```text
/// GET    /health          - Health check (public)
/// GET    /openapi         - OpenAPI document (public)
/// GET    /static/*        - Static files (public)
/// POST   /players         - Register player (auth required)
/// PUT    /players         - Update score (auth required)
/// DELETE /players         - Clear tournament (auth required)
/// GET    /players         - List by rank (auth required)
/// GET    /players/{id}    - Get player (auth required)
/// ```
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/players",
            get(players::list_players)
                .post(players::create_player)
                .put(players::update_player_score)
                .delete(players::clear_tournament),
        )
        .route("/players/{player_id}", get(players::get_player))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::basic_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/openapi", get(openapi::openapi_document))
        .nest_service("/static", ServeDir::new(&state.static_dir))
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the player store answers, `503 Service Unavailable`
/// otherwise.
///
/// ```bash
/// curl http://localhost:8080/health
/// # {"status":"healthy","version":"0.1.0","store":true,"timestamp":"2026-10-17T10:30:00+00:00"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_healthy = match state.service.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            false
        }
    };

    let status_code = if store_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if store_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "store": store_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
