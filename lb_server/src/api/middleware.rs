//! HTTP Basic authentication for the player endpoints.
//!
//! ```rust,no_run
//! use axum::{Router, routing::get, middleware};
//! # use lb_server::api::middleware::basic_auth_middleware;
//! # use lb_server::api::AppState;
//! # async fn handler() {}
//! # let state: AppState = unimplemented!();
//!
//! let protected_routes: Router<AppState> = Router::new()
//!     .route("/players", get(handler))
//!     .layer(middleware::from_fn_with_state(state, basic_auth_middleware));
//! # let _ = protected_routes;
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};

use super::{AppState, error::ApiError};
use crate::logging::log_security_event;

/// Reject requests without valid Basic credentials.
///
/// - **Missing or malformed header**: `401 Unauthorized`
/// - **Wrong login or password**: `401 Unauthorized`
///
/// Both carry a `WWW-Authenticate: Basic realm="..."` challenge.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let unauthorized = || ApiError::Unauthorized {
        realm: state.security.realm.clone(),
    };

    let Some(Authorization(credentials)) = request.headers().typed_get::<Authorization<Basic>>()
    else {
        log_security_event(
            "missing_credentials",
            None,
            "Request without Basic credentials",
        );
        return Err(unauthorized());
    };

    if !state
        .security
        .verify(credentials.username(), credentials.password())
    {
        log_security_event(
            "failed_basic_auth",
            Some(credentials.username()),
            "Invalid credentials",
        );
        return Err(unauthorized());
    }

    Ok(next.run(request).await)
}
