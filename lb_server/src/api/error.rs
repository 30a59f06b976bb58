//! Mapping of tournament errors onto HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use leaderboard::player::{TournamentError, ValidationError};
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Errors produced by API handlers
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by the tournament service
    Tournament(TournamentError),
    /// Body could not be decoded
    BadRequest(String),
    /// Missing or wrong credentials
    Unauthorized { realm: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Tournament(TournamentError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Tournament(TournamentError::Conflict { .. }) => StatusCode::CONFLICT,
            ApiError::Tournament(TournamentError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Tournament(TournamentError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        }
    }

    /// Error class used as the metrics outcome label
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::Tournament(TournamentError::Validation(_)) | ApiError::BadRequest(_) => {
                "validation"
            }
            ApiError::Tournament(TournamentError::Conflict { .. }) => "conflict",
            ApiError::Tournament(TournamentError::NotFound(_)) => "not_found",
            ApiError::Tournament(TournamentError::Store(_)) => "store",
            ApiError::Unauthorized { .. } => "unauthorized",
        }
    }
}

impl From<TournamentError> for ApiError {
    fn from(err: TournamentError) -> Self {
        ApiError::Tournament(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Tournament(TournamentError::Validation(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, realm) = match self {
            ApiError::Tournament(err) => {
                if let TournamentError::Store(ref store_err) = err {
                    tracing::error!(error = %store_err, "Store failure while serving request");
                }
                (err.client_message(), None)
            }
            ApiError::BadRequest(message) => (message, None),
            ApiError::Unauthorized { realm } => ("Unauthorized".to_string(), Some(realm)),
        };

        let mut response = (status, Json(ErrorResponse { message })).into_response();

        if let Some(realm) = realm {
            let challenge = format!("Basic realm=\"{realm}\", charset=\"UTF-8\"");
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                response.headers_mut().insert(WWW_AUTHENTICATE, value);
            }
        }

        response
    }
}
