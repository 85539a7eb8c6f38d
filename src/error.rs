use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Every failure a request can end in. Each variant surfaces to the client as
/// its own `kind`; nothing is recovered locally.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or non-success HTTP status from an external source.
    #[error("{source_name} unavailable: {detail}")]
    UpstreamUnavailable { source_name: String, detail: String },

    /// Response missing expected structure or carrying unparseable numbers.
    #[error("malformed upstream response: {0}")]
    UpstreamMalformed(String),

    /// A valid team identifier yielded no statistics record.
    #[error("no statistics found for team ID {0}")]
    TeamNotFound(String),

    #[error("team(s) not in {league}: {}", .teams.join(", "))]
    TeamNotInLeague { teams: Vec<String>, league: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The classifier produced no usable probabilities.
    #[error("model error: {0}")]
    Model(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn unavailable(source_name: &str, detail: impl Into<String>) -> Self {
        ApiError::UpstreamUnavailable {
            source_name: source_name.to_string(),
            detail: detail.into(),
        }
    }

    /// Stable machine-readable name, returned alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::UpstreamUnavailable { .. } => "upstream_unavailable",
            ApiError::UpstreamMalformed(_) => "upstream_malformed",
            ApiError::TeamNotFound(_) => "team_not_found",
            ApiError::TeamNotInLeague { .. } => "team_not_in_league",
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Model(_) => "model_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::TeamNotInLeague { .. } | ApiError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UpstreamUnavailable { .. }
            | ApiError::UpstreamMalformed(_)
            | ApiError::TeamNotFound(_)
            | ApiError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed ({}): {}", self.kind(), self);
        } else {
            warn!("Request rejected ({}): {}", self.kind(), self);
        }
        let body = json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });
        (status, Json(body)).into_response()
    }
}
