use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// One forwarding attempt fails in exactly one of these ways.
///
/// `DownstreamRejected` means the proxy service answered with a failure status;
/// `TransportFailure` means it could not be reached at all. The two are kept in
/// separate status spaces so callers can tell them apart.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Proxy service is unavailable.")]
    Unavailable,

    #[error("Error from proxy service: {body}")]
    DownstreamRejected { status: StatusCode, body: String },

    #[error("Connection error: {0}")]
    TransportFailure(String),

    #[error("Invalid response format from proxy service.")]
    ResponseMalformed,
}

impl ForwardError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::DownstreamRejected { status, .. } => *status,
            Self::TransportFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ResponseMalformed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let body = serde_json::to_string(&json!({
            "detail": self.to_string()
        }))
        .unwrap();

        (
            self.status(),
            [("content-type", "application/json")],
            body,
        )
            .into_response()
    }
}
