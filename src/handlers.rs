use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, error};
use tower_http::cors::CorsLayer;

use crate::discovery::ServiceDiscovery;
use crate::error::ForwardError;
use crate::types::{HealthResponse, ProxyOneShotRequest, ProxyOneShotResponse};

pub struct AppState {
    pub discovery: Arc<dyn ServiceDiscovery>,
    pub proxy_timeout: Duration,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/message/single/incoming", post(incoming_singleturn))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Forwards a single-turn message to the proxy service and relays its
/// response. Intermediary scaffolding only: the payload passes through
/// unchanged in both directions.
pub async fn incoming_singleturn(
    State(state): State<Arc<AppState>>,
    Json(message): Json<ProxyOneShotRequest>,
) -> Result<Json<ProxyOneShotResponse>, ForwardError> {
    debug!("Received single-turn message: {:?}", message);

    let endpoint = match state.discovery.resolve("proxy").await {
        Ok(Some(endpoint)) => endpoint,
        Ok(None) => {
            error!("No instances of the proxy service are registered");
            return Err(ForwardError::Unavailable);
        }
        Err(err) => {
            error!("Service discovery lookup for proxy failed: {}", err);
            return Err(ForwardError::Unavailable);
        }
    };

    let target_url = format!(
        "http://{}:{}/from/api/completions",
        endpoint.host, endpoint.port
    );
    debug!("Forwarding payload to {}", target_url);

    // Scoped to this request; dropped on every exit path.
    let client = match reqwest::Client::builder()
        .timeout(state.proxy_timeout)
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to build HTTP client for proxy call: {}", err);
            return Err(ForwardError::TransportFailure(err.to_string()));
        }
    };

    let response = match client.post(&target_url).json(&message).send().await {
        Ok(response) => response,
        Err(err) => {
            error!("Request error connecting to proxy service: {}", err);
            return Err(ForwardError::TransportFailure(err.to_string()));
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                error!("Failed to read error body from proxy service: {}", err);
                return Err(ForwardError::TransportFailure(err.to_string()));
            }
        };
        error!("HTTP error from proxy service: {} - {}", status, body);
        return Err(ForwardError::DownstreamRejected { status, body });
    }

    let raw = match response.text().await {
        Ok(raw) => raw,
        Err(err) => {
            error!("Failed to read response body from proxy service: {}", err);
            return Err(ForwardError::TransportFailure(err.to_string()));
        }
    };
    debug!("Response from proxy service: {}", raw);

    let proxy_response: ProxyOneShotResponse = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!("Error parsing response from proxy service: {}", err);
            return Err(ForwardError::ResponseMalformed);
        }
    };

    debug!("Sending brain response: {:?}", proxy_response);
    Ok(Json(proxy_response))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
