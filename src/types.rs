use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "nemo".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    256
}

/// A single non-conversational message to be completed by the proxy service.
/// Forwarded verbatim; this service never reinterprets its fields.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyOneShotRequest {
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Completed result from the proxy service. Only values that deserialized
/// cleanly into this shape are ever returned to the caller.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyOneShotResponse {
    pub response: String,
    pub generated_tokens: Option<u64>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_fills_defaults() {
        let req: ProxyOneShotRequest = serde_json::from_str(r#"{"prompt": "hello"}"#).unwrap();
        assert_eq!(req.prompt, "hello");
        assert_eq!(req.model, "nemo");
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_tokens, 256);
    }

    #[test]
    fn request_without_prompt_is_rejected() {
        let res: Result<ProxyOneShotRequest, _> = serde_json::from_str(r#"{"model": "nemo"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn response_allows_missing_token_count() {
        let resp: ProxyOneShotResponse = serde_json::from_str(
            r#"{"response": "hi there", "generated_tokens": null, "timestamp": "2025-04-09T04:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(resp.response, "hi there");
        assert!(resp.generated_tokens.is_none());
    }

    #[test]
    fn response_without_text_is_rejected() {
        let res: Result<ProxyOneShotResponse, _> =
            serde_json::from_str(r#"{"generated_tokens": 4, "timestamp": "now"}"#);
        assert!(res.is_err());
    }
}
