//! Shared HTTP client construction and status mapping.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::LumoError;

/// Build the client used by a gateway.
///
/// `timeout` of `None` leaves requests unbounded.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, LumoError> {
    let mut builder = reqwest::Client::builder().pool_max_idle_per_host(4);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| LumoError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// JSON content type plus an optional Bearer token.
pub fn bearer_headers(api_key: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key {
        if let Ok(mut val) = HeaderValue::from_str(&format!("Bearer {key}")) {
            val.set_sensitive(true);
            headers.insert(AUTHORIZATION, val);
        }
    }
    headers
}

/// Map a non-success HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> LumoError {
    match status {
        401 | 403 => LumoError::Authentication(extract_message(body)),
        429 => LumoError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => LumoError::api(status, extract_message(body)),
    }
}

/// Prefer `error.message` from a JSON error body, else the raw body.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_map_to_authentication() {
        assert!(matches!(status_to_error(401, ""), LumoError::Authentication(_)));
        assert!(matches!(status_to_error(403, ""), LumoError::Authentication(_)));
    }

    #[test]
    fn rate_limit_reads_retry_after() {
        let err = status_to_error(429, r#"{"error":{"retry_after":1.5}}"#);
        assert!(matches!(
            err,
            LumoError::RateLimited {
                retry_after_ms: Some(1500)
            }
        ));
    }

    #[test]
    fn api_error_prefers_json_message() {
        let err = status_to_error(400, r#"{"error":{"code":400,"message":"bad model"}}"#);
        assert_eq!(err.to_string(), "API error (status 400): bad model");
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = status_to_error(502, "upstream exploded");
        assert_eq!(err.to_string(), "API error (status 502): upstream exploded");
    }

    #[test]
    fn bearer_header_is_optional() {
        assert!(bearer_headers(None).get(AUTHORIZATION).is_none());
        let headers = bearer_headers(Some("k"));
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer k");
    }
}
