//! Error mapping helpers shared by backend implementations

use folio_core::Error as CoreError;
use reqwest::StatusCode;
use std::time::Duration;

/// Build a provider-side error
pub fn provider_error(
    provider: impl Into<String>,
    message: impl Into<String>,
    retry_after: Option<Duration>,
) -> CoreError {
    CoreError::Provider {
        provider: provider.into(),
        message: message.into(),
        retry_after,
        source: None,
    }
}

/// Convert network errors to core errors
pub fn network_error(error: reqwest::Error) -> CoreError {
    if error.is_timeout() {
        return CoreError::Timeout;
    }
    CoreError::Network {
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

/// Convert serialization errors to core errors
pub fn serialization_error(error: serde_json::Error) -> CoreError {
    CoreError::Serialization {
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

/// Map a non-success HTTP status to a core error
///
/// The message keeps the status line and response body verbatim so callers
/// that classify failures by description (e.g. quota detection) see what
/// the provider actually said. `retry_after` carries the parsed
/// `Retry-After` header for rate-limit responses.
pub fn status_error(
    provider: &str,
    status: StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> CoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CoreError::Authentication(format!("HTTP {}: {}", status, body))
        }
        _ => CoreError::Provider {
            provider: provider.to_string(),
            message: format!("HTTP {}: {}", status, body),
            retry_after,
            source: None,
        },
    }
}

/// Parse a `Retry-After` header value given in seconds
pub fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
