//! Core request utilities for the Tweet API.
//!
//! This module contains the low-level helpers every endpoint goes through:
//! sending an authenticated request, mapping failures onto [`FeedError`], and
//! keeping user-supplied text safe for log output.

use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{FeedError, FeedResult};

/// Longest excerpt of a response body kept in logs and error messages.
const MAX_LOGGED_BODY: usize = 200;

/// Failure envelope the Tweet API returns with non-2xx statuses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    error_message: String,
}

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// This function:
/// - Truncates long text to prevent log flooding
/// - Replaces control characters that could manipulate log output
/// - Escapes newlines to prevent log injection
///
/// Truncation counts characters, so multi-byte text is never split.
pub fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let head: String = sanitized.chars().take(max_len).collect();
        format!("{}... [truncated, {} total bytes]", head, text.len())
    } else {
        sanitized
    }
}

/// Sends an authenticated request to the Tweet API and returns the body on success.
///
/// The request must already carry its `Authorization` header. Non-2xx
/// responses become [`FeedError::Api`], using the `errorMessage` envelope
/// when the server sent one.
///
/// # Parameters
///
/// - `request_builder`: A configured reqwest::RequestBuilder ready to send
/// - `operation_name`: Human-readable name for the operation (for logging)
pub(crate) async fn send_request(
    request_builder: reqwest::RequestBuilder,
    operation_name: &str,
) -> FeedResult<String> {
    info!("Sending Tweet API request for operation: {}", operation_name);

    let response = request_builder.send().await.map_err(|e| {
        error!("Request for '{}' failed to send: {}", operation_name, e);
        FeedError::Http(e)
    })?;

    let status = response.status();
    info!(
        "Received response with status: {} for operation: {}",
        status, operation_name
    );

    let body = response.text().await?;

    if status.is_success() {
        debug!(
            "Response summary for '{}': {} bytes received",
            operation_name,
            body.len()
        );
        return Ok(body);
    }

    error!("Operation '{}' failed - Status: {}", operation_name, status);
    debug!(
        "Error response for '{}': {}",
        operation_name,
        sanitize_for_logging(&body, MAX_LOGGED_BODY)
    );

    Err(FeedError::Api {
        status: status.as_u16(),
        message: error_message_from_body(&body),
    })
}

/// Decodes a JSON body, logging what could not be parsed.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &str, operation_name: &str) -> FeedResult<T> {
    serde_json::from_str(body).map_err(|e| {
        error!(
            "Could not decode response for '{}': {} (body: {})",
            operation_name,
            e,
            sanitize_for_logging(body, MAX_LOGGED_BODY)
        );
        FeedError::Json(e)
    })
}

/// Decodes a body that may or may not be the created record.
///
/// Several endpoints answer with a plain confirmation string instead of the
/// record, which is still a success.
pub(crate) fn parse_optional_json<T: DeserializeOwned>(body: &str, operation_name: &str) -> Option<T> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(body) {
        Ok(record) => Some(record),
        Err(_) => {
            debug!(
                "Response for '{}' is not a record: {}",
                operation_name,
                sanitize_for_logging(body, MAX_LOGGED_BODY)
            );
            None
        }
    }
}

fn error_message_from_body(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error_message,
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => sanitize_for_logging(body, MAX_LOGGED_BODY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_newlines_and_controls() {
        assert_eq!(sanitize_for_logging("a\nb\tc\u{7}", 50), "a b c?");
    }

    #[test]
    fn sanitize_truncates_on_char_boundary() {
        let text = "ééééé";
        let out = sanitize_for_logging(text, 2);
        assert!(out.starts_with("éé... [truncated, 10 total bytes]"));
    }

    #[test]
    fn error_message_prefers_envelope() {
        assert_eq!(
            error_message_from_body(r#"{"errorMessage":"no tweets found for this username"}"#),
            "no tweets found for this username"
        );
        assert_eq!(error_message_from_body(""), "no response body");
        assert_eq!(error_message_from_body("boom"), "boom");
    }
}
