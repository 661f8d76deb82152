//! The uniform JSON envelope returned by every endpoint.
//!
//! A request produces exactly one envelope: either `{status: 200, data}` or
//! `{status: 503, type, error_message}` with no `data` field. All handlers
//! build their responses through the helpers here so the shape cannot drift
//! between endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Error classification carried by failure envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// An external provider call failed: network error, non-2xx status, or
    /// an unusable payload.
    #[serde(rename = "EXT_ERR")]
    External,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Mirrors the HTTP status code so the body is self-describing.
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// 200 envelope wrapping `data`.
pub fn success<T: Serialize>(data: T) -> Response {
    let body = Envelope {
        status: StatusCode::OK.as_u16(),
        data: Some(data),
        kind: None,
        error_message: None,
    };

    (StatusCode::OK, Json(body)).into_response()
}

/// 503 envelope for a failed provider call; `message` is fixed per endpoint.
pub fn external_error(message: &str) -> Response {
    let body = Envelope::<()> {
        status: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
        data: None,
        kind: Some(ErrorKind::External),
        error_message: Some(message.to_string()),
    };

    (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
}
