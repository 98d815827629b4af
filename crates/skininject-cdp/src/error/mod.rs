//! CDP error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during CDP communication.
#[derive(Error, Debug)]
pub enum CdpError {
    /// The initial WebSocket handshake failed.
    #[error("WebSocket connection failed: {0}")]
    ConnectionFailed(String),

    /// The transport was closed by the peer while a call was in flight.
    ///
    /// Upstream engines treat this as a target-gone event for per-target
    /// sockets, or as engine-fatal for the browser-wide socket.
    #[error("CDP transport closed by peer")]
    TransportClosed,

    /// A received frame was not valid JSON, or not a CDP response/event shape.
    #[error("malformed CDP frame: {0}")]
    TransportProtocol(String),

    /// Failed to hand a request to the write task (the connection is gone).
    #[error("failed to send CDP message: {0}")]
    SendFailed(String),

    /// The browser replied with a top-level CDP error (not a JS exception).
    #[error("CDP protocol error {code}: {message}")]
    Protocol { code: i64, message: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A command was sent but no response arrived within the timeout.
    #[error("response timeout after {0:?}")]
    Timeout(Duration),

    /// The discovery/debugger endpoint URL could not be parsed or had the wrong scheme.
    #[error("invalid CDP endpoint URL: {0}")]
    InvalidEndpointUrl(String),

    /// An HTTP request to the discovery endpoint failed outright.
    #[error("HTTP request to CDP endpoint failed: {0}")]
    HttpRequestFailed(String),

    /// An HTTP request to the discovery endpoint failed to connect within the timeout.
    #[error("connection to CDP endpoint timed out after {0:?}")]
    ConnectionTimeout(Duration),

    /// The discovery endpoint responded, but not with data we could use.
    #[error("endpoint discovery failed for {url}: {reason}")]
    EndpointDiscoveryFailed { url: String, reason: String },

    /// A command was addressed to a `sessionId` the connection no longer knows about.
    #[error("session not found: {0}")]
    SessionNotFound(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        match err {
            tokio_tungstenite::tungstenite::Error::ConnectionClosed
            | tokio_tungstenite::tungstenite::Error::AlreadyClosed => Self::TransportClosed,
            other => Self::ConnectionFailed(other.to_string()),
        }
    }
}
