//! # skininject-cdp — Chrome DevTools Protocol client
//!
//! Low-level Chrome DevTools Protocol (CDP) implementation over WebSocket. This
//! crate is the transport layer for talking to a CEF-embedded browser that is
//! already running with remote debugging enabled — it never launches or manages
//! a browser process itself.
//!
//! This crate handles:
//! - WebSocket connection management to an already-running CEF/Chromium instance
//! - CDP message serialization and deserialization
//! - Command/response correlation with async/await
//! - Event subscription and streaming
//! - HTTP-based endpoint discovery (`/json/version`, `/json`)
//!
//! ## Quick Start
//!
//! ```no_run
//! use skininject_cdp::{CdpConnection, protocol::runtime::EvaluateParams};
//!
//! # async fn example() -> Result<(), skininject_cdp::CdpError> {
//! let conn = CdpConnection::connect("ws://localhost:8080/devtools/browser/...").await?;
//!
//! let result: skininject_cdp::protocol::runtime::EvaluateResult = conn
//!     .send_command(
//!         "Runtime.evaluate",
//!         Some(EvaluateParams::returning_value("document.title")),
//!         None,
//!     )
//!     .await?;
//!
//! println!("result: {:?}", result.result);
//! # Ok(())
//! # }
//! ```
//!
//! ## Discovering the WebSocket URL
//!
//! CEF exposes a JSON API for discovering the browser's WebSocket endpoint:
//!
//! ```no_run
//! use skininject_cdp::{discover_websocket_url, CdpConnectionOptions};
//!
//! # async fn example() -> Result<(), skininject_cdp::CdpError> {
//! let options = CdpConnectionOptions::default();
//! let ws_url = discover_websocket_url("http://localhost:8080", &options).await?;
//! println!("WebSocket URL: {}", ws_url);
//! # Ok(())
//! # }
//! ```
//!
//! Enumerating the current set of top-level targets (pages) uses the sibling
//! `/json` endpoint:
//!
//! ```no_run
//! use skininject_cdp::{list_targets, CdpConnectionOptions};
//!
//! # async fn example() -> Result<(), skininject_cdp::CdpError> {
//! let options = CdpConnectionOptions::default();
//! let targets = list_targets("http://localhost:8080", &options).await?;
//! for target in targets {
//!     println!("target: {} ({})", target.title, target.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Sending Commands
//!
//! Commands are sent with optional session IDs for per-target operations:
//!
//! ```no_run
//! use skininject_cdp::CdpConnection;
//! use skininject_cdp::protocol::page::SetBypassCspParams;
//!
//! # async fn example(conn: &CdpConnection, session_id: &str) -> Result<(), skininject_cdp::CdpError> {
//! // Target-scoped command (flat params, no result expected).
//! let _: serde_json::Value = conn
//!     .send_command(
//!         "Page.setBypassCSP",
//!         Some(SetBypassCspParams { enabled: true }),
//!         Some(session_id),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Subscribing to Events
//!
//! ```no_run
//! use skininject_cdp::CdpConnection;
//!
//! # async fn example(conn: &CdpConnection) -> Result<(), skininject_cdp::CdpError> {
//! let mut events = conn.subscribe_events();
//!
//! while let Ok(event) = events.recv().await {
//!     match &event.method[..] {
//!         "Target.targetCreated" => println!("new target"),
//!         "Page.frameResized" => {}
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Protocol Domains
//!
//! The [`protocol`] module contains typed definitions for the handful of CDP
//! domains this crate needs — it is not a general CDP binding:
//!
//! - `target_domain` - attaching to and observing targets (pages)
//! - `page` - CSP bypass and reload, for the remote engine's patch application
//! - `runtime` - JavaScript evaluation, for both the local and remote engines
//! - `dom` - document root retrieval, for locating the `<html>` element
//!
//! ## Error Handling
//!
//! The [`CdpError`] type covers all possible errors:
//!
//! ```no_run
//! use skininject_cdp::{CdpConnection, CdpError};
//!
//! # async fn example() -> Result<(), CdpError> {
//! let result = CdpConnection::connect("ws://invalid:9999/...").await;
//!
//! match result {
//!     Ok(_conn) => println!("Connected!"),
//!     Err(CdpError::ConnectionFailed(e)) => println!("Connection error: {}", e),
//!     Err(CdpError::Protocol { code, message }) => {
//!         println!("CDP error {}: {}", code, message);
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`connection`] - WebSocket connection management and HTTP discovery
//! - [`transport`] - Wire message types and serialization
//! - [`protocol`] - CDP domain type definitions
//! - [`error`] - Error types

pub mod connection;
pub mod error;
pub mod protocol;
pub mod transport;

pub use connection::{
    discover_websocket_url, list_targets, BrowserVersion, CdpConnection, CdpConnectionOptions,
    TargetListing,
};
pub use error::CdpError;
pub use transport::{CdpEvent, CdpMessage, CdpRequest, CdpResponse};
