//! Skin injection engine: patches a running CEF-embedded application's pages
//! with user-authored CSS and JS over the Chrome DevTools Protocol.
//!
//! The engine is embedded in a larger application that owns config loading,
//! file watching, and IPC — see [`collaborators`] for the narrow interfaces
//! it expects from its host. Once wired up, the host drives everything
//! through a single [`Supervisor`].
//!
//! ## Architecture
//!
//! - the `skininject-cdp` crate (a separate crate) — the CDP transport: one
//!   WebSocket, request/response correlation by ID, an event broadcast.
//! - [`evaluator`] (C2) — turns a patch's CSS/JS into a `Runtime.evaluate`
//!   call and classifies the result as success, transient, or permanent.
//! - [`matcher`] (C3) — three matching contexts (title, url, attrs), each
//!   with its own rule; see the module docs for why they're not
//!   interchangeable.
//! - [`local_engine`] (C4) — one socket to the browser's aggregate debugger
//!   endpoint, multiplexing every locally-scoped target over it.
//! - [`remote_engine`] (C5) — an independent socket per remotely-hosted
//!   target, driven by notifications [`local_engine`] publishes.
//! - [`supervisor`] (C6) — owns the patch-set cell, starts both engines,
//!   restarts the Local Engine across crashes.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use skininject_core::collaborators::StaticHostBridge;
//! use skininject_core::patch::parse_patch_set;
//! use skininject_core::Supervisor;
//! use tokio::sync::watch;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let host_bridge = Arc::new(StaticHostBridge::new("window.__millennium = {};"));
//! let supervisor = Supervisor::new("http://127.0.0.1:8080", host_bridge);
//!
//! let patch_set = parse_patch_set(r#"{"Patches": []}"#)?;
//! supervisor.reload_patch_set(patch_set);
//!
//! let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//! supervisor.run(shutdown_rx).await;
//! # Ok(())
//! # }
//! ```

pub mod collaborators;
pub mod error;
pub mod evaluator;
pub mod local_engine;
pub mod matcher;
pub mod patch;
pub mod remote_engine;
pub mod supervisor;
pub mod target;

pub use collaborators::{HostBridgeProvider, PatchSetFeed, StaticHostBridge};
pub use error::EngineError;
pub use evaluator::{evaluate_css, evaluate_js, EvalOutcome};
pub use local_engine::{LocalEngine, TargetNotification};
pub use patch::{parse_patch_set, Patch, PatchSet};
pub use remote_engine::{PatchedSet, RemoteEngine};
pub use supervisor::Supervisor;
pub use target::{TargetDescriptor, TargetState};

/// Bootstrap the engine against a running browser's discovery endpoint and
/// run it to completion (or until `shutdown` fires).
///
/// This is the single entry point the host application calls after loading
/// its first skin config: connect, supervise, return. The initial patch set
/// is loaded before the engines start so the very first local targets are
/// patched on their first probe rather than racing a late reload.
///
/// # Errors
///
/// Returns an error only if the initial patch set fails to parse. Once
/// running, engine-level failures are retried internally and never surface
/// here (see [`supervisor::Supervisor::run`]).
pub async fn initialize(
    debugger_base: &str,
    initial_patch_set_json: &str,
    host_bridge: std::sync::Arc<dyn HostBridgeProvider>,
    shutdown: tokio::sync::watch::Receiver<bool>,
) -> Result<(), EngineError> {
    let patch_set = parse_patch_set(initial_patch_set_json)?;
    let supervisor = Supervisor::new(debugger_base, host_bridge);
    supervisor.reload_patch_set(patch_set);
    supervisor.run(shutdown).await;
    Ok(())
}
