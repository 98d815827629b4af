//! Local Engine (C4): drives the browser-wide CDP endpoint (§4.4).
//!
//! One WebSocket to the browser's aggregate debugger endpoint, multiplexing
//! every target's session over it. Each `Target.targetCreated` spawns an
//! independent task that attaches; each subsequent
//! `Target.targetInfoChanged(attached=true)` for that target spawns another
//! task that probes the live title/URL, patches by title, fetches the
//! document, and patches by attribute. Splitting attach from probe/patch
//! this way — rather than chaining them in one task right after attach —
//! is what lets a target get re-probed every time it re-announces itself as
//! attached, matching the state machine's documented trigger. This replaces
//! the source's well-known-request-ID routing with a linear sequence of
//! awaited calls, since the transport already correlates request and
//! response by ID.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use skininject_cdp::protocol::dom::{GetDocumentParams, GetDocumentResult};
use skininject_cdp::protocol::runtime::{EvaluateParams, EvaluateResult, RemoteObject};
use skininject_cdp::protocol::target_domain::{
    AttachToTargetParams, AttachToTargetResult, SetDiscoverTargetsParams, TargetCreatedEvent,
    TargetDestroyedEvent, TargetInfo, TargetInfoChangedEvent,
};
use skininject_cdp::{discover_websocket_url, CdpConnection, CdpConnectionOptions, CdpError};
use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::collaborators::{HostBridgeProvider, PatchSetFeed};
use crate::error::EngineError;
use crate::evaluator::{evaluate_css, evaluate_js};
use crate::matcher::{match_attrs, match_title};
use crate::patch::Patch;
use crate::target::TargetState;

/// Substring marking the settings page's `<html>` attributes for host bridge injection.
const SETTINGS_MODAL_ROOT_TOKEN: &str = "settings_SettingsModalRoot_";

/// JS probe evaluated right after attach to read the live page title and URL.
const PROBE_EXPRESSION: &str =
    "JSON.stringify({title: document.title, url: document.location.href})";

/// Raw target lifecycle event published to the Remote Engine (the handoff, §4.4).
#[derive(Debug, Clone)]
pub enum TargetNotification {
    /// A new target appeared.
    Created(TargetInfo),
    /// An existing target's info changed.
    InfoChanged(TargetInfo),
}

#[derive(Debug, Deserialize)]
struct ProbeResult {
    title: String,
    url: String,
}

/// Parse the probe's `JSON.stringify(...)` result back into a title/URL pair.
fn parse_probe_result(remote: &RemoteObject) -> Option<ProbeResult> {
    let raw = remote.value.as_ref()?.as_str()?;
    serde_json::from_str(raw).ok()
}

struct Shared {
    connection: Arc<CdpConnection>,
    patch_set: PatchSetFeed,
    host_bridge: Arc<dyn HostBridgeProvider>,
    notifications: mpsc::Sender<TargetNotification>,
    targets: RwLock<HashMap<String, TargetState>>,
}

/// Drives the browser-wide CDP endpoint: discovery, attach, probe, patch.
pub struct LocalEngine {
    shared: Arc<Shared>,
}

impl LocalEngine {
    /// Connect to the browser's aggregate debugger endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if endpoint discovery or the WebSocket handshake fails.
    pub async fn connect(
        debugger_base: &str,
        patch_set: PatchSetFeed,
        host_bridge: Arc<dyn HostBridgeProvider>,
        notifications: mpsc::Sender<TargetNotification>,
    ) -> Result<Self, EngineError> {
        let ws_url = discover_websocket_url(debugger_base, &CdpConnectionOptions::default())
            .await
            .map_err(EngineError::Discovery)?;
        let connection = CdpConnection::connect(&ws_url)
            .await
            .map_err(EngineError::Discovery)?;

        Ok(Self {
            shared: Arc::new(Shared {
                connection: Arc::new(connection),
                patch_set,
                host_bridge,
                notifications,
                targets: RwLock::new(HashMap::new()),
            }),
        })
    }

    /// Current state of a tracked target, mainly for observability and tests.
    pub async fn state_of(&self, target_id: &str) -> Option<TargetState> {
        self.shared.targets.read().await.get(target_id).cloned()
    }

    /// Run the discovery and event loop. Returns only on a fatal transport error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LocalTransportClosed`] when the browser-wide
    /// socket closes, or [`EngineError::Cdp`] if `Target.setDiscoverTargets`
    /// itself fails.
    #[instrument(level = "info", skip(self))]
    pub async fn run(&self) -> Result<(), EngineError> {
        self.shared
            .connection
            .send_command::<_, serde_json::Value>(
                "Target.setDiscoverTargets",
                Some(SetDiscoverTargetsParams { discover: true }),
                None,
            )
            .await
            .map_err(EngineError::Cdp)?;

        let mut events = self.shared.connection.subscribe_events();
        info!("local engine event loop started");

        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(EngineError::LocalTransportClosed(CdpError::TransportClosed));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "local engine event subscriber lagged, events dropped");
                    continue;
                }
            };

            let Some(params) = event.params.clone() else {
                continue;
            };

            match event.method.as_str() {
                "Target.targetCreated" => {
                    if let Ok(created) = serde_json::from_value::<TargetCreatedEvent>(params) {
                        self.handle_target_created(created.target_info).await;
                    }
                }
                "Target.targetInfoChanged" => {
                    if let Ok(changed) = serde_json::from_value::<TargetInfoChangedEvent>(params) {
                        self.handle_target_info_changed(changed.target_info).await;
                    }
                }
                "Target.targetDestroyed" => {
                    if let Ok(destroyed) = serde_json::from_value::<TargetDestroyedEvent>(params) {
                        self.shared.targets.write().await.remove(&destroyed.target_id);
                    }
                }
                _ => {}
            }
        }
    }

    async fn handle_target_created(&self, info: TargetInfo) {
        debug!(target_id = %info.target_id, url = %info.url, "target created");
        self.shared
            .targets
            .write()
            .await
            .insert(info.target_id.clone(), TargetState::Discovered);

        let _ = self
            .shared
            .notifications
            .send(TargetNotification::Created(info.clone()))
            .await;

        let shared = self.shared.clone();
        tokio::spawn(async move {
            attach_target(shared, info).await;
        });
    }

    async fn handle_target_info_changed(&self, info: TargetInfo) {
        let target_id = info.target_id.clone();
        let attached = info.attached;

        let _ = self
            .shared
            .notifications
            .send(TargetNotification::InfoChanged(info))
            .await;

        if !attached {
            return;
        }

        // `targetInfoChanged(attached=true)` is what re-enters the probe/patch
        // sequence (§4.4's `Attached` state is documented as "awaiting" this
        // event) — attach itself only establishes the session.
        let session_id = self
            .shared
            .targets
            .read()
            .await
            .get(&target_id)
            .and_then(TargetState::session_id)
            .map(str::to_string);

        let Some(session_id) = session_id else {
            return;
        };

        let shared = self.shared.clone();
        tokio::spawn(async move {
            probe_and_patch(shared, target_id, session_id).await;
        });
    }
}

async fn set_state(shared: &Shared, target_id: &str, state: TargetState) {
    shared.targets.write().await.insert(target_id.to_string(), state);
}

/// Attach to a newly created target. Probing is deferred: it starts only
/// once `Target.targetInfoChanged(attached=true)` arrives for this target
/// (handled by [`LocalEngine::handle_target_info_changed`]), matching the
/// documented `Attached` state (§4.4).
async fn attach_target(shared: Arc<Shared>, info: TargetInfo) {
    let target_id = info.target_id.clone();
    set_state(&shared, &target_id, TargetState::Attaching).await;

    let attach_result: Result<AttachToTargetResult, CdpError> = shared
        .connection
        .send_command(
            "Target.attachToTarget",
            Some(AttachToTargetParams {
                target_id: target_id.clone(),
                flatten: Some(true),
            }),
            None,
        )
        .await;

    let session_id = match attach_result {
        Ok(result) => result.session_id,
        Err(err) => {
            warn!(target_id = %target_id, error = %err, "failed to attach to target");
            set_state(&shared, &target_id, TargetState::Untracked).await;
            return;
        }
    };
    set_state(&shared, &target_id, TargetState::Attached { session_id }).await;
}

/// Probe the live title/URL, patch by title, fetch the document, patch by
/// attribute. Runs once per `targetInfoChanged(attached=true)` event, so a
/// target that is re-attached (or re-announced) re-enters this sequence.
async fn probe_and_patch(shared: Arc<Shared>, target_id: String, session_id: String) {
    set_state(
        &shared,
        &target_id,
        TargetState::Probing { session_id: session_id.clone() },
    )
    .await;

    let probe: Result<EvaluateResult, CdpError> = shared
        .connection
        .send_command(
            "Runtime.evaluate",
            Some(EvaluateParams::returning_value(PROBE_EXPRESSION)),
            Some(&session_id),
        )
        .await;

    let probe = match probe {
        Ok(result) if result.exception_details.is_none() => parse_probe_result(&result.result),
        Ok(_) => {
            // The probe script itself threw — a CDP-level success but JS
            // failure. Abort this cycle, stay attached for the next event.
            None
        }
        Err(err) => {
            warn!(target_id = %target_id, error = %err, "title/url probe failed");
            None
        }
    };

    let Some(probe) = probe else {
        set_state(&shared, &target_id, TargetState::Attached { session_id }).await;
        return;
    };

    set_state(
        &shared,
        &target_id,
        TargetState::Titled { session_id: session_id.clone(), title: probe.title.clone() },
    )
    .await;

    let snapshot = shared.patch_set.borrow().clone();
    if snapshot.is_valid() {
        for patch in match_title(&snapshot, &probe.title) {
            debug!(target_id = %target_id, title = %probe.title, pattern = %patch.regex().as_str(), "title match");
            apply_patch(&shared.connection, Some(&session_id), patch).await;
        }
    }

    let doc_result: Result<GetDocumentResult, CdpError> = shared
        .connection
        .send_command(
            "DOM.getDocument",
            Some(GetDocumentParams { depth: Some(-1), pierce: Some(false) }),
            Some(&session_id),
        )
        .await;

    match doc_result {
        Ok(doc) => {
            if let Some(attrs) = doc.root.find_html_element().and_then(|html| html.attribute_string()) {
                if snapshot.is_valid() {
                    for patch in match_attrs(&snapshot, &attrs) {
                        debug!(target_id = %target_id, pattern = %patch.regex().as_str(), "attrs match");
                        apply_patch(&shared.connection, Some(&session_id), patch).await;
                    }
                }
                if attrs.contains(SETTINGS_MODAL_ROOT_TOKEN) {
                    let script = shared.host_bridge.bootstrap_script().to_string();
                    if let Err(err) = evaluate_js(&shared.connection, Some(&session_id), &script).await {
                        warn!(target_id = %target_id, error = %err, "host bridge injection failed");
                    }
                }
            }
            // Missing attributes entirely: "no selectable attributes", silently skipped.
        }
        Err(err) => {
            warn!(target_id = %target_id, error = %err, "DOM.getDocument failed");
        }
    }

    set_state(
        &shared,
        &target_id,
        TargetState::Documented { session_id: session_id.clone(), title: probe.title },
    )
    .await;
    set_state(&shared, &target_id, TargetState::Steady { session_id }).await;
}

async fn apply_patch(connection: &CdpConnection, session_id: Option<&str>, patch: &Patch) {
    if let Some(css) = patch.css() {
        if let Err(err) = evaluate_css(connection, session_id, css).await {
            warn!(error = %err, "CSS evaluation failed");
        }
    }
    if let Some(js) = patch.js() {
        if let Err(err) = evaluate_js(connection, session_id, js).await {
            warn!(error = %err, "JS evaluation failed");
        }
    }
}

#[cfg(test)]
mod tests;
