//! Remote Engine (C5): independent per-target sessions for remotely-hosted
//! pages (§4.5).
//!
//! Unlike the Local Engine, which multiplexes every target over one
//! browser-wide socket, the Remote Engine opens a dedicated WebSocket per
//! patched target. It is driven by the [`TargetNotification`] feed the Local
//! Engine publishes: a qualifying notification triggers a fresh `/json`
//! enumeration, and every `(target, patch)` pair that should be patched gets
//! its own worker task.

use std::collections::HashSet;
use std::sync::Arc;

use skininject_cdp::protocol::page::{ReloadParams, SetBypassCspParams, FRAME_RESIZED_EVENT};
use skininject_cdp::{list_targets, CdpConnection, CdpConnectionOptions, CdpError};
use tokio::sync::{broadcast, mpsc, Mutex};
use tracing::{debug, info, instrument, trace, warn};

use crate::collaborators::PatchSetFeed;
use crate::evaluator::{evaluate_css, evaluate_js, EvalOutcome};
use crate::local_engine::TargetNotification;
use crate::matcher::{should_patch, LOOPBACK_HOST};
use crate::patch::{Patch, PatchSet};

/// Cap on re-evaluation attempts after a transient failure before giving up
/// on a single patch application (§9 redesign note: the source retried
/// forever).
const MAX_RETRIES: u32 = 8;

/// Set of `webSocketDebuggerUrl`s with an active remote worker.
///
/// Admission is atomic: [`PatchedSet::try_admit`] both checks and records
/// membership under one lock, closing the race between a `targetCreated`
/// notification and the `/json` re-enumeration it triggers (§9 Open
/// Question).
#[derive(Debug, Default)]
pub struct PatchedSet {
    inner: Mutex<HashSet<String>>,
}

impl PatchedSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `url` as patched if it wasn't already. Returns whether this
    /// call was the one that admitted it.
    pub async fn try_admit(&self, url: &str) -> bool {
        self.inner.lock().await.insert(url.to_string())
    }

    /// Drop `url` from the set, allowing a future admission to retry it.
    pub async fn remove(&self, url: &str) {
        self.inner.lock().await.remove(url);
    }

    /// Whether `url` currently has an active worker.
    pub async fn contains(&self, url: &str) -> bool {
        self.inner.lock().await.contains(url)
    }
}

/// Drives independent per-target sessions for remotely-hosted pages.
pub struct RemoteEngine {
    debugger_base: String,
    patch_set: PatchSetFeed,
    patched: Arc<PatchedSet>,
}

impl RemoteEngine {
    /// Build a Remote Engine against the browser's discovery endpoint.
    #[must_use]
    pub fn new(debugger_base: impl Into<String>, patch_set: PatchSetFeed) -> Self {
        Self {
            debugger_base: debugger_base.into(),
            patch_set,
            patched: Arc::new(PatchedSet::new()),
        }
    }

    /// The shared patched-URL set, mainly for observability and tests.
    #[must_use]
    pub fn patched_set(&self) -> &Arc<PatchedSet> {
        &self.patched
    }

    /// Consume target notifications from the Local Engine and dispatch
    /// remote workers. Returns only when the notification channel closes.
    #[instrument(level = "info", skip(self, notifications))]
    pub async fn run(&self, mut notifications: mpsc::Receiver<TargetNotification>) {
        info!("remote engine dispatch loop started");
        while let Some(notification) = notifications.recv().await {
            let url = match &notification {
                TargetNotification::Created(info) | TargetNotification::InfoChanged(info) => {
                    info.url.clone()
                }
            };

            if !is_remote_candidate(&url) {
                continue;
            }

            let snapshot = self.patch_set.borrow().clone();
            if !snapshot.is_valid() {
                continue;
            }

            self.dispatch(&snapshot).await;
        }
        info!("remote engine dispatch loop ended: notification channel closed");
    }

    /// Re-enumerate targets and spawn a worker for every `(target, patch)`
    /// pair that should be patched and isn't already admitted.
    async fn dispatch(&self, patch_set: &PatchSet) {
        let targets = match list_targets(&self.debugger_base, &CdpConnectionOptions::default()).await {
            Ok(targets) => targets,
            Err(err) => {
                warn!(error = %err, "failed to re-enumerate targets");
                return;
            }
        };

        for target in targets {
            let Some(ws_url) = target.web_socket_debugger_url.clone() else {
                continue;
            };

            for patch in patch_set.remote_patches() {
                if !should_patch(patch, &target.url) {
                    continue;
                }
                if !self.patched.try_admit(&ws_url).await {
                    continue;
                }

                debug!(ws_url = %ws_url, target_url = %target.url, "admitting remote worker");
                let patched = self.patched.clone();
                let patch = patch.clone();
                let ws_url = ws_url.clone();
                tokio::spawn(async move {
                    run_worker(ws_url, patch, patched).await;
                });
            }
        }
    }
}

/// Whether a target's URL is even eligible to trigger a remote
/// re-enumeration: an `http(s)` URL that isn't the embedded UI's own
/// loopback page.
fn is_remote_candidate(url: &str) -> bool {
    url.starts_with("http") && !url.contains(LOOPBACK_HOST)
}

#[instrument(level = "info", skip(patch, patched), fields(ws_url = %ws_url))]
async fn run_worker(ws_url: String, patch: Patch, patched: Arc<PatchedSet>) {
    info!("remote worker starting");
    if let Err(err) = run_worker_inner(&ws_url, &patch).await {
        debug!(error = %err, "remote worker ended");
    }
    patched.remove(&ws_url).await;
    info!("remote worker exiting, target released");
}

async fn run_worker_inner(ws_url: &str, patch: &Patch) -> Result<(), CdpError> {
    let connection = CdpConnection::connect(ws_url).await?;

    connection
        .send_command::<_, serde_json::Value>(
            "Page.setBypassCSP",
            Some(SetBypassCspParams { enabled: true }),
            None,
        )
        .await?;
    connection
        .send_command::<_, serde_json::Value>("Page.enable", None::<()>, None)
        .await?;
    connection
        .send_command::<_, serde_json::Value>("Page.reload", Some(ReloadParams::default()), None)
        .await?;

    // Tracks whether this worker has ever completed a successful evaluation.
    // A CDP-level protocol error (distinct from a thrown JS exception) is
    // treated as transient before that point and permanent after it (§7
    // item 3) — the document may not be attachable yet on the first few
    // attempts, but a protocol error once the page is known-good signals
    // something actually wrong.
    let mut ever_succeeded = false;
    apply_with_retry(&connection, patch, &mut ever_succeeded).await?;

    let mut events = connection.subscribe_events();
    loop {
        match events.recv().await {
            Ok(event) => {
                if event.method == FRAME_RESIZED_EVENT {
                    continue;
                }
                apply_with_retry(&connection, patch, &mut ever_succeeded).await?;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "remote worker event subscriber lagged");
            }
            Err(broadcast::error::RecvError::Closed) => return Err(CdpError::TransportClosed),
        }
    }
}

/// Apply a patch's CSS then JS, retrying while the evaluator reports
/// [`EvalOutcome::Transient`] or the CDP call itself fails with a protocol
/// error before this worker's first success, up to [`MAX_RETRIES`].
async fn apply_with_retry(
    connection: &CdpConnection,
    patch: &Patch,
    ever_succeeded: &mut bool,
) -> Result<(), CdpError> {
    for attempt in 1..=MAX_RETRIES {
        match apply_patch_once(connection, patch).await {
            Ok(EvalOutcome::Success) => {
                *ever_succeeded = true;
                return Ok(());
            }
            Ok(EvalOutcome::Permanent(_)) => return Ok(()),
            Ok(EvalOutcome::Transient) => {
                trace!(attempt, "transient evaluation failure, retrying");
                continue;
            }
            Err(CdpError::Protocol { code, message }) if !*ever_succeeded => {
                trace!(attempt, code, message = %message, "CDP protocol error before first success, treating as transient");
                continue;
            }
            Err(err) => return Err(err),
        }
    }
    warn!(cap = MAX_RETRIES, "remote worker hit retry cap without success");
    Ok(())
}

async fn apply_patch_once(connection: &CdpConnection, patch: &Patch) -> Result<EvalOutcome, CdpError> {
    if let Some(css) = patch.css() {
        let outcome = evaluate_css(connection, None, css).await?;
        if !matches!(outcome, EvalOutcome::Success) {
            return Ok(outcome);
        }
    }
    if let Some(js) = patch.js() {
        return evaluate_js(connection, None, js).await;
    }
    Ok(EvalOutcome::Success)
}

#[cfg(test)]
mod tests;
