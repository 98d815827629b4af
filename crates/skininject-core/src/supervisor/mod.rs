//! Supervisor (C6): owns the patch-set cell and keeps the Local Engine alive
//! across the Remote Engine's lifetime (§4.6).
//!
//! The host application owns the HTTP server, file watcher, and IPC
//! listener; this only supervises the two CDP-facing engines and the single
//! piece of mutable state they share, the current [`PatchSet`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tracing::{error, info, instrument};

use crate::collaborators::{HostBridgeProvider, PatchSetFeed};
use crate::error::EngineError;
use crate::local_engine::{LocalEngine, TargetNotification};
use crate::patch::PatchSet;
use crate::remote_engine::RemoteEngine;

/// Channel capacity for Local Engine -> Remote Engine target notifications.
const NOTIFICATION_CHANNEL_SIZE: usize = 256;

/// Delay before reconnecting the Local Engine after a crash.
const RESTART_BACKOFF: Duration = Duration::from_secs(2);

/// Owns the mutable patch-set cell and supervises the Local and Remote Engines.
pub struct Supervisor {
    debugger_base: String,
    host_bridge: Arc<dyn HostBridgeProvider>,
    patch_set_tx: watch::Sender<PatchSet>,
    patch_set_rx: PatchSetFeed,
}

impl Supervisor {
    /// Build a supervisor against the browser's discovery endpoint, with no
    /// patch set loaded yet (`PatchSet::empty_invalid`).
    #[must_use]
    pub fn new(debugger_base: impl Into<String>, host_bridge: Arc<dyn HostBridgeProvider>) -> Self {
        let (patch_set_tx, patch_set_rx) = watch::channel(PatchSet::empty_invalid());
        Self {
            debugger_base: debugger_base.into(),
            host_bridge,
            patch_set_tx,
            patch_set_rx,
        }
    }

    /// Publish a freshly loaded patch set. Both engines observe it on their
    /// next match attempt; in-flight work is unaffected.
    pub fn reload_patch_set(&self, patch_set: PatchSet) {
        let _ = self.patch_set_tx.send(patch_set);
    }

    /// Run the supervised engines until `shutdown` is set to `true`.
    ///
    /// The Local Engine is restarted on any crash, after [`RESTART_BACKOFF`];
    /// a crash never brings the whole process down. The Remote Engine runs
    /// for the lifetime of this call and exits once the notification channel
    /// closes.
    #[instrument(level = "info", skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let (notif_tx, notif_rx) = mpsc::channel(NOTIFICATION_CHANNEL_SIZE);
        let remote = RemoteEngine::new(self.debugger_base.clone(), self.patch_set_rx.clone());

        let remote_task = tokio::spawn(async move {
            remote.run(notif_rx).await;
        });

        while !*shutdown.borrow() {
            match self.run_local_once(notif_tx.clone(), &mut shutdown).await {
                Ok(()) => break,
                Err(err) => {
                    error!(error = %err, "local engine crashed, restarting");
                    sleep(RESTART_BACKOFF).await;
                }
            }
        }

        drop(notif_tx);
        let _ = remote_task.await;
        info!("supervisor stopped");
    }

    /// Connect and run the Local Engine until it errors or shutdown fires.
    async fn run_local_once(
        &self,
        notifications: mpsc::Sender<TargetNotification>,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<(), EngineError> {
        let engine = LocalEngine::connect(
            &self.debugger_base,
            self.patch_set_rx.clone(),
            self.host_bridge.clone(),
            notifications,
        )
        .await?;

        info!("local engine connected");
        tokio::select! {
            result = engine.run() => result,
            _ = shutdown.changed() => {
                info!("shutdown requested, leaving local engine");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests;
