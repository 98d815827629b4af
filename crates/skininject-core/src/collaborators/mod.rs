//! External collaborator interfaces (§6).
//!
//! The injection engine is embedded in a larger application that owns the
//! HTTP asset server, the disk-based skin config loader, the file-change
//! watcher, and the IPC listener. None of that lives in this crate — the
//! engine only needs a patch set to read and a place to publish/read its own
//! lifecycle signals. Those surfaces are modeled here as narrow interfaces
//! rather than concrete dependencies.

use tokio::sync::watch;

use crate::patch::PatchSet;

/// Live feed of the current patch set.
///
/// The external config loader and file watcher own the write side; on every
/// skin reload they publish a fresh [`PatchSet`] (parsed via
/// [`crate::patch::parse_patch_set`]) to the sender half of this channel. The
/// supervisor holds the receiver and swaps its cell atomically on each
/// change (§4.6).
pub type PatchSetFeed = watch::Receiver<PatchSet>;

/// Opaque bootstrap script supplied by the host application.
///
/// Injected into the settings page session when the local engine observes
/// `settings_SettingsModalRoot_` in the document's `<html>` attributes
/// (§6). The engine never inspects or validates its contents.
pub trait HostBridgeProvider: Send + Sync {
    /// The JS source to evaluate into the settings page session.
    fn bootstrap_script(&self) -> &str;
}

/// A [`HostBridgeProvider`] that always returns the same fixed script.
///
/// The common case: the host application bundles one bootstrap script and
/// never changes it at runtime.
#[derive(Debug, Clone)]
pub struct StaticHostBridge {
    script: String,
}

impl StaticHostBridge {
    /// Wrap a fixed bootstrap script.
    #[must_use]
    pub fn new(script: impl Into<String>) -> Self {
        Self { script: script.into() }
    }
}

impl HostBridgeProvider for StaticHostBridge {
    fn bootstrap_script(&self) -> &str {
        &self.script
    }
}

#[cfg(test)]
mod tests;
