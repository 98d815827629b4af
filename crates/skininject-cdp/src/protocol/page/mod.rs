//! Page domain types.
//!
//! The Page domain provides actions related to the inspected page's lifecycle.
//! Only the handful of calls the remote engine needs are modeled here — this
//! is not a general Page domain binding.

use serde::{Deserialize, Serialize};

/// Parameters for Page.setBypassCSP.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBypassCspParams {
    /// Whether to bypass page CSP.
    pub enabled: bool,
}

/// Parameters for Page.reload.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReloadParams {
    /// If true, browser cache is ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_cache: Option<bool>,
}

/// Event method name for `Page.frameResized`.
///
/// Fires far more often than any real page-state transition; the remote
/// engine filters it out before deciding whether to re-evaluate patches.
pub const FRAME_RESIZED_EVENT: &str = "Page.frameResized";

#[cfg(test)]
mod tests;
