//! Engine-level error types.

use thiserror::Error;

/// Errors surfaced by the injection engine.
///
/// Per-target and per-worker faults never reach this type — they are logged and
/// handled at their own layer (see the evaluator's transient/permanent
/// classification). This type exists for failures an engine cannot recover from
/// on its own.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The browser-wide CDP socket closed. The local engine cannot continue
    /// without it; the supervisor decides whether to restart.
    #[error("local engine transport closed: {0}")]
    LocalTransportClosed(#[source] skininject_cdp::CdpError),

    /// Discovering the browser's debugger endpoint failed.
    #[error("failed to discover browser endpoint: {0}")]
    Discovery(#[source] skininject_cdp::CdpError),

    /// A CDP call the engine depends on for correctness failed outright
    /// (distinct from a JS evaluation exception, which is not an error here).
    #[error("CDP call failed: {0}")]
    Cdp(#[source] skininject_cdp::CdpError),

    /// The patch-set source could not be read.
    #[error("failed to load patch set: {0}")]
    PatchSetSource(String),

    /// A patch's `MatchRegexString` failed to compile.
    #[error("invalid patch regex {pattern:?}: {source}")]
    InvalidPatchRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A patch had neither `TargetCss` nor `TargetJs` set.
    #[error("patch {pattern:?} has neither TargetCss nor TargetJs")]
    EmptyPatch { pattern: String },
}

#[cfg(test)]
mod tests;
