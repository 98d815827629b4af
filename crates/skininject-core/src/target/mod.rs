//! Target and session data model (§3), shared by both engines.

use skininject_cdp::protocol::target_domain::TargetInfo;

/// A Chromium-addressable target as tracked by the local engine.
///
/// Created on `Target.targetCreated`, mutated on `Target.targetInfoChanged`,
/// discarded when the target is destroyed.
#[derive(Debug, Clone)]
pub struct TargetDescriptor {
    pub target_id: String,
    pub session_id: Option<String>,
    pub url: String,
    pub title: String,
    pub attached: bool,
    pub web_socket_debugger_url: Option<String>,
}

impl TargetDescriptor {
    /// Build a descriptor from a freshly observed `TargetInfo`.
    #[must_use]
    pub fn from_target_info(info: &TargetInfo) -> Self {
        Self {
            target_id: info.target_id.clone(),
            session_id: None,
            url: info.url.clone(),
            title: info.title.clone(),
            attached: info.attached,
            web_socket_debugger_url: None,
        }
    }

    /// Apply a `Target.targetInfoChanged` update in place.
    pub fn apply_target_info(&mut self, info: &TargetInfo) {
        self.url.clone_from(&info.url);
        self.title.clone_from(&info.title);
        self.attached = info.attached;
    }

    /// The active session ID, if attached.
    #[must_use]
    pub fn session(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}

/// Well-known request IDs reserved for the local engine's own request kinds.
///
/// Responses are routed back into the target state machine by these IDs.
/// IDs the evaluator allocates for ad hoc calls come from a disjoint,
/// monotonic range starting at [`FIRST_DYNAMIC`] so the two ID spaces never
/// collide on a shared socket (§9).
pub mod request_id {
    /// Reply to `Target.attachToTarget`; extracts `sessionId`.
    pub const ATTACHED_TO_TARGET: u64 = 1;
    /// Reply to the title/url probe; extracts `title` and triggers title
    /// patching plus a `DOM.getDocument` request.
    pub const RECEIVED_CEF_DETAILS: u64 = 2;
    /// Reply to `DOM.getDocument`; extracts the `<html>` attribute string.
    pub const GET_DOCUMENT: u64 = 3;
    /// First ID available for evaluator-allocated and other dynamic calls.
    pub const FIRST_DYNAMIC: u64 = 1000;
}

/// Per-target state machine states driven by the local engine (§4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetState {
    /// Not yet observed, or torn down after detach/EOF.
    Untracked,
    /// `Target.targetCreated` seen; attach not yet requested.
    Discovered,
    /// `Target.attachToTarget` sent, awaiting response.
    Attaching,
    /// Attached with the given session; awaiting `targetInfoChanged(attached=true)`.
    Attached { session_id: String },
    /// Title/url probe sent, awaiting `received_cef_details` response.
    Probing { session_id: String },
    /// Title known and title-context patching applied; `DOM.getDocument` sent.
    Titled { session_id: String, title: String },
    /// Document fetched and attribute-context patching applied.
    Documented { session_id: String, title: String },
    /// Steady state: both patching passes complete for this attachment.
    Steady { session_id: String },
}

impl TargetState {
    /// The session ID associated with this state, if any.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::Untracked | Self::Discovered | Self::Attaching => None,
            Self::Attached { session_id }
            | Self::Probing { session_id }
            | Self::Titled { session_id, .. }
            | Self::Documented { session_id, .. }
            | Self::Steady { session_id } => Some(session_id),
        }
    }
}
