use super::*;

#[test]
fn test_patch_set_source_error_display() {
    let err = EngineError::PatchSetSource("unexpected EOF".to_string());
    assert_eq!(err.to_string(), "failed to load patch set: unexpected EOF");
}

#[test]
fn test_invalid_patch_regex_error_display() {
    let source = regex::Regex::new("(").unwrap_err();
    let err = EngineError::InvalidPatchRegex {
        pattern: "(".to_string(),
        source,
    };
    assert!(err.to_string().starts_with("invalid patch regex \"(\": "));
}

#[test]
fn test_empty_patch_error_display() {
    let err = EngineError::EmptyPatch {
        pattern: "^Steam$".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "patch \"^Steam$\" has neither TargetCss nor TargetJs"
    );
}

#[test]
fn test_local_transport_closed_wraps_cdp_error() {
    let err = EngineError::LocalTransportClosed(skininject_cdp::CdpError::TransportClosed);
    assert_eq!(
        err.to_string(),
        "local engine transport closed: CDP transport closed by peer"
    );
}
