use super::*;

#[test]
fn test_set_bypass_csp_params_serialization() {
    let params = SetBypassCspParams { enabled: true };
    let json = serde_json::to_string(&params).unwrap();
    assert_eq!(json, r#"{"enabled":true}"#);
}

#[test]
fn test_reload_params_default_omits_ignore_cache() {
    let params = ReloadParams::default();
    let json = serde_json::to_string(&params).unwrap();
    assert_eq!(json, r#"{}"#);
}

#[test]
fn test_frame_resized_event_constant() {
    assert_eq!(FRAME_RESIZED_EVENT, "Page.frameResized");
}
