use super::*;

#[test]
fn test_local_scoped_patch_has_no_http_in_regex() {
    let patch = Patch::new(Regex::new("^Steam$").unwrap(), Some(".a{color:red}".into()), None).unwrap();
    assert!(patch.is_local_scoped());
    assert!(!patch.is_remote_scoped());
}

#[test]
fn test_remote_scoped_patch_detected_by_http_substring() {
    let patch = Patch::new(
        Regex::new(r"https://store\.example\.com/.*").unwrap(),
        None,
        Some("window.x=1".into()),
    )
    .unwrap();
    assert!(patch.is_remote_scoped());
    assert!(!patch.is_local_scoped());
}

#[test]
fn test_patch_requires_css_or_js() {
    let err = Patch::new(Regex::new("^Steam$").unwrap(), None, None).unwrap_err();
    assert!(matches!(err, EngineError::EmptyPatch { .. }));
}

#[test]
fn test_parse_patch_set_preserves_field_names() {
    let json = r#"{
        "Patches": [
            {"MatchRegexString": "^Steam$", "TargetCss": ".a{color:red}"},
            {"MatchRegexString": "https://store\\.example\\.com/.*", "TargetJs": "window.x=1"}
        ],
        "config_fail": false
    }"#;

    let set = parse_patch_set(json).unwrap();
    assert!(set.is_valid());
    assert_eq!(set.patches().len(), 2);
    assert_eq!(set.local_patches().count(), 1);
    assert_eq!(set.remote_patches().count(), 1);
}

#[test]
fn test_config_fail_yields_empty_invalid_set() {
    let json = r#"{"Patches": [{"MatchRegexString": "^x$", "TargetCss": "a"}], "config_fail": true}"#;
    let set = parse_patch_set(json).unwrap();
    assert!(!set.is_valid());
    assert!(set.patches().is_empty());
}

#[test]
fn test_invalid_regex_is_rejected() {
    let json = r#"{"Patches": [{"MatchRegexString": "(unclosed", "TargetCss": "a"}], "config_fail": false}"#;
    let err = parse_patch_set(json).unwrap_err();
    assert!(matches!(err, EngineError::InvalidPatchRegex { .. }));
}

#[test]
fn test_patch_with_neither_artifact_is_rejected_during_parse() {
    let json = r#"{"Patches": [{"MatchRegexString": "^x$"}], "config_fail": false}"#;
    let err = parse_patch_set(json).unwrap_err();
    assert!(matches!(err, EngineError::EmptyPatch { .. }));
}

#[test]
fn test_empty_invalid_patch_set_has_no_patches() {
    let set = PatchSet::empty_invalid();
    assert!(!set.is_valid());
    assert!(set.patches().is_empty());
}
