use super::*;
use crate::patch::{parse_patch_set, PatchSet};

fn set(json: &str) -> PatchSet {
    parse_patch_set(json).unwrap()
}

#[test]
fn test_title_match_is_anchored_both_ends() {
    let patches = set(r#"{"Patches":[{"MatchRegexString":"^foo$","TargetCss":"a"}],"config_fail":false}"#);
    assert_eq!(match_title(&patches, "foo").len(), 1);
    assert_eq!(match_title(&patches, "foobar").len(), 0);
}

#[test]
fn test_title_match_full_match_without_explicit_anchors() {
    let patches = set(r#"{"Patches":[{"MatchRegexString":"foo","TargetCss":"a"}],"config_fail":false}"#);
    assert_eq!(match_title(&patches, "foo").len(), 1);
    assert_eq!(match_title(&patches, "foobar").len(), 0);
}

#[test]
fn test_title_match_alternation_prefers_longer_full_match_branch() {
    // A leftmost-first `find` on "foo|foobar" against "foobar" would stop at
    // "foo" (start=0, end=3) and miss the full string; full-match semantics
    // must try every branch until one consumes the whole key.
    let patches = set(r#"{"Patches":[{"MatchRegexString":"foo|foobar","TargetCss":"a"}],"config_fail":false}"#);
    assert_eq!(match_title(&patches, "foobar").len(), 1);
    assert_eq!(match_title(&patches, "foo").len(), 1);
    assert_eq!(match_title(&patches, "foobarbaz").len(), 0);
}

#[test]
fn test_url_match_excludes_remote_patches_from_title_context() {
    let patches = set(
        r#"{"Patches":[{"MatchRegexString":"https://store\\.example\\.com/.*","TargetJs":"1"}],"config_fail":false}"#,
    );
    assert_eq!(match_title(&patches, "https://store.example.com/app/1").len(), 0);
    assert_eq!(match_url(&patches, "https://store.example.com/app/1").len(), 1);
}

#[test]
fn test_url_match_excludes_loopback() {
    let patches = set(
        r#"{"Patches":[{"MatchRegexString":"https://store\\.example\\.com/.*","TargetJs":"1"}],"config_fail":false}"#,
    );
    assert_eq!(
        match_url(&patches, "https://store.example.com/steamloopback.host/x").len(),
        0
    );
}

#[test]
fn test_attrs_match_is_substring_of_regex_source() {
    let patches = set(
        r#"{"Patches":[{"MatchRegexString":"settings_SettingsModalRoot_","TargetJs":"1"}],"config_fail":false}"#,
    );
    let attrs = r#"class="settings_SettingsModalRoot_abc123 foo""#;
    assert_eq!(match_attrs(&patches, attrs).len(), 1);
}

#[test]
fn test_attrs_match_does_not_apply_to_title() {
    let patches = set(
        r#"{"Patches":[{"MatchRegexString":"settings_SettingsModalRoot_","TargetJs":"1"}],"config_fail":false}"#,
    );
    // Title is fully-matched, not substring-matched, so an exact-token title does not match.
    assert_eq!(match_title(&patches, "settings_SettingsModalRoot_").len(), 1);
    assert_eq!(match_title(&patches, "prefix settings_SettingsModalRoot_ suffix").len(), 0);
}

#[test]
fn test_should_patch_rejects_local_scoped_patch() {
    let patches = set(r#"{"Patches":[{"MatchRegexString":"^foo$","TargetCss":"a"}],"config_fail":false}"#);
    let patch = &patches.patches()[0];
    assert!(!should_patch(patch, "https://example.com/"));
}

#[test]
fn test_should_patch_rejects_loopback() {
    let patches = set(
        r#"{"Patches":[{"MatchRegexString":"https://.*","TargetJs":"1"}],"config_fail":false}"#,
    );
    let patch = &patches.patches()[0];
    assert!(!should_patch(patch, "https://steamloopback.host/x"));
}

#[test]
fn test_should_patch_accepts_matching_remote_target() {
    let patches = set(
        r#"{"Patches":[{"MatchRegexString":"https://store\\.example\\.com/.*","TargetJs":"1"}],"config_fail":false}"#,
    );
    let patch = &patches.patches()[0];
    assert!(should_patch(patch, "https://store.example.com/app/1"));
}
