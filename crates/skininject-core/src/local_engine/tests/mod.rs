use super::*;

fn remote_object_with_value(value: serde_json::Value) -> RemoteObject {
    RemoteObject {
        object_type: "string".to_string(),
        subtype: None,
        class_name: None,
        value: Some(value),
        description: None,
        object_id: None,
    }
}

#[test]
fn test_parse_probe_result_from_stringified_json() {
    let remote = remote_object_with_value(serde_json::Value::String(
        r#"{"title":"Steam","url":"about:blank"}"#.to_string(),
    ));
    let probe = parse_probe_result(&remote).unwrap();
    assert_eq!(probe.title, "Steam");
    assert_eq!(probe.url, "about:blank");
}

#[test]
fn test_parse_probe_result_none_when_value_missing() {
    let remote = RemoteObject {
        object_type: "undefined".to_string(),
        subtype: None,
        class_name: None,
        value: None,
        description: None,
        object_id: None,
    };
    assert!(parse_probe_result(&remote).is_none());
}

#[test]
fn test_parse_probe_result_none_when_not_json() {
    let remote = remote_object_with_value(serde_json::Value::String("not json".to_string()));
    assert!(parse_probe_result(&remote).is_none());
}

#[test]
fn test_parse_probe_result_none_when_value_is_not_a_string() {
    let remote = remote_object_with_value(serde_json::json!({"title": "Steam"}));
    assert!(parse_probe_result(&remote).is_none());
}

#[test]
fn test_settings_modal_root_token_matches_expected_literal() {
    assert_eq!(SETTINGS_MODAL_ROOT_TOKEN, "settings_SettingsModalRoot_");
}

#[test]
fn test_target_notification_variants_carry_target_info() {
    let info = TargetInfo {
        target_id: "T1".to_string(),
        target_type: "page".to_string(),
        title: "Steam".to_string(),
        url: "about:blank".to_string(),
        attached: false,
        browser_context_id: None,
        opener_id: None,
    };

    let created = TargetNotification::Created(info.clone());
    match created {
        TargetNotification::Created(i) => assert_eq!(i.target_id, "T1"),
        TargetNotification::InfoChanged(_) => panic!("expected Created"),
    }

    let changed = TargetNotification::InfoChanged(info);
    match changed {
        TargetNotification::InfoChanged(i) => assert_eq!(i.target_id, "T1"),
        TargetNotification::Created(_) => panic!("expected InfoChanged"),
    }
}
