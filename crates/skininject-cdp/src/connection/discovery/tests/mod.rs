//! Tests for endpoint discovery.

use super::*;

#[test]
fn test_websocket_url_passthrough() {
    // WebSocket URLs should be returned as-is
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let options = CdpConnectionOptions::default();
        let result =
            discover_websocket_url("ws://localhost:9222/devtools/browser/abc123", &options).await;

        assert!(result.is_ok());
        assert_eq!(
            result.unwrap(),
            "ws://localhost:9222/devtools/browser/abc123"
        );
    });
}

#[test]
fn test_invalid_scheme() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let options = CdpConnectionOptions::default();
        let result = discover_websocket_url("ftp://localhost:9222", &options).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, CdpError::InvalidEndpointUrl(_)));
    });
}

#[test]
fn test_connection_options_builder() {
    let options = CdpConnectionOptions::new()
        .timeout(Duration::from_secs(10))
        .header("Authorization", "Bearer token")
        .header("X-Custom", "value");

    assert_eq!(options.timeout, Some(Duration::from_secs(10)));
    assert_eq!(
        options.headers.get("Authorization"),
        Some(&"Bearer token".to_string())
    );
    assert_eq!(options.headers.get("X-Custom"), Some(&"value".to_string()));
}

#[test]
fn test_target_listing_deserialization() {
    let json = r#"[{
        "id": "ABC123",
        "type": "page",
        "title": "Steam",
        "url": "https://steamloopback.host/",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/ABC123"
    }]"#;

    let targets: Vec<TargetListing> = serde_json::from_str(json).unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].id, "ABC123");
    assert_eq!(targets[0].target_type, "page");
    assert_eq!(targets[0].url, "https://steamloopback.host/");
    assert_eq!(
        targets[0].web_socket_debugger_url.as_deref(),
        Some("ws://localhost:9222/devtools/page/ABC123")
    );
}

#[test]
fn test_target_listing_missing_websocket_url_is_none() {
    let json = r#"[{"id": "X", "type": "page", "title": "t", "url": "about:blank"}]"#;
    let targets: Vec<TargetListing> = serde_json::from_str(json).unwrap();
    assert!(targets[0].web_socket_debugger_url.is_none());
}

#[test]
fn test_list_targets_invalid_scheme() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let options = CdpConnectionOptions::default();
        let result = list_targets("ftp://localhost:9222", &options).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), CdpError::InvalidEndpointUrl(_)));
    });
}
