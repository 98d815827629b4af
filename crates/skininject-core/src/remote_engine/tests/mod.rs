use super::*;

#[tokio::test]
async fn test_patched_set_admits_once() {
    let set = PatchedSet::new();
    assert!(set.try_admit("ws://127.0.0.1:9222/devtools/page/1").await);
    assert!(!set.try_admit("ws://127.0.0.1:9222/devtools/page/1").await);
    assert!(set.contains("ws://127.0.0.1:9222/devtools/page/1").await);
}

#[tokio::test]
async fn test_patched_set_remove_allows_readmission() {
    let set = PatchedSet::new();
    let url = "ws://127.0.0.1:9222/devtools/page/1";
    assert!(set.try_admit(url).await);
    set.remove(url).await;
    assert!(!set.contains(url).await);
    assert!(set.try_admit(url).await);
}

#[test]
fn test_is_remote_candidate_requires_http_scheme() {
    assert!(is_remote_candidate("https://store.steampowered.com/"));
    assert!(is_remote_candidate("http://example.com/"));
    assert!(!is_remote_candidate("about:blank"));
    assert!(!is_remote_candidate("chrome-error://chromewebdata/"));
}

#[test]
fn test_is_remote_candidate_excludes_loopback() {
    assert!(!is_remote_candidate("https://steamloopback.host/settings"));
}

#[tokio::test]
async fn test_remote_engine_run_exits_when_notifications_channel_closes() {
    let (_patch_tx, patch_rx) = tokio::sync::watch::channel(PatchSet::empty_invalid());
    let (notif_tx, notif_rx) = mpsc::channel(1);
    let engine = RemoteEngine::new("http://127.0.0.1:1", patch_rx);

    drop(notif_tx);
    engine.run(notif_rx).await;
}
