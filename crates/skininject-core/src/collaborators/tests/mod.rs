use super::*;

#[test]
fn test_static_host_bridge_returns_fixed_script() {
    let bridge = StaticHostBridge::new("window.__bridge = {};");
    assert_eq!(bridge.bootstrap_script(), "window.__bridge = {};");
}

#[test]
fn test_patch_set_feed_observes_updates() {
    let (tx, mut rx): (watch::Sender<PatchSet>, PatchSetFeed) =
        watch::channel(PatchSet::empty_invalid());
    assert!(!rx.borrow().is_valid());

    tx.send(PatchSet::new(Vec::new(), true)).unwrap();
    assert!(rx.borrow().is_valid());
}
