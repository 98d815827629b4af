use std::sync::Arc;

use tokio::sync::watch;

use super::*;
use crate::collaborators::StaticHostBridge;
use crate::patch::PatchSet;

#[test]
fn test_reload_patch_set_propagates_to_receiver() {
    let supervisor = Supervisor::new(
        "http://127.0.0.1:9222",
        Arc::new(StaticHostBridge::new("")),
    );
    assert!(!supervisor.patch_set_rx.borrow().is_valid());

    supervisor.reload_patch_set(PatchSet::new(Vec::new(), true));
    assert!(supervisor.patch_set_rx.borrow().is_valid());
}

#[tokio::test]
async fn test_run_exits_immediately_when_shutdown_already_set() {
    let supervisor = Supervisor::new(
        "http://127.0.0.1:9222",
        Arc::new(StaticHostBridge::new("")),
    );
    let (_tx, rx) = watch::channel(true);

    tokio::time::timeout(std::time::Duration::from_secs(2), supervisor.run(rx))
        .await
        .expect("supervisor.run should return promptly when shutdown is already set");
}
