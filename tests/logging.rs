use std::{fs, thread::sleep, time::Duration};

use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn writes_log_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("padmenu.log");

    padmenu::logging::init(true, Some(path.clone()));
    tracing::info!(device = 1, "pad added");

    sleep(Duration::from_millis(100));

    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("pad added"));

    // a second initialisation keeps the first subscriber
    padmenu::logging::init(false, None);
    tracing::info!("still logging");
    sleep(Duration::from_millis(100));
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("still logging"));
}
