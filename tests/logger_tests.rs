//! Integration tests for logger behavior.

use gradebook::get_version;
use gradebook::logger::{set_level, set_level_from_str, Level};
use gradebook::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_parent_dirs() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("logs").join("gradebook.log");
    assert!(gradebook::logger::init_file_logging(&path));
    error!("written to file");
    gradebook::logger::close_file_logging();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[ERROR] written to file"));
}

#[test]
fn version_is_not_empty() {
    assert!(!get_version().trim().is_empty());
}
