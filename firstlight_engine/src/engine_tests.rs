//! Unit tests for the Engine logging hub
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! Tests that swap the logger are marked with #[serial].

use crate::firstlight::Engine;
use crate::firstlight::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures entries from the "firstlight::test" source
///
/// Unmarked tests in other modules may log concurrently; their entries are
/// ignored.
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source == "firstlight::test" {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

fn capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(TestLogger { entries: entries.clone() });
    entries
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_set_logger_receives_entries() {
    let entries = capture();

    Engine::log(LogSeverity::Info, "firstlight::test", "hello".to_string());

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Info);
    assert_eq!(entries[0].source, "firstlight::test");
    assert_eq!(entries[0].message, "hello");
    assert!(entries[0].file.is_none());
    drop(entries);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_carries_file_and_line() {
    let entries = capture();

    Engine::log_detailed(
        LogSeverity::Error,
        "firstlight::test",
        "boom".to_string(),
        "frame.rs",
        99,
    );

    let entries = entries.lock().unwrap();
    assert_eq!(entries[0].file, Some("frame.rs"));
    assert_eq!(entries[0].line, Some(99));
    drop(entries);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let entries = capture();

    crate::engine_trace!("firstlight::test", "t{}", 1);
    crate::engine_debug!("firstlight::test", "d{}", 2);
    crate::engine_info!("firstlight::test", "i{}", 3);
    crate::engine_warn!("firstlight::test", "w{}", 4);
    crate::engine_error!("firstlight::test", "e{}", 5);

    let entries = entries.lock().unwrap();
    let severities: Vec<LogSeverity> = entries.iter().map(|e| e.severity).collect();
    assert_eq!(
        severities,
        vec![
            LogSeverity::Trace,
            LogSeverity::Debug,
            LogSeverity::Info,
            LogSeverity::Warn,
            LogSeverity::Error,
        ]
    );
    assert_eq!(entries[4].message, "e5");
    assert!(entries[4].file.is_some(), "engine_error! must record file:line");
    drop(entries);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let entries = capture();
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "firstlight::test", "after reset".to_string());

    assert!(entries.lock().unwrap().is_empty());
}
