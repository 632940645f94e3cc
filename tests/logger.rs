use pagelog::{Error, LogEntry, LogType, Logger, MapResolver, Notifications, Notify};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn file_logger(dir: &Path, page_size: usize) -> Logger {
    Logger::builder()
        .resolver(
            MapResolver::new()
                .with("log_path", dir.to_string_lossy())
                .with("log_prefix", "app")
                .with("log_enable_files", "true")
                .with("log_enable_terminal_output", "false")
                .with("log_page_size", page_size.to_string()),
        )
        .build()
}

#[test]
fn appended_entries_round_trip_through_pages() {
    let tmp = TempDir::new().unwrap();
    let logger = file_logger(tmp.path(), 50);

    let total = 250;
    for i in 0..total {
        logger.log(&format!("entry number {i}"));
    }

    assert_eq!(logger.total_pages(None).unwrap(), 5);

    let mut seen = Vec::new();
    for page_num in 1..=5 {
        let table = logger.page(page_num).unwrap();
        assert_eq!(table.len(), 50);
        let msg_idx = table.column_index("message").unwrap();
        seen.extend(table.rows.iter().map(|r| r[msg_idx].clone()));
    }

    // Exactly N entries, in write order, no duplication or loss
    assert_eq!(seen.len(), total);
    for (i, msg) in seen.iter().enumerate() {
        assert_eq!(msg, &format!("entry number {i}"));
    }

    assert!(matches!(logger.page(6), Err(Error::InvalidArgument(_))));
}

#[test]
fn awkward_characters_survive_the_file_round_trip() {
    let tmp = TempDir::new().unwrap();
    let logger = file_logger(tmp.path(), 10);

    let messages = [
        "plain",
        "comma, separated, values",
        "it's quoted",
        "multi\nline\ntext",
        "all of it: 'a,b'\nand more",
    ];
    for msg in &messages {
        logger.log(msg);
    }

    let table = logger.page(1).unwrap();
    assert_eq!(table.len(), messages.len());
    let msg_idx = table.column_index("message").unwrap();
    for (row, expected) in table.rows.iter().zip(&messages) {
        assert_eq!(row[msg_idx], *expected);
    }
}

#[test]
fn disabled_debug_mode_makes_log_a_no_op() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .resolver(
            MapResolver::new()
                .with("log_debug_mode", "false")
                .with("log_path", tmp.path().to_string_lossy())
                .with("log_enable_files", "true")
                .with("log_enable_terminal_output", "false"),
        )
        .build();

    logger.log("should vanish");
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn disabled_file_sink_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .resolver(
            MapResolver::new()
                .with("log_path", tmp.path().to_string_lossy())
                .with("log_enable_files", "false")
                .with("log_enable_terminal_output", "false"),
        )
        .build();

    logger.log("terminal and files both off");
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn entries_carry_classification_and_call_site() {
    let tmp = TempDir::new().unwrap();
    let logger = file_logger(tmp.path(), 10);

    logger.log("Connection failed: missing token");
    logger.log("User login succeeded");

    let table = logger.page(1).unwrap();
    let type_idx = table.column_index("log_type").unwrap();
    let loc_idx = table.column_index("code_location").unwrap();
    assert_eq!(table.rows[0][type_idx], "error");
    assert_eq!(table.rows[1][type_idx], "message");
    // Call site resolves to this test file
    assert!(table.rows[0][loc_idx].starts_with("logger.rs:"));
}

#[test]
fn processing_time_starts_at_zero_and_stays_non_negative() {
    let tmp = TempDir::new().unwrap();
    let logger = file_logger(tmp.path(), 10);

    logger.log("first");
    logger.log("second");

    let table = logger.page(1).unwrap();
    let pt_idx = table.column_index("processing_time").unwrap();
    assert_eq!(table.rows[0][pt_idx], "0");
    let elapsed: f64 = table.rows[1][pt_idx].parse().unwrap();
    assert!(elapsed >= 0.0);
}

#[test]
fn per_run_naming_appends_to_one_file() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .resolver(
            MapResolver::new()
                .with("log_path", tmp.path().to_string_lossy())
                .with("log_enable_files", "true")
                .with("log_enable_terminal_output", "false")
                .with("log_file_naming", "per_run"),
        )
        .build();

    logger.log("one");
    logger.log("two");
    logger.log("three");

    let files: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
    assert_eq!(files.len(), 1);

    // Header plus three rows
    let content = fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
    assert_eq!(content.lines().count(), 4);
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    chats: Arc<Mutex<Vec<String>>>,
    webhooks: Arc<Mutex<Vec<String>>>,
}

impl Notify for RecordingNotifier {
    fn send_chat(&self, text: &str) -> Result<(), Error> {
        self.chats.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn post_webhook(&self, url: &str, _entry: &LogEntry) -> Result<(), Error> {
        self.webhooks.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[test]
fn notification_fan_out_respects_flags_and_configured_urls() {
    let tmp = TempDir::new().unwrap();
    let notifier = RecordingNotifier::default();
    let logger = Logger::builder()
        .resolver(
            MapResolver::new()
                .with("log_path", tmp.path().to_string_lossy())
                .with("log_enable_terminal_output", "false")
                .with("log_notification_slack", "https://hooks.example/slack")
                .with("log_notification_url", ""),
        )
        .notifier(notifier.clone())
        .build();

    logger.log("no flags, no notifications");
    logger.log_with(
        "failed again",
        Notifications {
            telegram: true,
            slack: true,
            webhook: true, // URL empty: must not fire
        },
    );

    let chats = notifier.chats.lock().unwrap();
    assert_eq!(chats.len(), 1);
    assert!(chats[0].contains("failed again"));

    let webhooks = notifier.webhooks.lock().unwrap();
    assert_eq!(webhooks.as_slice(), ["https://hooks.example/slack"]);
}

#[test]
fn webhook_payload_serializes_every_field() {
    let entry = LogEntry {
        process: "app".to_string(),
        timestamp: "20240102030405".to_string(),
        log_type: LogType::Error,
        message: "Connection failed".to_string(),
        code_location: "main.rs:10".to_string(),
        processing_time: "0.25".to_string(),
    };

    let payload = serde_json::to_value(&entry).unwrap();
    assert_eq!(payload["process"], "app");
    assert_eq!(payload["timestamp"], "20240102030405");
    assert_eq!(payload["log_type"], "error");
    assert_eq!(payload["message"], "Connection failed");
    assert_eq!(payload["code_location"], "main.rs:10");
    assert_eq!(payload["processing_time"], "0.25");
}

#[test]
fn failing_sinks_never_reach_the_caller() {
    // An unwritable log_path makes every file append fail
    let logger = Logger::builder()
        .resolver(
            MapResolver::new()
                .with("log_path", "/proc/no-such-dir/logs")
                .with("log_enable_files", "true")
                .with("log_enable_terminal_output", "false"),
        )
        .build();

    // Must not panic or propagate the I/O error
    logger.log("write into the void");
}

#[test]
fn reset_session_releases_the_per_run_path() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .resolver(
            MapResolver::new()
                .with("log_path", tmp.path().to_string_lossy())
                .with("log_enable_files", "true")
                .with("log_enable_terminal_output", "false")
                .with("log_file_naming", "per_run")
                .with(
                    "log_file_name_convention",
                    "YYYY_MM_DD_HH_MM_SS-[process].log",
                ),
        )
        .build();

    logger.log("before reset");
    logger.reset_session();
    logger.log("after reset");

    // Two runs may still collide on the same second; the file count is 1 or 2,
    // but the session cache itself must have been cleared
    assert!(fs::read_dir(tmp.path()).unwrap().count() >= 1);
}
