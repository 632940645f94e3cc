use pagelog::config::{Config, MapResolver, NotConfigured, Resolver};
use pagelog::FileNaming;
use std::fs;
use tempfile::TempDir;

#[test]
fn defaults_apply_when_keys_are_absent() {
    let config = Config::new(Box::new(MapResolver::new()));

    assert!(config.debug_mode());
    assert!(!config.enable_files());
    assert!(config.enable_terminal_output());
    assert!(!config.enable_database());
    assert_eq!(config.page_size(), 100);
    assert_eq!(config.delimiter(), ',');
    assert_eq!(config.prefix(), "pagelog");
    assert_eq!(config.file_naming(), FileNaming::Daily);
    assert_eq!(
        config.columns(),
        vec![
            "timestamp",
            "log_type",
            "process",
            "code_location",
            "message",
            "processing_time"
        ]
    );
}

#[test]
fn uppercase_key_is_found_via_case_fallback() {
    let config = Config::new(Box::new(MapResolver::new().with("LOG_PREFIX", "upper")));
    assert_eq!(config.prefix(), "upper");
}

#[test]
fn exact_case_wins_over_flipped_case() {
    let config = Config::new(Box::new(
        MapResolver::new()
            .with("log_prefix", "lower")
            .with("LOG_PREFIX", "upper"),
    ));
    assert_eq!(config.prefix(), "lower");
}

#[test]
fn boolean_spellings_normalize() {
    let config = Config::new(Box::new(
        MapResolver::new()
            .with("log_enable_files", "YES")
            .with("log_enable_terminal_output", "0")
            .with("log_enable_database", "on"),
    ));
    assert!(config.enable_files());
    assert!(!config.enable_terminal_output());
    assert!(config.enable_database());
}

#[test]
fn empty_sqlite_path_disables_the_store() {
    let config = Config::new(Box::new(MapResolver::new().with("log_sqlite3_path", "")));
    assert!(config.sqlite_path().is_none());
}

#[test]
fn invalid_page_size_falls_back_to_default() {
    let config = Config::new(Box::new(MapResolver::new().with("log_page_size", "0")));
    assert_eq!(config.page_size(), 100);

    let config = Config::new(Box::new(MapResolver::new().with("log_page_size", "nope")));
    assert_eq!(config.page_size(), 100);
}

#[test]
fn not_configured_source_pins_defaults() {
    struct Missing;
    impl Resolver for Missing {
        fn get(&self, _key: &str) -> Result<Option<String>, NotConfigured> {
            Err(NotConfigured)
        }
    }

    let config = Config::new(Box::new(Missing));
    assert_eq!(config.prefix(), "pagelog");
    // Pinned now; later lookups use defaults without re-probing the source
    assert_eq!(config.page_size(), 100);
    assert!(config.debug_mode());
}

#[test]
fn toml_file_backs_the_resolver() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("pagelog.toml");
    fs::write(
        &path,
        r#"
log_prefix = "app"
log_page_size = 25
log_enable_files = true
log_file_naming = "per_run"
log_columns = ["timestamp", "message"]
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.prefix(), "app");
    assert_eq!(config.page_size(), 25);
    assert!(config.enable_files());
    assert_eq!(config.file_naming(), FileNaming::PerRun);
    assert_eq!(config.columns(), vec!["timestamp", "message"]);
}

#[test]
fn missing_toml_file_means_defaults() {
    let tmp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&tmp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.prefix(), "pagelog");
}

#[test]
fn broken_toml_is_a_parse_error() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("pagelog.toml");
    fs::write(&path, "log_prefix = [unclosed").unwrap();
    assert!(Config::load_from(&path).is_err());
}
