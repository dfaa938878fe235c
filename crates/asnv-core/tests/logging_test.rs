use std::fs;

use anyhow::Result;
use asnv_core::logging::config::LoggingConfig;
use asnv_core::logging::formatter::LogFormat;

#[test]
fn file_logging_writes_json_events_and_rejects_second_init() -> Result<()> {
    let tmp_dir = tempfile::tempdir()?;
    let log_path = tmp_dir.path().join("logs/asnv.log");

    asnv_core::init(LoggingConfig::new(
        "info".to_string(),
        Some(log_path.clone()),
        false,
        LogFormat::Json,
    ))?;

    tracing::error!(step = "preview", "validation service unreachable");

    let content = fs::read_to_string(&log_path)?;
    let line = content
        .lines()
        .find(|line| line.contains("validation service unreachable"))
        .expect("event should be written to the log file");
    let event: serde_json::Value = serde_json::from_str(line)?;
    assert_eq!(event["fields"]["step"], "preview");

    assert!(
        asnv_core::init_default().is_err(),
        "installing a second global subscriber must fail"
    );

    Ok(())
}
