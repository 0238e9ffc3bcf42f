use persona_logger::{LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn file_logging_writes_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("integration-file-logging")
        .console(false)
        .path(&log_dir)
        .json()
        .level(LevelFilter::INFO)
        .init()?;

    tracing::info!(target: "persona::lifecycle", "Person object instantiated without names or birth year");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let first = contents.lines().next().expect("log file should not be empty");
    let record: serde_json::Value = serde_json::from_str(first)?;
    assert_eq!(record["target"], "persona::lifecycle");
    assert_eq!(
        record["fields"]["message"],
        "Person object instantiated without names or birth year"
    );

    Ok(())
}
