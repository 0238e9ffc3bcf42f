use persona_domain::config::LoggerSettings;
use persona_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn never_rotation_from_settings_writes_undated_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let settings = LoggerSettings {
        name: "integration-rotation".to_owned(),
        console: false,
        path: Some(log_dir.clone()),
        rotation: "never".to_owned(),
        max_files: 3,
        ..LoggerSettings::default()
    };
    let logger = Logger::from_settings(&settings)?;

    tracing::info!("rotation check");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let names: Vec<String> = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["integration-rotation.log".to_owned()]);

    let contents = fs::read_to_string(log_dir.join("integration-rotation.log"))?;
    assert!(contents.contains("rotation check"), "unexpected log contents: {contents}");

    Ok(())
}

#[test]
fn unknown_rotation_is_rejected() {
    let settings = LoggerSettings {
        name: "integration-rotation-invalid".to_owned(),
        path: Some(std::env::temp_dir().join("persona-never-created")),
        rotation: "fortnightly".to_owned(),
        ..LoggerSettings::default()
    };

    let err = Logger::from_settings(&settings).expect_err("unknown rotation should fail");
    assert!(err.to_string().contains("Invalid rotation 'fortnightly'"), "unexpected error: {err}");
}
