use persona_kernel::prelude::*;
use std::io::Write;

fn write_config(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
fn loads_toml_and_keeps_defaults_for_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        "persona.toml",
        r#"
        [logger]
        level = "debug"
        json = true

        [transcript]
        format = "json"
        events = ["renamed", "year_changed"]
        "#,
    );

    let cfg: PersonaConfig = load_config(Some(&path)).unwrap();

    assert_eq!(cfg.logger.level, "debug");
    assert!(cfg.logger.json);
    assert_eq!(cfg.logger.name, "persona");
    assert_eq!(cfg.logger.max_files, 10);
    assert_eq!(cfg.transcript.format, TranscriptFormat::Json);
    assert_eq!(cfg.transcript.events, EventMask::RENAMED | EventMask::YEAR_CHANGED);
}

#[test]
fn loads_json_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        "persona.json",
        r#"{ "logger": { "name": "scenario", "console": false } }"#,
    );

    let cfg: PersonaConfig = load_config(Some(&path)).unwrap();

    assert_eq!(cfg.logger.name, "scenario");
    assert!(!cfg.logger.console);
    assert_eq!(cfg.transcript.events, EventMask::ALL);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result: Result<PersonaConfig, ConfigError> =
        load_config(Some(dir.path().join("absent.toml")));

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to build config"), "unexpected error: {err}");
}

#[test]
fn mistyped_values_fail_deserialization() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "persona.toml", "[transcript]\nformat = \"yaml\"\n");

    let result: Result<PersonaConfig, ConfigError> = load_config(Some(&path));

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to deserialize config"), "unexpected error: {err}");
}
