use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn persona() -> Command {
    let mut cmd = Command::cargo_bin("persona").unwrap();
    cmd.args(["--log-level", "off"]);
    cmd
}

#[test]
fn scope_prints_reference_transcript() {
    let expected = "\
Person object instantiated without names or birth year
Person object instantiated: Sponge Bob, year of birth 1999
Person previously known as   is now Mickey Mouse
Person Mickey Mouse, born in 0 is now born in 1928
Person object instantiated: Scooby Doo, year of birth 1969
Person Scooby Doo born in 1969 goes out of scope
Could not set the birth year to 1800
Person Sponge Bob born in 1999 goes out of scope
Person Mickey Mouse born in 1928 goes out of scope
";
    persona().arg("scope").assert().success().stdout(expected);
}

#[test]
fn global_tears_down_after_main_ends() {
    persona()
        .arg("global")
        .assert()
        .success()
        .stdout("Test object instantiated\nMain ends\nTest object destroyed\n");
}

#[test]
fn local_tears_down_before_main_ends() {
    persona().arg("local").assert().success().stdout(
        "Main starts\nFunc starts\nTest object instantiated\nFunc ends\nTest object destroyed\nMain ends\n",
    );
}

#[test]
fn json_format_emits_one_object_per_line() {
    let output = persona().args(["scope", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let rows: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0]["event"], "instantiated");
    assert_eq!(rows[6]["event"], "note");
    assert_eq!(rows[8]["snapshot"]["name"]["first"], "Mickey");
}

#[test]
fn events_flag_filters_kinds() {
    persona()
        .args(["scope", "--events", "year_changed"])
        .assert()
        .success()
        .stdout(
            "Person Mickey Mouse, born in 0 is now born in 1928\nCould not set the birth year to 1800\n",
        );
}

#[test]
fn config_file_selects_format_and_events() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[logger]\nlevel = \"off\"\n\n[transcript]\nevents = [\"dropped\"]").unwrap();

    Command::cargo_bin("persona")
        .unwrap()
        .arg("scope")
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Person Scooby Doo born in 1969 goes out of scope\n"))
        .stdout(predicate::str::contains("instantiated").not());
}

#[test]
fn environment_overrides_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[logger]\nlevel = \"trace\"\n\n[transcript]\nevents = [\"created\"]").unwrap();

    Command::cargo_bin("persona")
        .unwrap()
        .env_remove("RUST_LOG")
        .env("PERSONA__LOGGER__LEVEL", "off")
        .env("PERSONA__TRANSCRIPT__EVENTS", "dropped")
        .args(["scope", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stderr("")
        .stdout(
            "Person Scooby Doo born in 1969 goes out of scope\n\
             Could not set the birth year to 1800\n\
             Person Sponge Bob born in 1999 goes out of scope\n\
             Person Mickey Mouse born in 1928 goes out of scope\n",
        );
}

#[test]
fn environment_max_files_reaches_logger() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[logger]\nlevel = \"off\"\nconsole = false\nmax_files = 5\npath = {:?}",
        dir.path().join("logs").display().to_string()
    )
    .unwrap();

    Command::cargo_bin("persona")
        .unwrap()
        .env("PERSONA__LOGGER__MAX_FILES", "0")
        .args(["local", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_files must be greater than zero"));
}

#[test]
fn missing_config_file_fails() {
    persona()
        .args(["scope", "--config", "/nonexistent/persona.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}

#[test]
fn diagnostics_stay_off_stdout() {
    Command::cargo_bin("persona")
        .unwrap()
        .args(["global", "--log-level", "info"])
        .assert()
        .success()
        .stdout("Test object instantiated\nMain ends\nTest object destroyed\n");
}

#[test]
fn no_arguments_prints_help() {
    Command::cargo_bin("persona")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
