// Integration tests for the `staffboard` binary against the engine fixtures.
// Run with: cargo test -p staffboard-cli --test cli_tests

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../engine/tests/fixtures")
}

/// Isolated HOME so no real settings file is picked up.
struct Env {
    home: TempDir,
}

impl Env {
    fn new() -> Self {
        Self { home: tempfile::tempdir().unwrap() }
    }

    fn path(&self) -> &Path {
        self.home.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_staffboard"));
        cmd.current_dir(env!("CARGO_MANIFEST_DIR"))
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("STAFFBOARD_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run a dashboard command against the fixture directory.
    fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("--data-dir")
            .arg(fixtures_dir())
            .args(args)
            .output()
            .expect("run staffboard")
    }
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "exit {:?}, stderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

// ---------------------------------------------------------------------------
// summary
// ---------------------------------------------------------------------------

#[test]
fn summary_json_reports_metrics_and_sources() {
    let env = Env::new();
    let json = stdout_json(&env.run(&["summary", "--json"]));

    assert_eq!(json["metrics"]["hostsConfirmedPct"], 50);
    assert_eq!(json["metrics"]["guestsConfirmedPct"], 67);
    assert_eq!(json["metrics"]["matchesMade"], 1);
    assert_eq!(json["metrics"]["openIncidents"], 2);
    assert_eq!(json["sources"].as_array().unwrap().len(), 5);
}

#[test]
fn summary_table() {
    let env = Env::new();
    let output = env.run(&["summary"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hosts confirmed   50%"), "{stdout}");
    assert!(stdout.contains("Sources loaded    5/5"), "{stdout}");
}

// ---------------------------------------------------------------------------
// rows
// ---------------------------------------------------------------------------

#[test]
fn rows_filters_guests() {
    let env = Env::new();
    let json = stdout_json(&env.run(&["rows", "--class", "guests", "--access", "wheelchair", "--json"]));

    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["g1", "g3"]);
}

#[test]
fn rows_csv_output() {
    let env = Env::new();
    let output = env.run(&["rows", "--search", "PARK", "--csv"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "id,name,gender_comfort,allergies,accessibility,confirmed,room_building,room_number\n\
         h3,Lee Park,male,peanuts,elevator,no,South,12\n"
    );
}

#[test]
fn rows_rejects_unknown_filter_value() {
    let env = Env::new();
    let output = env.run(&["rows", "--allergy", "shellfish"]);
    assert_eq!(output.status.code(), Some(2));
}

// ---------------------------------------------------------------------------
// suggest / confirm
// ---------------------------------------------------------------------------

#[test]
fn suggest_ranks_and_limits() {
    let env = Env::new();
    let json = stdout_json(&env.run(&["suggest", "--limit", "3", "--json"]));
    let list = json.as_array().unwrap();

    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["guest_id"], "g1");
    assert_eq!(list[0]["host_id"], "h1");
    assert_eq!(list[0]["score"], 20);
    assert_eq!(list[0]["reasons"].as_array().unwrap().len(), 4);
}

#[test]
fn suggest_limit_is_capped() {
    let env = Env::new();
    let json = stdout_json(&env.run(&["suggest", "--limit", "500", "--json"]));
    // Every compatible pair in the fixtures, well under the cap.
    assert_eq!(json.as_array().unwrap().len(), 9);
}

#[test]
fn confirm_known_pair() {
    let env = Env::new();
    let json = stdout_json(&env.run(&["confirm", "--guest", "g1", "--host", "h1", "--json"]));
    assert_eq!(json["accepted"], true);
    assert_eq!(json["guest_id"], "g1");
}

#[test]
fn confirm_unknown_pair_exits_not_found() {
    let env = Env::new();
    // h1 is female-only comfort; g3 is nonbinary, so the pair is gated out.
    let output = env.run(&["confirm", "--guest", "g3", "--host", "h1"]);
    assert_eq!(output.status.code(), Some(40));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no suggestion"));
}

// ---------------------------------------------------------------------------
// incidents
// ---------------------------------------------------------------------------

#[test]
fn added_incidents_come_first_newest_first() {
    let env = Env::new();
    let json = stdout_json(&env.run(&[
        "incidents",
        "--add",
        "type=Lost badge;person=Ana Lima",
        "--add",
        "type=Late arrival;status=Closed",
        "--json",
    ]));
    let list = json.as_array().unwrap();

    assert_eq!(list.len(), 5);
    assert_eq!(list[0]["type"], "Late arrival");
    assert_eq!(list[0]["status"], "Closed");
    assert_eq!(list[1]["type"], "Lost badge");
    assert_eq!(list[1]["status"], "Open");
    assert!(list[1]["time"].as_str().unwrap().ends_with('Z'));
    assert_eq!(list[2]["type"], "Noise");
}

#[test]
fn export_writes_incidents_csv() {
    let env = Env::new();
    let out_dir = env.path().join("out");
    let output = env.run(&[
        "incidents",
        "--add",
        "time=2026-10-18 12:00;type=Medical;notes=said \"fine\"",
        "--export",
        out_dir.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let written = std::fs::read_to_string(out_dir.join("incidents.csv")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "time,type,person,status,notes");
    assert_eq!(lines[1], r#""2026-10-18 12:00","Medical","","Open","said ""fine""""#);
    assert_eq!(lines.len(), 5);
}

#[test]
fn export_skipped_when_nothing_to_export() {
    let env = Env::new();
    let out_dir = env.path().join("out");
    let missing = env.path().join("none.csv");
    let output = env.run(&[
        "--source",
        &format!("incidents={}", missing.display()),
        "incidents",
        "--export",
        out_dir.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert!(!out_dir.join("incidents.csv").exists());
}

#[test]
fn bad_incident_spec_is_usage_error() {
    let env = Env::new();
    let output = env.run(&["incidents", "--add", "severity=high"]);
    assert_eq!(output.status.code(), Some(2));
}

// ---------------------------------------------------------------------------
// sources
// ---------------------------------------------------------------------------

#[test]
fn missing_source_degrades_to_empty() {
    let env = Env::new();
    let missing = env.path().join("none.csv");
    let json = stdout_json(&env.run(&[
        "--source",
        &format!("guests={}", missing.display()),
        "summary",
        "--json",
    ]));

    assert_eq!(json["metrics"]["guestsConfirmedPct"], 0);
    assert_eq!(json["metrics"]["hostsConfirmedPct"], 50);
    let guests = &json["sources"][1];
    assert_eq!(guests["kind"], "guests");
    assert_eq!(guests["status"]["status"], "failed");
}

#[test]
fn strict_fails_on_missing_source() {
    let env = Env::new();
    let missing = env.path().join("none.csv");
    let output = env.run(&[
        "--strict",
        "--source",
        &format!("comms={}", missing.display()),
        "comms",
    ]);
    assert_eq!(output.status.code(), Some(20));
}

#[test]
fn unknown_source_name_is_usage_error() {
    let env = Env::new();
    let output = env.run(&["--source", "staff=x.csv", "summary"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn transport_board_json() {
    let env = Env::new();
    let json = stdout_json(&env.run(&["transport", "--json"]));
    let statuses: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["scheduled", "partial", "unscheduled"]);
}

#[test]
fn comms_table_lists_both_rows() {
    let env = Env::new();
    let output = env.run(&["comms"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.starts_with("DATE"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_init_then_validate_and_use() {
    let env = Env::new();
    let settings = env.path().join("event/settings.toml");
    let settings_arg = settings.to_str().unwrap();

    let output = env.cmd().args(["config", "init", "--config", settings_arg]).output().unwrap();
    assert!(output.status.success());
    assert!(settings.exists());

    let output = env.cmd().args(["config", "init", "--config", settings_arg]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));

    let output = env.cmd().args(["config", "validate", "--config", settings_arg]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("ok:"));

    let json = stdout_json(
        &env.cmd().args(["config", "show", "--json", "--config", settings_arg]).output().unwrap(),
    );
    assert_eq!(json["fetch"]["timeout_secs"], 30);
    assert_eq!(json["sources"]["hosts"], "data/hosts.csv");
}

#[test]
fn settings_sources_resolve_next_to_file() {
    let env = Env::new();
    let dir = env.path().join("event");
    std::fs::create_dir_all(&dir).unwrap();
    let fixtures = fixtures_dir();
    std::fs::write(
        dir.join("settings.toml"),
        format!(
            "[sources]\nhosts = \"hosts.csv\"\nguests = '{}'\n",
            fixtures.join("guests.csv").display()
        ),
    )
    .unwrap();
    std::fs::copy(fixtures.join("hosts.csv"), dir.join("hosts.csv")).unwrap();

    let output = env
        .cmd()
        .args(["summary", "--json", "--config"])
        .arg(dir.join("settings.toml"))
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["metrics"]["hostsConfirmedPct"], 50);
    assert_eq!(json["metrics"]["guestsConfirmedPct"], 67);
    // matches/incidents/comms default to data/*.csv next to the file, which is absent
    assert_eq!(json["metrics"]["matchesMade"], 0);
}

#[test]
fn invalid_settings_exit_code() {
    let env = Env::new();
    let path = env.path().join("bad.toml");
    std::fs::write(&path, "[fetch]\ntimeout_secs = 0\n").unwrap();

    let output = env.cmd().args(["summary", "--config"]).arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(10));
}

#[test]
fn missing_explicit_config_is_usage_error() {
    let env = Env::new();
    let output = env
        .cmd()
        .args(["config", "show", "--config"])
        .arg(env.path().join("nope.toml"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
