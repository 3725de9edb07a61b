//! Integration tests for the CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally() -> Command {
    Command::cargo_bin("tally").unwrap()
}

fn data_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// A directory with one character and one attack already set up.
fn seeded_dir() -> TempDir {
    let dir = data_dir();
    let path = dir.path().to_str().unwrap().to_string();
    tally()
        .args(["character", "add", "Escanor", "30", "-d", path.as_str()])
        .assert()
        .success();
    tally()
        .args(["attack", "add", "Slash", "2d6+3:slashing", "-d", path.as_str()])
        .assert()
        .success();
    dir
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_is_reproducible_with_seed() {
    let dir = data_dir();
    let path = dir.path().to_str().unwrap();

    let first = tally()
        .args(["roll", "4d6+2", "--seed", "7", "-d", path])
        .assert()
        .success();
    let second = tally()
        .args(["roll", "4d6+2", "--seed", "7", "-d", path])
        .assert()
        .success();
    assert_eq!(first.get_output().stdout, second.get_output().stdout);
}

#[test]
fn roll_rejects_garbage_expression() {
    let dir = data_dir();
    tally()
        .args(["roll", "fireball", "-d", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dice expression"));
}

#[test]
fn roll_records_history() {
    let dir = data_dir();
    let path = dir.path().to_str().unwrap();
    tally().args(["roll", "2d6", "-d", path]).assert().success();
    tally()
        .args(["history", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("2d6"));
}

// ---------------------------------------------------------------------------
// character
// ---------------------------------------------------------------------------

#[test]
fn character_add_and_list() {
    let dir = data_dir();
    let path = dir.path().to_str().unwrap();
    tally()
        .args(["character", "add", "Escanor", "30", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created character 'Escanor'"));

    tally()
        .args(["character", "list", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Escanor").and(predicate::str::contains("30/30")));
}

#[test]
fn character_add_rejects_duplicate_name() {
    let dir = data_dir();
    let path = dir.path().to_str().unwrap();
    tally()
        .args(["character", "add", "Escanor", "30", "-d", path])
        .assert()
        .success();
    tally()
        .args(["character", "add", "escanor", "20", "-d", path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn character_switch_addresses_operations() {
    let dir = data_dir();
    let path = dir.path().to_str().unwrap();
    tally()
        .args(["character", "add", "Escanor", "30", "-d", path])
        .assert()
        .success();
    tally()
        .args(["character", "add", "Merlin", "20", "-d", path])
        .assert()
        .success();
    tally()
        .args(["character", "switch", "merlin", "-d", path])
        .assert()
        .success();
    tally()
        .args(["hp", "damage", "5", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merlin: 15/20"));
}

#[test]
fn operations_require_a_character() {
    let dir = data_dir();
    tally()
        .args(["hp", "damage", "5", "-d", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no active character"));
}

// ---------------------------------------------------------------------------
// attack
// ---------------------------------------------------------------------------

#[test]
fn attack_add_and_roll_with_seed() {
    let dir = seeded_dir();
    let path = dir.path().to_str().unwrap();
    tally()
        .args(["attack", "roll", "slash", "--seed", "42", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Slash").and(predicate::str::contains("total:")));
}

#[test]
fn attack_add_rejects_bad_component() {
    let dir = seeded_dir();
    tally()
        .args([
            "attack",
            "add",
            "Bad",
            "2d6",
            "-d",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing damage type"));
}

#[test]
fn attack_add_rejects_unknown_damage_type() {
    let dir = seeded_dir();
    tally()
        .args([
            "attack",
            "add",
            "Bad",
            "2d6:sonic",
            "-d",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown damage type"));
}

#[test]
fn attack_duplicate_and_remove() {
    let dir = seeded_dir();
    let path = dir.path().to_str().unwrap();
    tally()
        .args(["attack", "duplicate", "Slash", "-d", path])
        .assert()
        .success();
    tally()
        .args(["attack", "list", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Slash (copy)"));
    tally()
        .args(["attack", "remove", "slash (copy)", "-d", path])
        .assert()
        .success();
    tally()
        .args(["attack", "remove", "nonexistent", "-d", path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("attack not found"));
}

#[test]
fn critical_roll_uses_configured_rule() {
    let dir = seeded_dir();
    let path = dir.path().to_str().unwrap();
    tally()
        .args(["attack", "roll", "Slash", "--critical", "--seed", "1", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Critical)"));

    tally()
        .args(["crit", "set", "massive", "--level", "12", "-d", path])
        .assert()
        .success();
    tally()
        .args(["attack", "roll", "Slash", "--critical", "--seed", "1", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Massive Critical)"));
}

// ---------------------------------------------------------------------------
// counters, states, turns
// ---------------------------------------------------------------------------

#[test]
fn counter_bump_clamps_to_bounds() {
    let dir = seeded_dir();
    let path = dir.path().to_str().unwrap();
    tally()
        .args(["counter", "add", "Rage", "3", "-d", path])
        .assert()
        .success();
    tally()
        .args(["counter", "bump", "-d", path, "rage", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rage: 0"));
    tally()
        .args(["counter", "max", "rage", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("rage: 3"));
}

#[test]
fn state_toggle_spends_linked_counter() {
    let dir = seeded_dir();
    let path = dir.path().to_str().unwrap();
    tally()
        .args(["counter", "add", "Rage", "3", "-d", path])
        .assert()
        .success();
    tally()
        .args(["state", "add", "Raging", "--counter", "Rage", "-d", path])
        .assert()
        .success();
    tally()
        .args(["state", "toggle", "raging", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("on"));
    tally()
        .args(["counter", "list", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("2/3"));
}

#[test]
fn turn_start_applies_regeneration() {
    let dir = data_dir();
    let path = dir.path().to_str().unwrap();
    tally()
        .args(["character", "add", "Troll", "40", "--regen", "3", "-d", path])
        .assert()
        .success();
    tally()
        .args(["hp", "damage", "10", "-d", path])
        .assert()
        .success();
    tally()
        .args(["turn", "start", "-d", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Turn 1 started (33 HP)"));
}

#[test]
fn rest_rejects_unknown_kind() {
    let dir = seeded_dir();
    tally()
        .args(["rest", "nap", "-d", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rest kind"));
}

// ---------------------------------------------------------------------------
// export / import
// ---------------------------------------------------------------------------

#[test]
fn export_then_import_round_trips() {
    let source = seeded_dir();
    let source_path = source.path().to_str().unwrap();
    let file = source.path().join("backup.json");
    tally()
        .args([
            "export",
            "-o",
            file.to_str().unwrap(),
            "-d",
            source_path,
        ])
        .assert()
        .success();

    let target = data_dir();
    let target_path = target.path().to_str().unwrap();
    tally()
        .args(["import", file.to_str().unwrap(), "-d", target_path])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 character(s)"));
    tally()
        .args(["character", "list", "-d", target_path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Escanor"));
}

#[test]
fn import_rejects_unversioned_file() {
    let dir = data_dir();
    let file = dir.path().join("bad.json");
    fs::write(&file, "{\"characters\": []}").unwrap();
    tally()
        .args([
            "import",
            file.to_str().unwrap(),
            "-d",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized import format"));
}
