use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn lingo() -> Command {
    Command::cargo_bin("lingo").expect("lingo binary")
}

#[test]
fn resolve_attack_uses_standard_balance() {
    lingo()
        .args([
            "resolve",
            "--turn",
            "attack",
            "--score",
            "85",
            "--rating",
            "okay",
            "--complexity",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("40 × (1.00 + 0.10 + 0.30) = 56.0"));
}

#[test]
fn resolve_revealed_defense_json() {
    let out = lingo()
        .args([
            "resolve",
            "--turn",
            "defense",
            "--item",
            "special",
            "--score",
            "99",
            "--rating",
            "excellent",
            "--complexity",
            "5",
            "--revealed",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["final_damage"], 15.0);
    assert_eq!(v["multiplier"], 1.0);
    assert_eq!(v["reveal_penalty_applied"], true);
}

#[test]
fn unknown_rating_fails() {
    lingo()
        .args([
            "resolve",
            "--turn",
            "attack",
            "--score",
            "85",
            "--rating",
            "superb",
            "--complexity",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized pronunciation rating"));
}

#[test]
fn out_of_range_complexity_fails() {
    lingo()
        .args([
            "resolve",
            "--turn",
            "attack",
            "--score",
            "85",
            "--rating",
            "good",
            "--complexity",
            "6",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("complexity level 6"));
}

#[test]
fn request_file_with_bom() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"\xEF\xBB\xBF").unwrap();
    file.write_all(
        br#"{ "turn_type": "defense", "raw_score": 70, "rating": "okay", "complexity": 3, "base_value": 15 }"#,
    )
    .unwrap();
    lingo()
        .args(["request", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "15 × clamp(1.00 − 0.10 − 0.10, 0.10, 1.00) = 12.0",
        ));
}

#[test]
fn sweep_reports_no_violations() {
    for score in ["0", "59.9", "60", "100"] {
        lingo()
            .args(["sweep", "--score", score])
            .assert()
            .success()
            .stdout(predicate::str::contains("checked 160 combinations"))
            .stdout(predicate::str::contains("0 violations"));
    }
}

#[test]
fn tables_list_every_row() {
    lingo()
        .arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("defense pronunciation (special)"))
        .stdout(predicate::str::contains("needs_improvement"))
        .stdout(predicate::str::contains("-0.70"));
}

#[test]
fn balance_hard_preset() {
    lingo()
        .args(["balance", "--preset", "hard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"boss_attack_base\": 22.0"));
}

#[test]
fn balance_unknown_preset_fails() {
    lingo()
        .args(["balance", "--preset", "nightmare"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown balance preset"));
}
