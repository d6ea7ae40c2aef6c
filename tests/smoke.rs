//! Smoke tests -- verify the binary runs and the subcommands are wired.

use std::io::Write;

use assert_cmd::Command;

#[test]
fn test_cli_help() {
    Command::cargo_bin("workqueue")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("Priority-ordered work request queue"));
}

#[test]
fn test_cli_version() {
    Command::cargo_bin("workqueue")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("workqueue"));
}

#[test]
fn test_serve_subcommand_exists() {
    Command::cargo_bin("workqueue")
        .unwrap()
        .args(["serve", "--help"])
        .assert()
        .success();
}

#[test]
fn test_classify_with_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[priority]\nfallback = \"normal\"\n\n[[priority.rules]]\ndivisible_by = 4\ntier = \"vip\""
    )
    .unwrap();

    Command::cargo_bin("workqueue")
        .unwrap()
        .args(["classify", "8", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("8: vip (rank 1)"));

    Command::cargo_bin("workqueue")
        .unwrap()
        .args(["classify", "15", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("15: normal (rank 3)"));
}

#[test]
fn test_check_config_rejects_zero_divisor() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[[priority.rules]]\ndivisible_by = 0\ntier = \"vip\"").unwrap();

    Command::cargo_bin("workqueue")
        .unwrap()
        .args(["check-config", "--config"])
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn test_check_config_prints_effective_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nbind = \"127.0.0.1:9999\"").unwrap();

    Command::cargo_bin("workqueue")
        .unwrap()
        .args(["check-config", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("127.0.0.1:9999"))
        .stdout(predicates::str::contains("management_override"));
}

#[test]
fn test_rejected_env_config_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[[priority.rules]]\ndivisible_by = 0\ntier = \"vip\"").unwrap();

    Command::cargo_bin("workqueue")
        .unwrap()
        .env("WORKQUEUE_CONFIG", file.path())
        .env_remove("RUST_LOG")
        .args(["classify", "15"])
        .assert()
        .success()
        .stdout(predicates::str::contains("15: management_override"))
        .stderr(predicates::str::contains(
            "WORKQUEUE_CONFIG set but file could not be loaded",
        ));
}

#[test]
fn test_classify_id_domain_matches_http() {
    Command::cargo_bin("workqueue")
        .unwrap()
        .args(["classify", "9223372036854775807"])
        .assert()
        .success();

    Command::cargo_bin("workqueue")
        .unwrap()
        .args(["classify", "9223372036854775808"])
        .assert()
        .failure();

    Command::cargo_bin("workqueue")
        .unwrap()
        .args(["classify", "-3"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("non-negative"));
}
