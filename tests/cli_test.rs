use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_refuses_to_start_without_token() {
    let mut cmd = Command::new(cargo_bin!("proofbot"));
    cmd.env_remove("BOT_TOKEN");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("BOT_TOKEN"));
}

#[test]
fn test_refuses_to_start_with_empty_token() {
    let mut cmd = Command::new(cargo_bin!("proofbot"));
    cmd.env("BOT_TOKEN", "");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("BOT_TOKEN must not be empty"));
}
