use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn command_invalid() {
    let mut cmd = Command::cargo_bin("apl").unwrap();
    cmd.arg("foobar");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("recognized"));
}

#[test]
fn command_no_args() {
    let mut cmd = Command::cargo_bin("apl").unwrap();
    cmd.assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn command_help() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("apl")?;
    let output = cmd.arg("--help").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("hic"));
    assert!(stdout.contains("repeat"));
    assert!(stdout.contains("check"));

    Ok(())
}
