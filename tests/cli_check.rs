use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn command_check_all() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("apl")?;
    let output = cmd.arg("check").output()?;

    // Exit status depends on what is installed; the report does not
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("bwa"));
    assert!(stdout.contains("samtools"));
    assert!(stdout.contains("RepeatMasker"));

    // `python` appears in both pipelines but is reported once
    assert_eq!(
        stdout.lines().filter(|l| l.starts_with("python")).count(),
        1
    );

    Ok(())
}

#[test]
fn command_check_pipeline() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("apl")?;
    let output = cmd.arg("check").arg("--pipeline").arg("hic").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("bwa"));
    assert!(stdout.contains("ALLHiC_partition"));
    assert!(!stdout.contains("RepeatMasker"));

    Ok(())
}

// With an empty PATH every binary is missing and the exit is nonzero
#[test]
fn command_check_missing() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;

    let mut cmd = Command::cargo_bin("apl")?;
    let output = cmd.env("PATH", temp.path()).arg("check").output()?;
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("MISSING"));
    assert!(stdout
        .lines()
        .any(|l| l.starts_with("bwa") && l.contains("MISSING")));

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("required binaries missing"));

    Ok(())
}

#[test]
fn command_check_invalid_pipeline() {
    let mut cmd = Command::cargo_bin("apl").unwrap();
    cmd.arg("check").arg("--pipeline").arg("foobar");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
