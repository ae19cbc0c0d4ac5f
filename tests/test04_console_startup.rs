#![cfg(feature = "sqlite")]

use std::process::Command;

#[test]
fn failing_init_script_closes_the_connection_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("airline.db");
    let script = dir.path().join("broken.sql");
    let log = dir.path().join("console.log");
    std::fs::write(&script, "CREATE TABLE Plane (PlaneID TEXT);\nNOT A STATEMENT;\n")?;

    let output = Command::new(env!("CARGO_BIN_EXE_airline-console"))
        .arg("--backend")
        .arg("sqlite")
        .arg(&db)
        .arg("--init")
        .arg(&script)
        .arg("--log")
        .arg(&log)
        .arg("--verbose")
        .output()?;

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stdout.contains("User Interface"), "{stdout}");
    assert!(stderr.contains("Error - Unable to Connect to Database"), "{stderr}");

    let diagnostics = std::fs::read_to_string(&log).unwrap_or_default();
    assert!(!diagnostics.contains("did not close cleanly"), "{diagnostics}");
    Ok(())
}
