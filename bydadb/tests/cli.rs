use assert_cmd::Command;
use predicates::prelude::*;

fn bydadb() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bydadb"))
}

#[test]
fn help_lists_the_configuration_options() {
    bydadb()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--apk-dir"))
        .stdout(predicate::str::contains("--ips-file"))
        .stdout(predicate::str::contains("--adb-server"))
        .stdout(predicate::str::contains("--device-port"));
}

#[test]
fn version_matches_the_manifest() {
    bydadb()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rejects_a_malformed_adb_server_address() {
    bydadb()
        .args(["--adb-server", "localhost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--adb-server"));
}

#[test]
fn rejects_an_out_of_range_device_port() {
    bydadb()
        .args(["--device-port", "70000"])
        .assert()
        .failure();
}
