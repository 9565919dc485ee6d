use predicates::prelude::*;

use super::InventoryFixture;

#[test]
fn test_missing_inventory_source() {
    let fixture = InventoryFixture::sample();

    fixture
        .cmd()
        .arg("--list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Inventory source not found"))
        .stderr(predicate::str::contains("--inventory"));
}

#[test]
fn test_other_plugin_rejected() {
    let fixture = InventoryFixture::sample();
    fixture.project.write_file("vagrant.yml", "plugin: aws_ec2\n").unwrap();

    fixture
        .cmd()
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a vagrant inventory source"));
}

#[test]
fn test_missing_mode_is_usage_error() {
    let fixture = InventoryFixture::sample();

    fixture.cmd().assert().failure().code(2).stderr(predicate::str::contains("--list"));
}

#[test]
fn test_directory_without_vagrantfile() {
    let fixture = InventoryFixture::sample();
    fixture.project.write_file("empty/.keep", "").unwrap();
    fixture.write_inventory("vagrantfile: empty\n");

    fixture
        .cmd()
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory does not contain Vagrantfile"));
    assert!(fixture.vagrant_calls().is_empty());
}

#[test]
fn test_vagrantfile_option_pointing_at_other_file() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: vagrant.yml\n");

    fixture
        .cmd()
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must point to Vagrantfile or containing folder"));
}

#[cfg(unix)]
#[test]
fn test_invalid_port_fails_without_output() {
    let fixture = InventoryFixture::new("Host box1\n  HostName 127.0.0.1\n  Port ssh\n");
    fixture.write_inventory("vagrantfile: .\ncache: true\n");

    fixture
        .cmd()
        .arg("--list")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid Port value 'ssh'"));
}

#[cfg(unix)]
#[test]
fn test_failing_vagrant_reports_stderr() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\n");
    fixture.break_vagrant();

    fixture
        .cmd()
        .arg("--list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("\"vagrant ssh-config\" failed with"))
        .stderr(predicate::str::contains("The provider 'virtualbox' could not be found."));
}
