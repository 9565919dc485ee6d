use predicates::prelude::*;
use serde_json::json;

use super::InventoryFixture;

#[test]
fn test_list_prints_inventory() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\n");

    let doc = fixture.json(&["--list"]);

    assert_eq!(doc["all"]["hosts"], json!(["box1", "box2"]));
    assert_eq!(doc["_meta"]["hostvars"]["box1"], json!({
        "ansible_host": "127.0.0.1",
        "ansible_user": "vagrant",
        "ansible_port": 2222,
        "ansible_host_key_checking": false,
        "ansible_ssh_private_key_file": "/home/u/.vagrant/box1/key",
    }));
    assert_eq!(doc["_meta"]["hostvars"]["box2"]["ansible_port"], 2200);
}

#[test]
fn test_host_prints_variables() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: Vagrantfile\n");

    let vars = fixture.json(&["--host", "box2"]);
    assert_eq!(vars["ansible_ssh_private_key_file"], "/home/u/.vagrant/box2/key");

    let unknown = fixture.json(&["--host", "box9"]);
    assert_eq!(unknown, json!({}));
}

#[test]
fn test_vagrant_runs_in_project_directory() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\n");

    fixture.cmd().arg("--list").assert().success();

    let calls = fixture.vagrant_calls();
    let expected = format!("{} ssh-config", fixture.project.canonical_path().unwrap().display());
    assert_eq!(calls, vec![expected]);
}

#[test]
fn test_inventory_option_and_relative_vagrantfile() {
    let fixture = InventoryFixture::sample();
    let source = fixture
        .project
        .write_file("inventories/lab.yml", "plugin: vagrant\nvagrantfile: ../Vagrantfile\n")
        .unwrap();

    let doc = fixture.json(&["-i", source.to_str().unwrap(), "--list"]);
    assert_eq!(doc["all"]["hosts"], json!(["box1", "box2"]));

    // Same source through the environment variable
    fixture
        .cmd()
        .env("VAGRANT_INVENTORY_CONFIG", &source)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("box1"));
}

#[test]
fn test_empty_project_lists_no_hosts() {
    let fixture = InventoryFixture::new("");
    fixture.write_inventory("vagrantfile: .\n");

    let doc = fixture.json(&["--list"]);
    assert_eq!(doc, json!({ "_meta": { "hostvars": {} }, "all": { "hosts": [] } }));
}

#[test]
fn test_pretty_output() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\n");

    fixture
        .cmd()
        .args(["--host", "box1", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"ansible_port\": 2222"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\n");

    let assert = fixture.cmd().args(["--list", "-v"]).assert().success();
    let output = assert.get_output();

    assert!(String::from_utf8_lossy(&output.stderr).contains("ssh-config"));
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["all"]["hosts"], json!(["box1", "box2"]));
}

#[test]
fn test_vagrant_warnings_reach_stderr() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\n");
    fixture.warn_on_stderr("Vagrant is using an outdated box 'generic/debian12'.");

    let assert = fixture
        .cmd()
        .arg("--list")
        .assert()
        .success()
        .stderr(predicate::str::contains("using an outdated box"));

    let doc: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(doc["all"]["hosts"], json!(["box1", "box2"]));
}

#[test]
fn test_quiet_silences_vagrant_warnings() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\n");
    fixture.warn_on_stderr("Vagrant is using an outdated box 'generic/debian12'.");

    fixture
        .cmd()
        .args(["--list", "-q"])
        .assert()
        .success()
        .stderr(predicate::str::contains("outdated box").not());
}
