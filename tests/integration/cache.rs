use predicates::prelude::*;
use serde_json::json;
use std::fs;

use super::InventoryFixture;

fn cache_files(fixture: &InventoryFixture) -> Vec<String> {
    fs::read_dir(fixture.cache_dir())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_cached_inventory_is_reused() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\ncache: true\n");

    let first = fixture.json(&["--list"]);
    assert_eq!(fixture.vagrant_calls().len(), 1);

    // Vagrant is broken now, the cached entry still answers
    fixture.break_vagrant();
    let second = fixture.json(&["--list"]);

    assert_eq!(first, second);
    assert_eq!(fixture.vagrant_calls().len(), 1);

    let files = cache_files(&fixture);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("ansible_inventory_vagrant_"));
}

#[test]
fn test_refresh_cache_reruns_vagrant() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\ncache: true\n");
    fixture.json(&["--list"]);

    fixture.set_ssh_config("Host only\n  HostName 10.0.0.7\n");
    let refreshed = fixture.json(&["--list", "--refresh-cache"]);
    assert_eq!(refreshed["all"]["hosts"], json!(["only"]));
    assert_eq!(fixture.vagrant_calls().len(), 2);

    // The refreshed result replaced the cache entry
    fixture.break_vagrant();
    let cached = fixture.json(&["--list"]);
    assert_eq!(cached, refreshed);
}

#[test]
fn test_refresh_with_broken_vagrant_fails() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\ncache: true\n");
    fixture.json(&["--list"]);

    fixture.break_vagrant();
    fixture
        .cmd()
        .args(["--list", "--refresh-cache"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("vagrant ssh-config"))
        .stderr(predicate::str::contains("could not be found"));
}

#[test]
fn test_cache_disabled_by_default() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\n");

    fixture.json(&["--list"]);
    fixture.json(&["--list"]);

    assert_eq!(fixture.vagrant_calls().len(), 2);
    assert!(cache_files(&fixture).is_empty());
}

#[test]
fn test_cache_enabled_from_environment() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\n");

    for _ in 0..2 {
        fixture.cmd().env("VAGRANT_INVENTORY_CACHE", "true").arg("--list").assert().success();
    }
    assert_eq!(fixture.vagrant_calls().len(), 1);
}

#[test]
fn test_memory_cache_does_not_persist() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\ncache: true\ncache_plugin: memory\n");

    fixture.json(&["--list"]);
    fixture.json(&["--list"]);

    assert_eq!(fixture.vagrant_calls().len(), 2);
    assert!(cache_files(&fixture).is_empty());
}

#[test]
fn test_corrupt_cache_entry_is_recomputed() {
    let fixture = InventoryFixture::sample();
    fixture.write_inventory("vagrantfile: .\ncache: true\ncache_prefix: vms_\n");
    fixture.json(&["--list"]);

    let files = cache_files(&fixture);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("vms_"));
    fs::write(fixture.cache_dir().join(&files[0]), "garbage").unwrap();

    let doc = fixture.json(&["--list"]);
    assert_eq!(doc["all"]["hosts"], json!(["box1", "box2"]));
    assert_eq!(fixture.vagrant_calls().len(), 2);
}
