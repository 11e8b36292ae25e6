#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn architect(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("architect").unwrap();
    cmd.current_dir(dir.path())
        .env("ARCHITECT_ROOT", dir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("GITHUB_TOKEN");
    cmd
}

fn init_project(dir: &TempDir) {
    architect(dir).arg("init").assert().success();
}

fn json_out(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.arg("--json").assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

// ---------------------------------------------------------------------------
// architect init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_config_and_tracking_document() {
    let dir = TempDir::new().unwrap();
    architect(&dir)
        .args(["init", "--project", "Shop v2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .architect/config.yaml"));

    assert!(dir.path().join(".architect/config.yaml").exists());
    let doc = std::fs::read_to_string(dir.path().join(".architect/tracking.json")).unwrap();
    assert!(doc.contains("Shop v2"));
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    architect(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .architect/tracking.json"));
}

// ---------------------------------------------------------------------------
// architect tree
// ---------------------------------------------------------------------------

#[test]
fn tree_show_seeds_default_roadmap() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let forest = json_out(architect(&dir).args(["tree", "show"]));
    assert_eq!(forest.as_array().unwrap().len(), 9);

    architect(&dir)
        .args(["tree", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] 1 "))
        .stdout(predicate::str::contains("done"));
}

#[test]
fn tree_edit_commands() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let added = json_out(architect(&dir).args(["tree", "add-root", "Build", "API"]));
    assert_eq!(added["id"], "10");
    assert_eq!(added["applied"], true);

    let child = json_out(architect(&dir).args(["tree", "add-child", "10", "Design", "schema"]));
    assert_eq!(child["id"], "10.1");

    architect(&dir)
        .args(["tree", "toggle", "10.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    let forest = json_out(architect(&dir).args(["tree", "show"]));
    let root = &forest[9];
    assert_eq!(root["title"], "Build API");
    assert_eq!(root["children"][0]["done"], true);
    assert_eq!(root["done"], false);

    architect(&dir).args(["tree", "remove", "10"]).assert().success();
    let forest = json_out(architect(&dir).args(["tree", "show"]));
    assert_eq!(forest.as_array().unwrap().len(), 9);
}

#[test]
fn tree_edit_on_missing_node_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    architect(&dir)
        .args(["tree", "rename", "99.9", "Ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tree unchanged"));
}

#[test]
fn tree_reset_restores_default() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    architect(&dir).args(["tree", "remove", "1"]).assert().success();
    let forest = json_out(architect(&dir).args(["tree", "reset"]));
    assert_eq!(forest[0]["id"], "1");
    assert_eq!(forest.as_array().unwrap().len(), 9);
}

// ---------------------------------------------------------------------------
// architect backlog / phase
// ---------------------------------------------------------------------------

#[test]
fn backlog_add_list_update() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let added = json_out(architect(&dir).args([
        "backlog", "add", "Store", "credit", "--phase", "3.2", "--priority", "high",
    ]));
    let id = added["id"].as_str().unwrap().to_string();

    architect(&dir)
        .args(["backlog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Store credit"))
        .stdout(predicate::str::contains("high"));

    architect(&dir)
        .args(["backlog", "update", &id, "done"])
        .assert()
        .success();

    let open = json_out(architect(&dir).args(["backlog", "list"]));
    assert!(open.as_array().unwrap().is_empty());
    let all = json_out(architect(&dir).args(["backlog", "list", "--all"]));
    assert_eq!(all[0]["status"], "done");
}

#[test]
fn backlog_update_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    architect(&dir)
        .args(["backlog", "update", "missing", "done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn backlog_rejects_bad_status() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    architect(&dir)
        .args(["backlog", "update", "x", "shipped"])
        .assert()
        .failure();
}

#[test]
fn phase_record_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    architect(&dir)
        .args(["phase", "record", "1.1", "Login", "screen"])
        .assert()
        .success();

    let phases = json_out(architect(&dir).args(["phase", "list"]));
    assert_eq!(phases["1.1"]["items"][0]["name"], "Login screen");
    assert_eq!(phases["1.1"]["items"][0]["status"], "used");

    architect(&dir)
        .args(["phase", "record", "7.7", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("7.7"));
}

// ---------------------------------------------------------------------------
// architect inventory / prompt
// ---------------------------------------------------------------------------

#[test]
fn inventory_show_before_refresh() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    architect(&dir)
        .args(["inventory", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No inventory yet"));
}

#[test]
fn prompt_requires_api_key() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    architect(&dir)
        .args(["prompt", "Shopping", "cart", "--phase", "3.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}
