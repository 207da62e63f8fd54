use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Vault {
    dir: TempDir,
    config_dir: TempDir,
}

impl Vault {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".zettel")).unwrap();
        Self {
            dir,
            config_dir: TempDir::new().unwrap(),
        }
    }

    fn with_notes(notes: &[(&str, &str)]) -> Self {
        let vault = Self::new();
        for (path, id) in notes {
            vault.write(path, &format!("---\nzettel_id: \"{}\"\n---\n\n# {}\n", id, path));
        }
        vault
    }

    fn write(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    fn read(&self, path: &str) -> String {
        fs::read_to_string(self.dir.path().join(path)).unwrap()
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("zettel").unwrap();
        cmd.current_dir(self.dir.path())
            .env("ZETTEL_CONFIG_DIR", self.config_dir.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn sample() -> Vault {
    Vault::with_notes(&[
        ("Zettels/Thinking.md", "1"),
        ("Zettels/Fast.md", "1.a"),
        ("Zettels/Anchoring.md", "1.a.1.a"),
        ("Zettels/Writing.md", "2"),
    ])
}

#[test]
fn test_naked_invocation_prints_tree() {
    let vault = sample();
    vault.cmd().assert().success().stdout(
        "1 Thinking\n  1.a Fast\n    1.a.1 (no note)\n      1.a.1.a Anchoring\n2 Writing\n",
    );
}

#[test]
fn test_tree_from_nested_directory() {
    let vault = sample();
    vault
        .cmd()
        .current_dir(vault.root().join("Zettels"))
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1 Thinking\n"));
}

#[test]
fn test_tree_desc() {
    let vault = sample();
    vault
        .cmd()
        .args(["tree", "--desc"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2 Writing\n1 Thinking\n"));
}

#[test]
fn test_next_child_and_root() {
    let vault = sample();
    vault.cmd().args(["next", "1"]).assert().success().stdout("1.b\n");
    vault.cmd().args(["next", "1.a.1"]).assert().success().stdout("1.a.1.b\n");
    vault.cmd().arg("next").assert().success().stdout("3\n");
}

#[test]
fn test_new_note_lands_next_to_parent() {
    let vault = sample();
    vault
        .cmd()
        .args(["new", "2", "--title", "Drafting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    assert_eq!(
        vault.read("Zettels/Drafting.md"),
        "---\nzettel_id: \"2.a\"\n---\n\n"
    );
    vault
        .cmd()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("2 Writing\n  2.a Drafting\n"));
}

#[test]
fn test_move_dry_run_then_apply() {
    let vault = sample();
    vault
        .cmd()
        .args(["move", "1.a", "2", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.a → 2.a"))
        .stdout(predicate::str::contains("1.a.1.a → 2.a.1.a"));
    assert!(vault.read("Zettels/Fast.md").contains("zettel_id: \"1.a\""));

    vault
        .cmd()
        .args(["mv", "1.a", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved '1.a' to '2.a'"));
    assert!(vault.read("Zettels/Fast.md").contains("zettel_id: \"2.a\""));
    assert!(vault
        .read("Zettels/Anchoring.md")
        .contains("zettel_id: \"2.a.1.a\""));
}

#[test]
fn test_move_under_current_parent_closes_gap() {
    let vault = Vault::with_notes(&[
        ("Zettels/Thinking.md", "1"),
        ("Zettels/Fast.md", "1.a"),
        ("Zettels/Slow.md", "1.c"),
    ]);
    vault
        .cmd()
        .args(["move", "1.c", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved '1.c' to '1.b'"));
    assert!(vault.read("Zettels/Slow.md").contains("zettel_id: \"1.b\""));
}

#[test]
fn test_new_at_path_node() {
    let vault = sample();
    vault
        .cmd()
        .args(["new", "--at", "1.a.1", "--title", "Heuristics"])
        .assert()
        .success();
    assert_eq!(
        vault.read("Zettels/Heuristics.md"),
        "---\nzettel_id: \"1.a.1\"\n---\n\n"
    );
    vault
        .cmd()
        .args(["new", "--at", "1.a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already has a note"));
}

#[test]
fn test_delete_dry_run_then_apply() {
    let vault = sample();
    vault
        .cmd()
        .args(["delete", "1.a", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fast (Zettels/Fast.md)"))
        .stdout(predicate::str::contains("Anchoring (Zettels/Anchoring.md)"))
        .stdout(predicate::str::contains("Would delete '1.a'"));
    assert!(vault.root().join("Zettels/Fast.md").exists());

    vault.cmd().args(["rm", "1.a"]).assert().success();
    assert!(!vault.root().join("Zettels/Fast.md").exists());
    assert!(!vault.root().join("Zettels/Anchoring.md").exists());
    vault
        .cmd()
        .arg("tree")
        .assert()
        .success()
        .stdout("1 Thinking\n2 Writing\n");
}

#[test]
fn test_rename_keeps_identifier() {
    let vault = sample();
    vault
        .cmd()
        .args(["rename", "Zettels/Writing.md", "Writing well"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed"));
    assert!(vault
        .read("Zettels/Writing well.md")
        .contains("zettel_id: \"2\""));
    vault
        .cmd()
        .args(["rename", "Zettels/Fast.md", "Thinking"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let vault = sample();
    vault.write(".zettel/zettel.toml", "sort_order = \"sideways\"\n");
    vault
        .cmd()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1 Thinking\n"));
}

#[test]
fn test_move_under_own_descendant_fails() {
    let vault = sample();
    vault
        .cmd()
        .args(["move", "1", "1.a"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Invalid move"));
}

#[test]
fn test_renumber_and_collision() {
    let vault = sample();
    vault
        .cmd()
        .args(["renumber", "1.a", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    vault
        .cmd()
        .args(["renumber", "1.a", "3"])
        .assert()
        .success();
    assert!(vault.read("Zettels/Fast.md").contains("zettel_id: \"3\""));
    assert!(vault
        .read("Zettels/Anchoring.md")
        .contains("zettel_id: \"3.a.1\""));
}

#[test]
fn test_unknown_identifier_fails() {
    let vault = sample();
    vault
        .cmd()
        .args(["next", "9.z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("9.z"));
}

#[test]
fn test_set_id_files_a_note() {
    let vault = sample();
    vault.write("Inbox/Idea.md", "# Idea\n");
    vault
        .cmd()
        .arg("unfiled")
        .assert()
        .success()
        .stdout(predicate::str::contains("Idea (Inbox/Idea.md)"));

    vault
        .cmd()
        .args(["set-id", "Inbox/Idea.md", "1.b"])
        .assert()
        .success();
    assert_eq!(
        vault.read("Inbox/Idea.md"),
        "---\nzettel_id: \"1.b\"\n---\n# Idea\n"
    );
    vault
        .cmd()
        .arg("unfiled")
        .assert()
        .success()
        .stdout("No unfiled notes.\n");
}

#[test]
fn test_json_output() {
    let vault = sample();
    let output = vault.cmd().args(["tree", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = value["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["zettel_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "1.a", "1.a.1", "1.a.1.a", "2"]);
    assert_eq!(value["entries"][2]["notes"], serde_json::json!([]));
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    let run = || {
        let mut cmd = Command::cargo_bin("zettel").unwrap();
        cmd.current_dir(dir.path())
            .env("ZETTEL_CONFIG_DIR", config_dir.path())
            .arg("init");
        cmd
    };

    run()
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized vault"));
    assert!(dir.path().join(".zettel/zettel.toml").is_file());

    run()
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn test_vault_config_is_applied() {
    let vault = sample();
    vault.write(".zettel/zettel.toml", "sort_order = \"desc\"\n");

    vault
        .cmd()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2 Writing\n"));
    vault
        .cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("sort_order = \"desc\""))
        .stdout(predicate::str::contains("id_property = \"zettel_id\""));
}

#[test]
fn test_explicit_vault_flag() {
    let vault = sample();
    let elsewhere = TempDir::new().unwrap();
    vault
        .cmd()
        .current_dir(elsewhere.path())
        .args(["next", "--vault"])
        .arg(vault.root())
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_completions() {
    let vault = Vault::new();
    vault
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zettel"));
}
