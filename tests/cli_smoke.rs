use assert_cmd::prelude::*;
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git").args(args).current_dir(dir).output().unwrap();
    assert!(out.status.success());
    String::from_utf8(out.stdout).unwrap().trim().to_string()
}

fn init_git_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "core.safecrlf", "false"]);
    git(dir, &["config", "user.email", "alice@example.com"]);
    git(dir, &["config", "user.name", "alice"]);
}

fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
}

fn commit_all(dir: &Path, author: &str, message: &str) {
    git(dir, &["add", "-A"]);
    git(
        dir,
        &["-c", &format!("user.name={author}"), "commit", "-m", message],
    );
}

/// alice adds two files, then modifies one and deletes the other; bot adds a third.
fn sample_repo(dir: &Path) {
    init_git_repo(dir);
    write_file(dir, "src/a.rs", "fn a(){}\n");
    write_file(dir, "src/b.rs", "fn b(){}\n");
    commit_all(dir, "alice", "add a and b");

    write_file(dir, "src/a.rs", "fn a(){ println!(\"a\"); }\n");
    git(dir, &["rm", "-q", "src/b.rs"]);
    commit_all(dir, "alice", "change a, drop b");

    write_file(dir, "gen/c.rs", "fn c(){}\n");
    commit_all(dir, "bot", "generated");
}

/// alice starts on the main line, bob adds two files under feat/ on a branch
/// while alice keeps working, then carol merges the branch.
fn merge_repo(dir: &Path) {
    init_git_repo(dir);
    write_file(dir, "src/a.rs", "fn a(){}\n");
    commit_all(dir, "alice", "add a");
    let main = git_stdout(dir, &["rev-parse", "--abbrev-ref", "HEAD"]);

    git(dir, &["checkout", "-q", "-b", "feature"]);
    write_file(dir, "feat/f1.rs", "fn f1(){}\n");
    write_file(dir, "feat/f2.rs", "fn f2(){}\n");
    commit_all(dir, "bob", "add feature");

    git(dir, &["checkout", "-q", &main]);
    write_file(dir, "src/a.rs", "fn a(){ println!(\"a\"); }\n");
    commit_all(dir, "alice", "change a");

    git(
        dir,
        &["-c", "user.name=carol", "merge", "-q", "--no-ff", "feature", "-m", "merge feature"],
    );
}

fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut cmd = Command::cargo_bin("scmstats").unwrap();
    cmd.current_dir(dir).arg("--repo").arg(dir).args(args);
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

fn totals(v: &serde_json::Value, author: &str) -> (u64, u64, u64, u64) {
    v["entries"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["author"] == author)
        .fold((0, 0, 0, 0), |acc, e| {
            (
                acc.0 + e["commits"].as_u64().unwrap(),
                acc.1 + e["added"].as_u64().unwrap(),
                acc.2 + e["modified"].as_u64().unwrap(),
                acc.3 + e["deleted"].as_u64().unwrap(),
            )
        })
}

#[test]
fn log_json_counts_activity_per_author() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    sample_repo(dir.path());

    let v = run_json(dir.path(), &["log", "--json"]);
    assert_eq!(v["version"], 1);
    assert_eq!(totals(&v, "alice"), (2, 2, 1, 1));
    assert_eq!(totals(&v, "bot"), (1, 1, 0, 0));
}

#[test]
fn ignored_authors_are_left_out() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    sample_repo(dir.path());

    let v = run_json(dir.path(), &["--ignore-author", "bot", "log", "--json"]);
    assert_eq!(totals(&v, "bot"), (0, 0, 0, 0));
    assert_eq!(totals(&v, "alice"), (2, 2, 1, 1));
}

#[test]
fn config_file_ignores_authors_and_excludes_files() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    sample_repo(dir.path());
    write_file(
        dir.path(),
        "scmstats.toml",
        "ignore_authors = [\"alice\"]\nexclusions = [\"gen/\"]\n",
    );

    let v = run_json(dir.path(), &["log", "--json"]);
    assert_eq!(totals(&v, "alice"), (0, 0, 0, 0));
    // the commit still counts, its only file does not
    assert_eq!(totals(&v, "bot"), (1, 0, 0, 0));
}

#[test]
fn command_provider_agrees_with_gix_provider() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    sample_repo(dir.path());

    let gix = run_json(dir.path(), &["--provider", "gix", "log", "--json"]);
    let command = run_json(dir.path(), &["--provider", "command", "log", "--json"]);
    assert_eq!(gix["entries"], command["entries"]);
}

#[test]
fn merge_commit_counts_without_files() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    merge_repo(dir.path());

    let gix = run_json(dir.path(), &["--provider", "gix", "log", "--json"]);
    assert_eq!(totals(&gix, "carol"), (1, 0, 0, 0));
    assert_eq!(totals(&gix, "bob"), (1, 2, 0, 0));
    assert_eq!(totals(&gix, "alice"), (2, 1, 1, 0));

    let command = run_json(dir.path(), &["--provider", "command", "log", "--json"]);
    assert_eq!(gix["entries"], command["entries"]);
}

#[test]
fn subdirectory_root_only_counts_its_files() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    merge_repo(dir.path());
    let feat = dir.path().join("feat");

    let gix = run_json(&feat, &["--provider", "gix", "log", "--json"]);
    assert_eq!(totals(&gix, "bob"), (1, 2, 0, 0));
    assert_eq!(totals(&gix, "alice"), (0, 0, 0, 0));
    assert_eq!(totals(&gix, "carol"), (0, 0, 0, 0));

    let command = run_json(&feat, &["--provider", "command", "log", "--json"]);
    assert_eq!(gix["entries"], command["entries"]);
}

#[test]
fn unusual_file_names_agree_across_providers() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    write_file(dir.path(), "tab\tname.rs", "fn t(){}\n");
    write_file(dir.path(), "say \"hi\".rs", "fn q(){}\n");
    commit_all(dir.path(), "alice", "odd names");

    let gix = run_json(dir.path(), &["--provider", "gix", "log", "--json"]);
    let command = run_json(dir.path(), &["--provider", "command", "log", "--json"]);
    assert_eq!(gix["entries"], command["entries"]);
    let added = &command["entries"][0]["files"]["added"];
    assert_eq!(added["tab\tname.rs"], 1);
    assert_eq!(added["say \"hi\".rs"], 1);
}

#[test]
fn range_before_history_is_empty() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    sample_repo(dir.path());

    let v = run_json(
        dir.path(),
        &["--since", "2001-01-01", "--until", "2001-12-31", "log", "--json"],
    );
    assert_eq!(v["entries"].as_array().unwrap().len(), 0);
}

#[test]
fn authors_json_summarises() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    sample_repo(dir.path());

    let v = run_json(dir.path(), &["authors", "--json"]);
    let authors = v["authors"].as_array().unwrap();
    assert_eq!(authors[0]["author"], "alice");
    assert_eq!(authors[0]["commits"], 2);
    assert_eq!(authors[1]["author"], "bot");
    let weekday_total: u64 = v["commits_per_weekday"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n.as_u64().unwrap())
        .sum();
    assert_eq!(weekday_total, 3);
}

#[test]
fn empty_repository_yields_empty_log() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());

    let v = run_json(dir.path(), &["log", "--json"]);
    assert_eq!(v["entries"].as_array().unwrap().len(), 0);
}

#[test]
fn mercurial_has_no_adapter() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".hg")).unwrap();

    let mut cmd = Command::cargo_bin("scmstats").unwrap();
    cmd.current_dir(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .args(["log", "--json"]);
    cmd.assert().failure();
}

#[test]
fn inverted_range_is_rejected() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("scmstats").unwrap();
    cmd.current_dir(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .args(["--since", "2012-02-01", "--until", "2012-01-01", "log"]);
    cmd.assert().failure();
}

#[test]
fn directory_without_scm_metadata_is_reported() {
    let dir = tempdir().unwrap();
    if dir.path().ancestors().any(|d| d.join(".git").exists()) {
        return;
    }
    let mut cmd = Command::cargo_bin("scmstats").unwrap();
    cmd.current_dir(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .args(["log", "--json"]);
    let out = cmd.assert().failure().get_output().stderr.clone();
    assert!(String::from_utf8_lossy(&out).contains("No SCM metadata found at"));
}
