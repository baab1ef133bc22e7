//! Integration tests running the real `git` binary in temporary checkouts.
//!
//! Tests return early when `git` is not installed.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::process::Command;

use appctl_common::types::AppName;
use appctl_git::{GitCli, RemoteStore};
use tempfile::TempDir;

fn checkout() -> Option<(TempDir, GitCli)> {
    let _ = which::which("git").ok()?;
    let dir = tempfile::tempdir().expect("temp dir");
    let status = Command::new("git")
        .args(["init", "--quiet"])
        .current_dir(dir.path())
        .status()
        .expect("git init");
    assert!(status.success());
    let store = GitCli::new(dir.path(), "heroku.com");
    Some((dir, store))
}

#[test]
fn fresh_checkout_has_empty_remote_map() {
    let Some((_dir, store)) = checkout() else {
        return;
    };
    assert!(store.is_checkout());
    assert_eq!(store.app_remotes().unwrap(), Some(Default::default()));
}

#[test]
fn add_then_list_platform_remotes() {
    let Some((_dir, store)) = checkout() else {
        return;
    };
    store.add_remote("heroku", "git@heroku.com:myapp.git").unwrap();
    store.add_remote("origin", "git@github.com:me/myapp.git").unwrap();

    let remotes = store.app_remotes().unwrap().unwrap();
    assert_eq!(remotes.len(), 1);
    assert_eq!(remotes["heroku"], AppName::new("myapp"));

    let mut names = store.remote_names().unwrap();
    names.sort();
    assert_eq!(names, ["heroku", "origin"]);
}

#[test]
fn remove_drops_remote() {
    let Some((_dir, store)) = checkout() else {
        return;
    };
    store.add_remote("staging", "git@heroku.com:myapp-staging.git").unwrap();
    store.remove_remote("staging").unwrap();

    assert!(store.remote_names().unwrap().is_empty());
}

#[test]
fn adding_duplicate_remote_reports_git_error() {
    let Some((_dir, store)) = checkout() else {
        return;
    };
    store.add_remote("heroku", "git@heroku.com:a.git").unwrap();

    let err = store.add_remote("heroku", "git@heroku.com:b.git").unwrap_err();
    assert!(err.to_string().starts_with("git remote add heroku"));
}

#[test]
fn nested_directory_sees_checkout_remotes() {
    let Some((dir, root)) = checkout() else {
        return;
    };
    root.add_remote("heroku", "git@heroku.com:myapp.git").unwrap();
    let nested = dir.path().join("src").join("bin");
    std::fs::create_dir_all(&nested).unwrap();

    let store = GitCli::new(&nested, "heroku.com");
    assert!(store.is_checkout());
    let remotes = store.app_remotes().unwrap().unwrap();
    assert_eq!(remotes["heroku"], AppName::new("myapp"));
    assert_eq!(store.remote_names().unwrap(), ["heroku"]);
}
