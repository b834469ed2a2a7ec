// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigStore, GitCliStore, Unset};
use crate::error::{GitError, MirrorError};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn file_store(temp: &TempDir) -> GitCliStore {
    GitCliStore::with_file(temp.path().join("gitconfig")).expect("git not found")
}

#[test]
fn test_get_all_missing_key_is_empty() {
    let temp = temp_dir();
    let store = file_store(&temp);
    assert!(store.get_all("include.path").unwrap().is_empty());
}

#[test]
fn test_add_value_appends() {
    let temp = temp_dir();
    let store = file_store(&temp);

    store.add_value("include.path", "/a/.git-mirrors").unwrap();
    store.add_value("include.path", "/b/.git-mirrors").unwrap();

    assert_eq!(
        store.get_all("include.path").unwrap(),
        ["/a/.git-mirrors", "/b/.git-mirrors"]
    );
}

#[test]
fn test_set_value_writes_url_rewrite() {
    let temp = temp_dir();
    let store = file_store(&temp);
    let key = "url.https://git.example.com/acme/up.insteadOf";

    store.set_value(key, "https://git.example.com/acme/up").unwrap();
    store.set_value(key, "https://git.example.com/acme/up").unwrap();

    assert_eq!(store.get_all(key).unwrap(), ["https://git.example.com/acme/up"]);

    let content = std::fs::read_to_string(temp.path().join("gitconfig")).unwrap();
    assert!(content.contains("[url \"https://git.example.com/acme/up\"]"));
}

#[test]
fn test_unset_all_with_value_keeps_other_entries() {
    let temp = temp_dir();
    let store = file_store(&temp);
    store.add_value("include.path", "/keep/me").unwrap();
    store.add_value("include.path", "/home/ci/.git-mirrors").unwrap();

    let outcome = store
        .unset_all("include.path", Some("/home/ci/.git-mirrors"))
        .unwrap();

    assert_eq!(outcome, Unset::Removed);
    assert_eq!(store.get_all("include.path").unwrap(), ["/keep/me"]);
}

#[test]
fn test_unset_all_value_is_not_a_pattern() {
    let temp = temp_dir();
    let store = file_store(&temp);
    store.add_value("include.path", "/home/ci/xgit-mirrors").unwrap();

    let outcome = store
        .unset_all("include.path", Some("/home/ci/.git-mirrors"))
        .unwrap();

    assert_eq!(outcome, Unset::NotFound);
    assert_eq!(store.get_all("include.path").unwrap().len(), 1);
}

#[test]
fn test_unset_all_missing_key_is_not_found() {
    let temp = temp_dir();
    let store = file_store(&temp);
    assert_eq!(store.unset_all("include.path", None).unwrap(), Unset::NotFound);
}

#[test]
fn test_set_value_on_multi_valued_key_fails() {
    let temp = temp_dir();
    let store = file_store(&temp);
    store.add_value("include.path", "/a").unwrap();
    store.add_value("include.path", "/b").unwrap();

    let err = store.set_value("include.path", "/c").unwrap_err();
    match err {
        MirrorError::Git(boxed) => match *boxed {
            GitError::CommandFailed { code, ref command, .. } => {
                assert_ne!(code, 0);
                assert!(command.starts_with("git config --file "), "{command}");
            }
            other => panic!("Expected GitError::CommandFailed, got {other:?}"),
        },
        other => panic!("Expected MirrorError::Git, got {other:?}"),
    }
}
