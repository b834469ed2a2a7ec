// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Removal of the include file and its reference.
//!
//! ```text
//! run_cleanup(file, store)
//!   |
//!   +-- unset_all(include.path, file)
//!   |     Removed   info
//!   |     NotFound  info
//!   |     Err       error, continue
//!   |
//!   +-- remove_file(file)
//!         Deleted   info
//!         NotFound  info
//!         Err       error
//! ```
//!
//! Nothing here fails the process.

use std::io::ErrorKind;
use std::path::Path;
use tracing::{error, info};

use crate::git::{ConfigStore, Unset};
use crate::install::INCLUDE_PATH_KEY;

/// What happened to the `include.path` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceOutcome {
    Removed,
    NotFound,
    Failed,
}

/// What happened to the include file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Deleted,
    NotFound,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub reference: ReferenceOutcome,
    pub file: FileOutcome,
}

/// Remove the `include.path` entry for `include_file`, then delete the file.
///
/// Other `include.path` entries are left alone.
pub fn run_cleanup<S: ConfigStore>(include_file: &Path, store: S, dry_run: bool) -> CleanupReport {
    let value = include_file.to_string_lossy();

    let reference = match store.unset_all(INCLUDE_PATH_KEY, Some(&value)) {
        Ok(Unset::Removed) => {
            info!("Removed include.path for {value}");
            ReferenceOutcome::Removed
        }
        Ok(Unset::NotFound) => {
            info!("No include.path found to remove");
            ReferenceOutcome::NotFound
        }
        Err(e) => {
            error!("Failed to remove include.path for {value}: {e}");
            ReferenceOutcome::Failed
        }
    };

    let file = if dry_run {
        if include_file.exists() {
            info!("[dry run] delete {value}");
            FileOutcome::Deleted
        } else {
            info!("No include file at {value}");
            FileOutcome::NotFound
        }
    } else {
        match std::fs::remove_file(include_file) {
            Ok(()) => {
                info!("Deleted {value}");
                FileOutcome::Deleted
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No include file at {value}");
                FileOutcome::NotFound
            }
            Err(e) => {
                error!("Failed to delete include file: {e}");
                FileOutcome::Failed
            }
        }
    };

    CleanupReport { reference, file }
}

#[cfg(test)]
mod tests {
    use super::{FileOutcome, ReferenceOutcome, run_cleanup};
    use crate::git::{ConfigStore, DryRunStore, MemoryStore};
    use crate::install::INCLUDE_PATH_KEY;

    #[test]
    fn test_cleanup_removes_reference_and_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(".git-mirrors");
        std::fs::write(&path, "[include]\n").unwrap();
        let store = MemoryStore::new();
        store.add_value(INCLUDE_PATH_KEY, "/etc/other.inc").unwrap();
        store
            .add_value(INCLUDE_PATH_KEY, &path.to_string_lossy())
            .unwrap();

        let report = run_cleanup(&path, &store, false);

        assert_eq!(report.reference, ReferenceOutcome::Removed);
        assert_eq!(report.file, FileOutcome::Deleted);
        assert!(!path.exists());
        assert_eq!(store.values(INCLUDE_PATH_KEY), ["/etc/other.inc"]);
    }

    #[test]
    fn test_cleanup_with_nothing_installed() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(".git-mirrors");
        let store = MemoryStore::new();

        let report = run_cleanup(&path, &store, false);

        assert_eq!(report.reference, ReferenceOutcome::NotFound);
        assert_eq!(report.file, FileOutcome::NotFound);
    }

    #[test]
    fn test_cleanup_failures_are_reported_not_raised() {
        let temp = tempfile::tempdir().unwrap();
        // A directory cannot be removed with remove_file
        let path = temp.path().join("not-a-file");
        std::fs::create_dir(&path).unwrap();
        let store = MemoryStore::new();
        store.fail_writes_to(INCLUDE_PATH_KEY);

        let report = run_cleanup(&path, &store, false);

        assert_eq!(report.reference, ReferenceOutcome::Failed);
        assert_eq!(report.file, FileOutcome::Failed);
        assert!(path.exists());
    }

    #[test]
    fn test_cleanup_dry_run_keeps_everything() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(".git-mirrors");
        std::fs::write(&path, "[include]\n").unwrap();
        let store = MemoryStore::new();
        store
            .add_value(INCLUDE_PATH_KEY, &path.to_string_lossy())
            .unwrap();

        let report = run_cleanup(&path, DryRunStore::new(&store), true);

        assert_eq!(report.reference, ReferenceOutcome::Removed);
        assert_eq!(report.file, FileOutcome::Deleted);
        assert!(path.exists());
        assert_eq!(store.values(INCLUDE_PATH_KEY).len(), 1);
    }
}
