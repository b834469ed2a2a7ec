// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git configuration access.
//!
//! ```text
//!        install / cleanup
//!               |
//!               v
//!      ,------------------,
//!      |   ConfigStore    |
//!      | get_all  add     |
//!      | set  unset_all   |
//!      '--+------+-----+--'
//!         |      |     |
//!         v      v     v
//!   GitCliStore  |  MemoryStore
//!   git config   |  (tests)
//!   --global     v
//!           DryRunStore<S>
//!           reads from S, logs writes
//!
//!   MissingGitStore   git not on PATH, every call fails
//! ```
//!
//! **`GitCliStore`** shells out to `git config` and is the only store that
//! touches real configuration.

pub mod backend;
pub mod memory;

pub use backend::{ConfigStore, GitCliStore, Unset};
pub use memory::{DryRunStore, MemoryStore, MissingGitStore};

use tracing::error;

/// The global configuration store, or [`MissingGitStore`] if `git` cannot be
/// found. The lookup failure is logged.
#[must_use]
pub fn global_store() -> Box<dyn ConfigStore> {
    match GitCliStore::global() {
        Ok(store) => Box::new(store),
        Err(e) => {
            error!("{e}");
            Box::new(MissingGitStore)
        }
    }
}
