// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `cleanup` command.

use crate::cleanup::{CleanupReport, run_cleanup};
use crate::config::{Config, home_dir};
use crate::error::Result;
use crate::git::{DryRunStore, global_store};

/// Run the cleanup command against the global Git configuration.
///
/// A missing `git` executable is logged and only fails the `include.path`
/// step; the include file is still deleted.
///
/// # Errors
///
/// Returns an error if the include file location cannot be determined.
pub fn run_cleanup_command(config: &Config, dry: bool) -> Result<CleanupReport> {
    let include_file = config.include_file(home_dir().as_deref())?;
    let store = global_store();

    let report = if dry {
        run_cleanup(&include_file, DryRunStore::new(&*store), true)
    } else {
        run_cleanup(&include_file, &*store, false)
    };
    Ok(report)
}
