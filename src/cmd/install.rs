// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `install` command.

use crate::config::{Config, home_dir};
use crate::error::Result;
use crate::git::{DryRunStore, global_store};
use crate::install::{InstallReport, run_install};

/// Run the install command against the global Git configuration.
///
/// A missing `git` executable is logged; every config write then fails and
/// is counted per repository. Include file appends still happen.
///
/// # Errors
///
/// Returns an error if a required input is missing or listing the
/// organization's repositories fails.
pub async fn run_install_command(config: &Config, dry: bool) -> Result<InstallReport> {
    let settings = config.rewrite_settings(home_dir().as_deref())?;
    let store = global_store();

    let report = if dry {
        run_install(&settings, DryRunStore::new(&*store), true).await?
    } else {
        run_install(&settings, &*store, false).await?
    };
    Ok(report)
}
