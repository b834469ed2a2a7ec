// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rewrite rule installation.
//!
//! ```text
//! run_install(settings, store)
//!   |
//!   +-- RepoLister::list_all()     fatal on error, nothing written yet
//!   |
//!   +-- RewriteInstaller::prepare()
//!   |     Direct       no-op
//!   |     IncludeFile  create file "[include]\n" if absent
//!   |                  include.path += file (once)
//!   |
//!   +-- for each mirror: install(rule)
//!         Direct       git config --global url.<new>.insteadOf <old>
//!         IncludeFile  append [url "<new>"] block (no dedup)
//!         error        logged, next mirror
//! ```

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::config::RewriteSettings;
use crate::error::{FsError, MirrorResult};
use crate::forge::RepoLister;
use crate::git::ConfigStore;
use crate::mirror::{RewriteRule, mirrors};

/// Multi-valued key referencing the include file.
pub const INCLUDE_PATH_KEY: &str = "include.path";

/// First line of a freshly created include file.
pub const INCLUDE_HEADER: &str = "[include]\n";

/// Where rewrite rules are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallMode {
    /// One `url.<new>.insteadOf` key per rule in the global configuration.
    Direct,
    /// Blocks appended to this file, which the global configuration includes.
    IncludeFile(PathBuf),
}

/// Counters of one install run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub repositories: usize,
    pub mirrors: usize,
    pub installed: usize,
    pub failed: usize,
}

/// Writes rewrite rules through a [`ConfigStore`].
#[derive(Debug)]
pub struct RewriteInstaller<S> {
    store: S,
    mode: InstallMode,
    dry_run: bool,
}

impl<S: ConfigStore> RewriteInstaller<S> {
    pub const fn new(store: S, mode: InstallMode) -> Self {
        Self {
            store,
            mode,
            dry_run: false,
        }
    }

    /// Log file writes instead of performing them.
    ///
    /// Config writes are governed by the store; pair with `DryRunStore`.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Create the include file and reference it from the global configuration.
    ///
    /// Both steps are idempotent. Does nothing in direct mode.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if the file cannot be created, or a `GitError`
    /// if `include.path` cannot be read or written.
    pub fn prepare(&self) -> MirrorResult<()> {
        let InstallMode::IncludeFile(path) = &self.mode else {
            return Ok(());
        };

        self.ensure_include_file(path)?;

        let value = path.to_string_lossy();
        let current = self.store.get_all(INCLUDE_PATH_KEY)?;
        if current.iter().any(|v| *v == value) {
            debug!(path = %value, "include.path already present");
        } else {
            self.store.add_value(INCLUDE_PATH_KEY, &value)?;
            info!("Added include.path for {value}");
        }
        Ok(())
    }

    /// Write one rule.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` in direct mode or an `FsError` in include mode
    /// when the rule cannot be written.
    pub fn install(&self, rule: &RewriteRule) -> MirrorResult<()> {
        match &self.mode {
            InstallMode::Direct => self.store.set_value(&rule.config_key(), &rule.old_url),
            InstallMode::IncludeFile(path) => self.append(path, &rule.include_block()),
        }
    }

    fn ensure_include_file(&self, path: &Path) -> MirrorResult<()> {
        if self.dry_run {
            if !path.exists() {
                info!("[dry run] create {}", path.display());
            }
            return Ok(());
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| FsError::io(parent, e))?;
        }

        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut file) => {
                file.write_all(INCLUDE_HEADER.as_bytes())
                    .map_err(|e| FsError::io(path, e))?;
                info!("Created {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(FsError::io(path, e).into()),
        }
    }

    /// Append to an existing include file; a missing file is an error.
    fn append(&self, path: &Path, text: &str) -> MirrorResult<()> {
        if self.dry_run {
            info!("[dry run] append to {}:{}", path.display(), text.trim_end());
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| FsError::io(path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| FsError::io(path, e))?;
        Ok(())
    }
}

/// List the organization, then install one rule per mirror.
///
/// Only the listing is fatal. Failures while preparing the include file or
/// writing a rule are logged and counted; processing continues.
///
/// # Errors
///
/// Returns a `NetworkError` if any page request fails. Nothing has been
/// written at that point.
pub async fn run_install<S: ConfigStore>(
    settings: &RewriteSettings,
    store: S,
    dry_run: bool,
) -> MirrorResult<InstallReport> {
    info!(
        "Fetching repos from org: {} on {}",
        settings.org, settings.server
    );

    let lister =
        RepoLister::new(&settings.server, &settings.org).token(settings.api_token.clone());
    let repos = lister.list_all().await?;
    debug!(count = repos.len(), "repositories listed");

    let installer = RewriteInstaller::new(store, settings.mode.clone()).dry_run(dry_run);
    if let Err(e) = installer.prepare() {
        error!("Failed to prepare include file: {e}");
    }

    let mut report = InstallReport {
        repositories: repos.len(),
        ..InstallReport::default()
    };

    for (repo, rule) in mirrors(&repos) {
        report.mirrors += 1;
        info!("Mirror repo found: {}", repo.full_name);
        info!("  Adding rewrite: {} insteadOf {}", rule.new_url, rule.old_url);

        match installer.install(&rule) {
            Ok(()) => report.installed += 1,
            Err(e) => {
                report.failed += 1;
                error!(repo = %repo.full_name, "Failed to set git config: {e}");
            }
        }
    }

    info!(
        mirrors = report.mirrors,
        installed = report.installed,
        failed = report.failed,
        "Done."
    );
    Ok(report)
}
