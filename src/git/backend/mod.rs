// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config store abstraction and the git CLI implementation.
//!
//! ```text
//! ConfigStore (trait) --> GitCliStore --> git config --global | --file <path>
//! ```

use crate::error::{GitError, MirrorError, MirrorResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Exit code of `git config --get-all` when the key has no value.
const EXIT_KEY_MISSING: i32 = 1;

/// Exit code of `git config --unset-all` when nothing matched.
const EXIT_NOTHING_SET: i32 = 5;

/// Outcome of [`ConfigStore::unset_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unset {
    /// At least one entry was removed.
    Removed,
    /// No entry matched.
    NotFound,
}

/// Read/write access to a Git configuration file.
///
/// Keys use git's dotted form (`include.path`, `url.<base>.insteadOf`).
pub trait ConfigStore {
    /// All values of a multi-valued key; empty if the key is not set.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the configuration cannot be read.
    fn get_all(&self, key: &str) -> MirrorResult<Vec<String>>;

    /// Append a value to a multi-valued key.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the value cannot be written.
    fn add_value(&self, key: &str, value: &str) -> MirrorResult<()>;

    /// Set a single-valued key, replacing its current value.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the value cannot be written, including when
    /// the key already holds several values.
    fn set_value(&self, key: &str, value: &str) -> MirrorResult<()>;

    /// Remove all values of `key`, or only those equal to `value` if given.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the configuration cannot be written. A key
    /// without matching values is `Ok(Unset::NotFound)`, not an error.
    fn unset_all(&self, key: &str, value: Option<&str>) -> MirrorResult<Unset>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn get_all(&self, key: &str) -> MirrorResult<Vec<String>> {
        (**self).get_all(key)
    }

    fn add_value(&self, key: &str, value: &str) -> MirrorResult<()> {
        (**self).add_value(key, value)
    }

    fn set_value(&self, key: &str, value: &str) -> MirrorResult<()> {
        (**self).set_value(key, value)
    }

    fn unset_all(&self, key: &str, value: Option<&str>) -> MirrorResult<Unset> {
        (**self).unset_all(key, value)
    }
}

/// Which configuration file `git config` operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    Global,
    File(PathBuf),
}

/// Shell-based store using the git CLI.
///
/// Every call is one `git config` process with `GCM_INTERACTIVE=never` and
/// `GIT_TERMINAL_PROMPT=0`.
#[derive(Debug, Clone)]
pub struct GitCliStore {
    git: PathBuf,
    scope: Scope,
}

impl GitCliStore {
    /// Store backed by the user's global configuration (`git config --global`).
    ///
    /// # Errors
    ///
    /// Returns `GitError::ExecutableNotFound` if `git` is not on PATH.
    pub fn global() -> MirrorResult<Self> {
        Ok(Self {
            git: find_git()?,
            scope: Scope::Global,
        })
    }

    /// Store backed by an explicit file (`git config --file <path>`).
    ///
    /// # Errors
    ///
    /// Returns `GitError::ExecutableNotFound` if `git` is not on PATH.
    pub fn with_file(path: impl AsRef<Path>) -> MirrorResult<Self> {
        Ok(Self {
            git: find_git()?,
            scope: Scope::File(path.as_ref().to_path_buf()),
        })
    }

    fn scope_args(&self) -> Vec<OsString> {
        match &self.scope {
            Scope::Global => vec!["--global".into()],
            Scope::File(path) => vec!["--file".into(), path.clone().into_os_string()],
        }
    }

    fn describe(&self, args: &[&str]) -> String {
        let scope: Vec<String> = self
            .scope_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        format!("git config {} {}", scope.join(" "), args.join(" "))
    }

    /// Run `git config <scope> <args>` and return its raw output.
    fn git_config(&self, args: &[&str]) -> MirrorResult<Output> {
        let command = self.describe(args);
        debug!(%command, "running git");

        Command::new(&self.git)
            .arg("config")
            .args(self.scope_args())
            .args(args)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|source| GitError::SpawnFailed { command, source }.into())
    }

    fn failure(&self, args: &[&str], output: &Output) -> MirrorError {
        GitError::CommandFailed {
            command: self.describe(args),
            code: output.status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into()
    }

    fn run(&self, args: &[&str]) -> MirrorResult<()> {
        let output = self.git_config(args)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(self.failure(args, &output))
        }
    }
}

impl ConfigStore for GitCliStore {
    fn get_all(&self, key: &str) -> MirrorResult<Vec<String>> {
        let args = ["--get-all", key];
        let output = self.git_config(&args)?;
        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(str::to_string)
                .collect()),
            Some(EXIT_KEY_MISSING) => Ok(Vec::new()),
            _ => Err(self.failure(&args, &output)),
        }
    }

    fn add_value(&self, key: &str, value: &str) -> MirrorResult<()> {
        self.run(&["--add", key, value])
    }

    fn set_value(&self, key: &str, value: &str) -> MirrorResult<()> {
        self.run(&[key, value])
    }

    fn unset_all(&self, key: &str, value: Option<&str>) -> MirrorResult<Unset> {
        let mut args = vec!["--unset-all", key];
        if let Some(value) = value {
            args.insert(0, "--fixed-value");
            args.push(value);
        }
        let output = self.git_config(&args)?;
        match output.status.code() {
            Some(0) => Ok(Unset::Removed),
            Some(EXIT_NOTHING_SET) => Ok(Unset::NotFound),
            _ => Err(self.failure(&args, &output)),
        }
    }
}

fn find_git() -> MirrorResult<PathBuf> {
    which::which("git").map_err(|_| {
        GitError::ExecutableNotFound {
            name: "git".to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests;
