// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stores that do not touch real configuration.

use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::info;

use super::backend::{ConfigStore, Unset};
use crate::error::{GitError, MirrorError, MirrorResult};

/// In-memory multi-valued configuration.
///
/// Records every mutating call and can be told to fail writes to keys with
/// a given prefix.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, Vec<String>>>,
    calls: RefCell<Vec<String>>,
    failing: RefCell<Vec<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes to keys starting with `prefix` fail.
    pub fn fail_writes_to(&self, prefix: impl Into<String>) {
        self.failing.borrow_mut().push(prefix.into());
    }

    /// Current values of `key`.
    #[must_use]
    pub fn values(&self, key: &str) -> Vec<String> {
        self.values.borrow().get(key).cloned().unwrap_or_default()
    }

    /// Mutating calls in order, formatted like `git config` arguments.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn write(&self, call: String, key: &str) -> MirrorResult<()> {
        if self.failing.borrow().iter().any(|p| key.starts_with(p.as_str())) {
            return Err(GitError::CommandFailed {
                command: call,
                code: 255,
                message: format!("error: could not lock config file for {key}"),
            }
            .into());
        }
        self.calls.borrow_mut().push(call);
        Ok(())
    }
}

impl ConfigStore for MemoryStore {
    fn get_all(&self, key: &str) -> MirrorResult<Vec<String>> {
        Ok(self.values(key))
    }

    fn add_value(&self, key: &str, value: &str) -> MirrorResult<()> {
        self.write(format!("--add {key} {value}"), key)?;
        self.values
            .borrow_mut()
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        Ok(())
    }

    fn set_value(&self, key: &str, value: &str) -> MirrorResult<()> {
        let call = format!("{key} {value}");
        if self.values(key).len() > 1 {
            return Err(GitError::CommandFailed {
                command: call,
                code: 5,
                message: "warning: cannot overwrite multiple values with a single value".to_string(),
            }
            .into());
        }
        self.write(call, key)?;
        self.values
            .borrow_mut()
            .insert(key.to_string(), vec![value.to_string()]);
        Ok(())
    }

    fn unset_all(&self, key: &str, value: Option<&str>) -> MirrorResult<Unset> {
        let call = value.map_or_else(
            || format!("--unset-all {key}"),
            |v| format!("--fixed-value --unset-all {key} {v}"),
        );
        self.write(call, key)?;

        let mut values = self.values.borrow_mut();
        let Some(current) = values.get_mut(key) else {
            return Ok(Unset::NotFound);
        };
        let before = current.len();
        current.retain(|v| value.is_some_and(|wanted| v != wanted));
        let removed = before != current.len();
        if current.is_empty() {
            values.remove(key);
        }
        Ok(if removed { Unset::Removed } else { Unset::NotFound })
    }
}

/// Reads from the wrapped store and only logs writes.
#[derive(Debug)]
pub struct DryRunStore<S> {
    inner: S,
}

impl<S: ConfigStore> DryRunStore<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: ConfigStore> ConfigStore for DryRunStore<S> {
    fn get_all(&self, key: &str) -> MirrorResult<Vec<String>> {
        self.inner.get_all(key)
    }

    fn add_value(&self, key: &str, value: &str) -> MirrorResult<()> {
        info!("[dry run] git config --add {key} {value}");
        Ok(())
    }

    fn set_value(&self, key: &str, value: &str) -> MirrorResult<()> {
        info!("[dry run] git config {key} {value}");
        Ok(())
    }

    fn unset_all(&self, key: &str, value: Option<&str>) -> MirrorResult<Unset> {
        info!(
            "[dry run] git config --unset-all {key} {}",
            value.unwrap_or_default()
        );
        let current = self.inner.get_all(key)?;
        let matched = match value {
            Some(wanted) => current.iter().any(|v| v == wanted),
            None => !current.is_empty(),
        };
        Ok(if matched { Unset::Removed } else { Unset::NotFound })
    }
}

/// Stand-in when `git` is not on PATH; every call fails with
/// `GitError::ExecutableNotFound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingGitStore;

impl MissingGitStore {
    fn error() -> MirrorError {
        GitError::ExecutableNotFound {
            name: "git".to_string(),
        }
        .into()
    }
}

impl ConfigStore for MissingGitStore {
    fn get_all(&self, _key: &str) -> MirrorResult<Vec<String>> {
        Err(Self::error())
    }

    fn add_value(&self, _key: &str, _value: &str) -> MirrorResult<()> {
        Err(Self::error())
    }

    fn set_value(&self, _key: &str, _value: &str) -> MirrorResult<()> {
        Err(Self::error())
    }

    fn unset_all(&self, _key: &str, _value: Option<&str>) -> MirrorResult<Unset> {
        Err(Self::error())
    }
}
