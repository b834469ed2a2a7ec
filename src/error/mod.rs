// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            MirrorError (16 bytes)
//!                     |
//!   +-------+-------+-------+
//!   |       |       |       |
//!   v       v       v       v
//! Network  Git    Config    Fs
//!   Box    Box     Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Network Reqwest, HttpError, Decode
//!   Git     ExecutableNotFound, SpawnFailed, CommandFailed
//!   Config  Load, MissingKey
//!   Fs      NotFound, IoError
//! ```
//!
//! Fatal vs. recoverable is decided by the caller: a `Network` error during
//! listing ends the run, a `Git`/`Fs` error while writing one rule is logged.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`MirrorError`].
pub type MirrorResult<T> = std::result::Result<T, MirrorError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at two words on the stack.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Hosting API request failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Git configuration command failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for MirrorError {
                fn from(err: $error) -> Self {
                    MirrorError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    NetworkError => Network,
    GitError => Git,
    ConfigError => Config,
    FsError => Fs,
}

// --- Network Errors ---

/// Hosting API errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Non-success HTTP response.
    #[error("http error {status}: {url}: {body}")]
    HttpError {
        status: u16,
        url: String,
        body: String,
    },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Response body was not a repository list.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

// --- Git Errors ---

/// Git configuration command errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// `git` is not on PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn git.
    #[error("failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Git exited with a non-zero status.
    #[error("git command failed: {command} (exit code {code}) - {message}")]
    CommandFailed {
        command: String,
        code: i32,
        message: String,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to assemble configuration sources.
    #[error("failed to load configuration: {0}")]
    Load(String),

    /// Missing required input.
    #[error("missing required input '{key}' (set {env})")]
    MissingKey { key: String, env: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.display().to_string())
        } else {
            Self::IoError {
                path: path.display().to_string(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests;
