// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run configuration.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. --config FILE (TOML)
//! 3. INPUT_* env vars (CI action inputs)
//! 4. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! INPUT_SERVER=https://git.example.com → server
//! INPUT_ORG=acme                       → org
//! INPUT_API_TOKEN=...                  → api_token
//! INPUT_USE_INCLUDE=false              → use_include
//! INPUT_INCLUDE_FILE=/path             → include_file
//! ```
//!
//! Empty values count as unset.

pub mod loader;


use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::install::InstallMode;

use loader::ConfigLoader;

/// Environment variable prefix for action inputs.
pub const ENV_PREFIX: &str = "INPUT";

/// File name of the include file inside the home directory.
pub const INCLUDE_FILE_NAME: &str = ".git-mirrors";

/// Raw configuration as read from all sources.
///
/// Unknown keys are ignored because CI runners export every action input
/// under the same prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the hosting API.
    pub server: Option<String>,
    /// Organization whose repositories are listed.
    pub org: Option<String>,
    /// API token; requests are unauthenticated without it.
    pub api_token: Option<String>,
    /// `"false"` selects direct mode, anything else the include file.
    pub use_include: Option<String>,
    /// Include file location, defaults to `~/.git-mirrors`.
    pub include_file: Option<PathBuf>,
}

/// Validated inputs of the install command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSettings {
    pub server: String,
    pub org: String,
    pub api_token: Option<String>,
    pub mode: InstallMode,
}

impl Config {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Server URL, if set to a non-empty value.
    #[must_use]
    pub fn server(&self) -> Option<&str> {
        non_empty(self.server.as_deref())
    }

    /// Organization, if set to a non-empty value.
    #[must_use]
    pub fn org(&self) -> Option<&str> {
        non_empty(self.org.as_deref())
    }

    /// API token, if set to a non-empty value.
    #[must_use]
    pub fn api_token(&self) -> Option<&str> {
        non_empty(self.api_token.as_deref())
    }

    /// Whether rules go into the include file.
    ///
    /// Only a case-insensitive `"false"` disables it.
    #[must_use]
    pub fn use_include(&self) -> bool {
        self.use_include
            .as_deref()
            .is_none_or(|value| !value.trim().eq_ignore_ascii_case("false"))
    }

    /// Resolve the include file path against the given home directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if neither an explicit path nor a
    /// home directory is available.
    pub fn include_file(&self, home: Option<&Path>) -> std::result::Result<PathBuf, ConfigError> {
        if let Some(path) = &self.include_file
            && !path.as_os_str().is_empty()
        {
            return Ok(path.clone());
        }
        home.map(|home| home.join(INCLUDE_FILE_NAME))
            .ok_or_else(|| missing("include_file"))
    }

    /// Validate the inputs needed to install rewrite rules.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` for a missing server or organization,
    /// or when the include file cannot be located in include mode.
    pub fn rewrite_settings(
        &self,
        home: Option<&Path>,
    ) -> std::result::Result<RewriteSettings, ConfigError> {
        let server = self.server().ok_or_else(|| missing("server"))?;
        let org = self.org().ok_or_else(|| missing("org"))?;
        let mode = if self.use_include() {
            InstallMode::IncludeFile(self.include_file(home)?)
        } else {
            InstallMode::Direct
        };

        Ok(RewriteSettings {
            server: server.to_string(),
            org: org.to_string(),
            api_token: self.api_token().map(str::to_string),
            mode,
        })
    }

    /// Format configuration options for display.
    ///
    /// The API token is shown as `[hidden]`.
    #[must_use]
    pub fn format_options(&self, home: Option<&Path>) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("server", self.server().unwrap_or_default().to_string());
        options.insert("org", self.org().unwrap_or_default().to_string());
        options.insert(
            "api_token",
            self.api_token()
                .map_or_else(String::new, |_| "[hidden]".to_string()),
        );
        options.insert("use_include", self.use_include().to_string());
        options.insert(
            "include_file",
            self.include_file(home)
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

/// Home directory from `HOME`, empty counts as unset.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn missing(key: &str) -> ConfigError {
    ConfigError::MissingKey {
        key: key.to_string(),
        env: format!("{ENV_PREFIX}_{}", key.to_ascii_uppercase()),
    }
}
