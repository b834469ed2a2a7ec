// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install and cleanup arguments.
//!
//! Every flag is optional and overrides the matching `INPUT_*` variable.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `install` and `options` commands.
#[derive(Debug, Clone, Default, Args)]
pub struct InstallArgs {
    /// Base URL of the hosting server (INPUT_SERVER).
    #[arg(short = 's', long, value_name = "URL")]
    pub server: Option<String>,

    /// Organization to scan (INPUT_ORG).
    #[arg(short = 'o', long, value_name = "ORG")]
    pub org: Option<String>,

    /// Write rules straight into the global config (INPUT_USE_INCLUDE=false).
    #[arg(long = "no-include")]
    pub no_include: bool,

    /// Include file location (INPUT_INCLUDE_FILE), default ~/.git-mirrors.
    #[arg(long = "include-file", value_name = "FILE")]
    pub include_file: Option<PathBuf>,
}

impl InstallArgs {
    /// Converts flags to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(server) = &self.server {
            overrides.push(("server", server.clone()));
        }
        if let Some(org) = &self.org {
            overrides.push(("org", org.clone()));
        }
        if self.no_include {
            overrides.push(("use_include", "false".to_string()));
        }
        if let Some(path) = &self.include_file {
            overrides.push(("include_file", path.display().to_string()));
        }
        overrides
    }
}

/// Arguments for the `cleanup` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CleanupArgs {
    /// Include file location (INPUT_INCLUDE_FILE), default ~/.git-mirrors.
    #[arg(long = "include-file", value_name = "FILE")]
    pub include_file: Option<PathBuf>,
}

impl CleanupArgs {
    /// Converts flags to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        self.include_file
            .iter()
            .map(|path| ("include_file", path.display().to_string()))
            .collect()
    }
}
