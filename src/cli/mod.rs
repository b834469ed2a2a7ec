// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! mirror-rewrite [global options] [command]
//! install    (default) list mirrors, write insteadOf rules
//! cleanup    drop include.path entry, delete include file
//! options    print the resolved inputs
//! version
//! ```

pub mod global;
pub mod install;


use crate::cli::global::GlobalOptions;
use crate::cli::install::{CleanupArgs, InstallArgs};
use clap::{Parser, Subcommand};

/// Redirects Git URLs of an organization's mirror repositories.
#[derive(Debug, Parser)]
#[command(
    name = "mirror-rewrite",
    author,
    version,
    about = "Install insteadOf rewrites for mirror repositories",
    long_about = "Lists the repositories of an organization on a Gitea/Forgejo server,\n\
                  keeps the mirrors and installs one `url.<url>.insteadOf` rule per\n\
                  mirror, either in the global Git configuration or in an include\n\
                  file (~/.git-mirrors) referenced from it. `cleanup` reverses the\n\
                  include file setup.",
    after_help = "INPUTS:\n\n\
                  Inputs are read from INPUT_SERVER, INPUT_ORG, INPUT_API_TOKEN,\n\
                  INPUT_USE_INCLUDE and INPUT_INCLUDE_FILE, the way CI runners pass\n\
                  action inputs. A TOML file given with --config is loaded first;\n\
                  command-line flags override both."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute, `install` if omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists the resolved inputs.
    Options(InstallArgs),

    /// Installs rewrite rules for all mirror repositories.
    Install(InstallArgs),

    /// Removes the include file and its include.path entry.
    Cleanup(CleanupArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
