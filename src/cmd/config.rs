// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands.

use std::path::PathBuf;

use crate::config::{Config, home_dir};

/// Display resolved inputs and the files they were loaded from.
pub fn run_options_command(config: &Config, files: &[(String, PathBuf)]) {
    for (i, (source, path)) in files.iter().enumerate() {
        println!("# {}. [{source}] {}", i + 1, path.display());
    }
    for line in config.format_options(home_dir().as_deref()) {
        println!("{line}");
    }
}
