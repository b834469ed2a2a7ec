// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args + Config --> cmd::run_* handlers
//!   install, cleanup, options
//! ```

pub mod cleanup;
pub mod config;
pub mod install;
