// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              install / cleanup
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  INPUT_* env, TOML, flags |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              install     cleanup   forge
//!             (rules)    (reversal)  HTTP pages
//!                 |           |
//!                 +-----+-----+
//!                       v
//!               git (ConfigStore)   mirror
//!               git config CLI      URL normalize
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cleanup;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod forge;
pub mod git;
pub mod install;
pub mod logging;
pub mod mirror;
