// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Command Dispatch
//!   Install (default) | Cleanup | Options | Version
//! ```

use std::process::ExitCode;

use mirror_rewrite::cli::global::GlobalOptions;
use mirror_rewrite::cli::install::InstallArgs;
use mirror_rewrite::cli::{self, Command};
use mirror_rewrite::cmd::cleanup::run_cleanup_command;
use mirror_rewrite::cmd::config::run_options_command;
use mirror_rewrite::cmd::install::run_install_command;
use mirror_rewrite::config::ENV_PREFIX;
use mirror_rewrite::config::loader::ConfigLoader;
use mirror_rewrite::logging::init_logging;
use mirror_rewrite::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let dry = cli.global.dry;
    let result = match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Options(args)) => {
            let loader = build_config_loader(&cli.global, args.to_config_overrides());
            let files = loader.loaded_files();
            loader
                .build()
                .map(|config| run_options_command(&config, &files))
        }
        Some(Command::Install(args)) => install(&cli.global, args, dry).await,
        Some(Command::Cleanup(args)) => {
            build_config_loader(&cli.global, args.to_config_overrides())
                .build()
                .and_then(|config| run_cleanup_command(&config, dry))
                .map(|_| ())
        }
        None => install(&cli.global, &InstallArgs::default(), dry).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn install(
    global: &GlobalOptions,
    args: &InstallArgs,
    dry: bool,
) -> mirror_rewrite::error::Result<()> {
    let config = build_config_loader(global, args.to_config_overrides()).build()?;
    run_install_command(&config, dry).await?;
    Ok(())
}

fn build_config_loader(global: &GlobalOptions, overrides: Vec<(&str, String)>) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &global.config {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in overrides {
        loader = loader.set(key, value);
    }
    loader
}
