//! mxmeta CLI.

use clap::{ColorChoice, Parser};
use mxmeta_cli::logging::{LogConfig, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_extract, run_vocab};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Extract(args) => match run_extract(&args) {
            Ok(tree) => {
                if tree.is_empty() {
                    tracing::warn!(file = %args.file.display(), "no metadata extracted");
                }
                0
            }
            Err(error) => {
                tracing::error!(file = %args.file.display(), "{error:#}");
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Vocab(args) => match run_vocab(&args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// `--log-level` beats `-v`/`-q`, and either one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let level = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        use_env_filter: !explicit,
        with_ansi,
        ..LogConfig::default()
    }
    .with_level(level)
    .with_format(cli.log_format.into())
    .with_log_file(cli.log_file.clone())
}
