mod cli;
mod commands;
mod config;
mod display;
mod logging;
mod monitor;
mod source;
mod status;

use std::future::Future;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands};
use config::{LogLevel, UserConfig};
use logging::LogMode;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let mut config = UserConfig::load();
    config.merge_with_args(cli.simulate);

    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);
    let log_mode = if cli.log_file {
        LogMode::File
    } else {
        LogMode::Stderr
    };
    let _guard = logging::init(config.log_level, log_mode, log_level_override);

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => block_on(commands::watch::run(&config)),
        Commands::Status { verbose } => block_on(commands::status::run(&config, verbose)),
        Commands::Pipe { samples, compact } => {
            block_on(commands::pipe::run(&config, samples, compact))
        }
        Commands::Config { path, reset, edit } => commands::config::run(path, reset, edit),
    }
}

/// All battery state lives on a single-threaded runtime.
fn block_on<F>(future: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}
