mod cli;
mod commands;
mod config;
mod data;
mod logging;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands, StepsCommands};
use config::{ensure_dirs, LogLevel, UserConfig};
use logging::LogMode;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let config = UserConfig::load();
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);

    match cli.command {
        Some(Commands::Steps { command }) => {
            let mode = steps_log_mode(command.as_ref());
            let _guard = logging::init(config.log_level, mode, log_level_override);
            commands::steps::run(command, &config)
        }
        Some(Commands::Meal { command }) => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::log::run_meal(command)
        }
        Some(Commands::Activity { command }) => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::log::run_activity(command, &config)
        }
        Some(Commands::Balance { date, json }) => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::balance::run(date, json, &config)
        }
        Some(Commands::Supplements { command }) => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::supplements::run(command, &config)
        }
        Some(Commands::Route { command }) => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::route::run(command)
        }
        Some(Commands::Config {
            path,
            reset,
            edit,
            set,
        }) => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::config::run(path, reset, edit, set)
        }
        Some(Commands::Logs {
            lines,
            follow,
            list,
            date,
        }) => commands::logs::run(lines, follow, list, date),
        None => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::balance::run(None, false, &config)?;
            println!();
            commands::steps::run(Some(StepsCommands::Show), &config)
        }
    }
}

/// Feeding keeps a file trail for `stride logs`. With `--json` the events go
/// only to the file so stdout can be piped.
fn steps_log_mode(command: Option<&StepsCommands>) -> LogMode {
    match command {
        Some(StepsCommands::Feed { json: true, .. }) => LogMode::File,
        Some(StepsCommands::Feed { .. }) => LogMode::Both,
        _ => LogMode::Stderr,
    }
}
