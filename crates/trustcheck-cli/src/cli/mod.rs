//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands, ConfigArgs, ConfigCommands};
use clap::Parser;
use trustcheck::EngineConfig;

use crate::config;
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_json);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = config::path(cli.config.as_deref())?;
    // `config init` must work even when the existing file is unreadable
    let mut engine_config = match &cli.command {
        Commands::Config(ConfigArgs {
            command: ConfigCommands::Init { .. },
        }) => EngineConfig::default(),
        _ => config::load(&config_path)?,
    };

    // Flags and env vars override the file
    if let Some(key) = cli.safe_browsing_key {
        engine_config.intel.safe_browsing_key = Some(key);
    }
    if let Some(key) = cli.virustotal_key {
        engine_config.intel.virustotal_key = Some(key);
    }

    let ctx = commands::Context {
        config: engine_config,
        config_path,
        output_format: cli.format.unwrap_or_default(),
    };

    match cli.command {
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Normalize(args) => commands::normalize::execute(&ctx, &args),
        Commands::Config(args) => commands::config::execute(&ctx, args),
    }
}
