//! `trustcheck config` - Configuration file management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::{self, mask_key};
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
        ConfigCommands::Init { force } => {
            config::init(&ctx.config_path, force)?;
            println!(
                "{} Wrote {}",
                "Success:".green().bold(),
                ctx.config_path.display()
            );
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    config.intel.safe_browsing_key = config.intel.safe_browsing_key.as_deref().map(mask_key);
    config.intel.virustotal_key = config.intel.virustotal_key.as_deref().map(mask_key);

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&config)?),
        OutputFormat::Pretty => {
            println!("{}", "Current Configuration:".bold());
            println!("{}", format!("({})", ctx.config_path.display()).dimmed());
            println!();

            let unset = || "(not set)".dimmed().to_string();
            println!("  {} {}s", "probe_budget_secs:".bold(), config.probe_budget_secs);
            println!("  {} {}s", "http_timeout_secs:".bold(), config.http_timeout_secs);
            println!("  {} {}", "user_agent:".bold(), config.user_agent);
            println!("  {} {}", "whois_server:".bold(), config.whois_server);
            println!("  {} {}", "whois_follow:".bold(), config.whois_follow);
            println!(
                "  {} {}",
                "intel.safe_browsing_key:".bold(),
                config.intel.safe_browsing_key.unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "intel.virustotal_key:".bold(),
                config.intel.virustotal_key.unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "intel.requests_per_second:".bold(),
                config.intel.requests_per_second
            );
        }
    }

    Ok(())
}
