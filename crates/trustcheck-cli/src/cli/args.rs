//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Assess how trustworthy a website looks
///
/// Runs domain, security, fraud, content, transparency and reputation
/// checks concurrently and combines them into a 0-100 trust score.
#[derive(Parser, Debug)]
#[command(name = "trustcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "TRUSTCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Google Safe Browsing API key
    #[arg(long, global = true, env = "TRUSTCHECK_SAFE_BROWSING_KEY", hide_env_values = true)]
    pub safe_browsing_key: Option<String>,

    /// VirusTotal API key
    #[arg(long, global = true, env = "TRUSTCHECK_VIRUSTOTAL_KEY", hide_env_values = true)]
    pub virustotal_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess one or more websites
    Check(CheckArgs),

    /// Show the canonical URL and host for an input
    Normalize(NormalizeArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// URLs or host names (e.g., example.com)
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Seconds each check may take before a fallback is used
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub budget: Option<u64>,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// URL or host name
    pub url: String,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_accepts_several_targets() {
        let cli = Cli::parse_from(["trustcheck", "check", "a.com", "b.com", "--budget", "5"]);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.urls, ["a.com", "b.com"]);
                assert_eq!(args.budget, Some(5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["trustcheck", "normalize", "example.com", "-vv", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }

    #[test]
    fn check_requires_a_target() {
        assert!(Cli::try_parse_from(["trustcheck", "check"]).is_err());
    }
}
