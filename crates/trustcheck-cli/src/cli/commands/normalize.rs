//! `trustcheck normalize` - Show how an input is canonicalized.

use anyhow::Result;
use colored::Colorize;
use trustcheck::Target;

use super::Context;
use crate::cli::args::NormalizeArgs;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: &NormalizeArgs) -> Result<()> {
    let target = match Target::parse(&args.url) {
        Ok(target) => target,
        Err(e) => anyhow::bail!("{}: {}", e, e.hint()),
    };

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&target)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&target)?),
        OutputFormat::Pretty => {
            println!("  {} {}", "URL:".bold(), target.canonical_url().cyan());
            println!("  {} {}", "Domain:".bold(), target.host());
        }
    }

    Ok(())
}
