//! `trustcheck check` - Assess one or more websites.

use anyhow::Result;
use colored::Colorize;
use tracing::debug;
use trustcheck::{Target, TrustEngine, TrustError};

use super::Context;
use crate::cli::args::CheckArgs;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    let mut config = ctx.config;
    if let Some(budget) = args.budget {
        config.probe_budget_secs = budget;
    }

    // Reject bad input before any network setup
    let mut failures = 0_usize;
    let mut valid = Vec::with_capacity(args.urls.len());
    for raw in &args.urls {
        match Target::parse(raw) {
            Ok(_) => valid.push(raw.as_str()),
            Err(e) => {
                failures += 1;
                report_error(raw, &e);
            }
        }
    }

    if !valid.is_empty() {
        let engine = TrustEngine::from_config(&config)?;
        let mut reports = Vec::new();

        for (i, raw) in valid.into_iter().enumerate() {
            match engine.assess_target_until(raw, interrupted()).await {
                Ok(report) if ctx.output_format == OutputFormat::Pretty => {
                    if i > 0 {
                        println!();
                    }
                    println!("{}", output::render_pretty(&report));
                }
                Ok(report) => reports.push(report),
                Err(TrustError::Cancelled) => anyhow::bail!("Interrupted"),
                Err(e) => {
                    failures += 1;
                    report_error(raw, &e);
                }
            }
        }

        if !reports.is_empty() {
            let text = output::serialize(&reports, ctx.output_format)?;
            println!("{}", text.trim_end());
        }
    }

    if failures > 0 {
        anyhow::bail!(
            "{failures} of {} target(s) could not be assessed",
            args.urls.len()
        );
    }

    Ok(())
}

fn report_error(raw: &str, err: &TrustError) {
    debug!(input = raw, error = %err, "target rejected");
    eprintln!("{} {}: {}", "Error:".red().bold(), raw, err.hint());
}

/// Completes on Ctrl-C; never completes if the signal can't be watched
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
