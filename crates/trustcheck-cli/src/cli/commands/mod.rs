//! Command implementations.

pub mod check;
pub mod config;
pub mod normalize;

use std::path::PathBuf;

use trustcheck::EngineConfig;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective engine configuration (file plus overrides)
    pub config: EngineConfig,

    /// Where the config file lives
    pub config_path: PathBuf,

    /// Output format
    pub output_format: OutputFormat,
}
