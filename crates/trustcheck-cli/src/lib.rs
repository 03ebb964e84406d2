//! # trustcheck-cli
//!
//! Command-line front end for the trustcheck engine.
//!
//! ## Features
//!
//! - **Assess**: score one or more websites and explain the result
//! - **Normalize**: show how an input is canonicalized before probing
//! - **Config**: inspect and create the TOML configuration file
//! - **Multiple output formats**: Pretty tables, JSON, YAML

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
