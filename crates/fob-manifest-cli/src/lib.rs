//! Command-line host for `fob-manifest`.
//!
//! - [`cli`] - clap definitions
//! - [`config`] - layering CLI flags over `fob-manifest.toml` and the environment
//! - [`commands`] - `inject` and `graph`
//! - [`logger`] - tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod config;
pub mod logger;
