//! Console app that loads a movie dataset and lists films by running time.

mod backend;
mod config;
mod error;
mod frontend;
mod movie;

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::backend::Backend;
use crate::config::Config;
use crate::frontend::Frontend;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(&config.log_filter)?;

    let mut backend = Backend::new();
    if let Some(path) = &config.file {
        backend
            .read_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
    }

    let mut frontend = Frontend::new(backend, io::stdin().lock(), io::stdout().lock());
    if config.file.is_some() {
        frontend.greet()?;
        frontend.prompt_loop()?;
    } else {
        frontend.run()?;
    }
    Ok(())
}

/// Logs to stderr so they never interleave with the dialogue on stdout.
fn init_tracing(fallback: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback).with_context(|| format!("invalid log filter `{fallback}`"))?,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
    Ok(())
}
