//! # appctl: platform app management CLI
//!
//! Lists, inspects, creates, renames, opens, and destroys apps on a hosted
//! application platform, keeping local git remotes in step.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

mod commands;
mod context;
mod output;
#[cfg(test)]
mod testing;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
