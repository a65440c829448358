// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use shoplist::Cli;

/// Log filter variable; defaults to warnings only.
const LOG_ENV: &str = "SHOPLIST_LOG";

fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    setup_logging();
    let cli = Cli::parse();

    if let Some(dir) = &cli.directory {
        if let Err(e) = std::env::set_current_dir(dir) {
            eprintln!("error: cannot change to '{}': {}", dir, e);
            std::process::exit(1);
        }
    }

    if let Err(e) = shoplist::run(cli.command, cli.offline) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
