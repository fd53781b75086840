// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! acstream CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use acstream::cli::{Cli, Command};
use acstream::error::ExitCode;

mod cmd_dump;
mod cmd_replace;
mod cmd_search;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("ACSTREAM_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("acstream: {}", e);
            match e.downcast_ref::<acstream::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Search(args)) => cmd_search::run(&cli, args),
        Some(Command::Replace(args)) => {
            cmd_replace::run(&cli, args)?;
            Ok(ExitCode::Success)
        }
        Some(Command::Dump(args)) => {
            cmd_dump::run(&cli, args)?;
            Ok(ExitCode::Success)
        }
    }
}
