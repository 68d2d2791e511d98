//! Main entry point for the `lsv` CLI application.
//!
//! `lsv` lists the visible entries of a directory in one of four layouts.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Installs a stderr `tracing` subscriber filtered by `LSV_LOG`
//! - Hands the resolved [`lsv::ListingRequest`] to [`lsv::run`]
//! - Maps the outcome to an exit status
//!
//! # Exit Status
//! - `0`: everything was listed
//! - `1`: some sub-directory of a `-R` run could not be read
//! - `2`: the root path could not be listed, or a usage error

use anyhow::{Context, Result};
use clap::Parser;
use lsv::{Args, ListingError};
use std::io::{self, BufWriter, ErrorKind};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const PARTIAL_FAILURE: u8 = 1;
const FATAL_FAILURE: u8 = 2;

fn setup_logging() {
    let filter = EnvFilter::try_from_env("LSV_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn report(err: &ListingError) {
    eprintln!("lsv: {}", err);
}

fn list(args: &Args) -> Result<ExitCode> {
    let request = args.request();
    let options = args.render_options();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match lsv::run(&request, &options, &mut out, &mut report) {
        Ok(summary) if summary.is_clean() => Ok(ExitCode::SUCCESS),
        Ok(_) => Ok(ExitCode::from(PARTIAL_FAILURE)),
        Err(ListingError::Output(e)) if e.kind() == ErrorKind::BrokenPipe => Ok(ExitCode::SUCCESS),
        Err(e @ ListingError::Output(_)) => {
            Err(e).with_context(|| format!("failed to write listing of '{}'", request.path.display()))
        }
        Err(e) => {
            report(&e);
            Ok(ExitCode::from(FATAL_FAILURE))
        }
    }
}

fn main() -> ExitCode {
    // clap exits with status 2 on usage errors
    let args = Args::parse();
    setup_logging();

    match list(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("lsv: {:#}", e);
            ExitCode::from(FATAL_FAILURE)
        }
    }
}
