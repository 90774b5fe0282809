//! Devscan: reports frontend dev servers listening on local TCP ports.
//!
//! This is the entry point of the tool. It shells out to the operating
//! system's socket and process utilities, maps listening ports to processes,
//! matches those processes against frontend tooling markers (Webpack, Vite,
//! Next.js, ...), and prints one report block per match.

mod classify;
mod manifest;
mod probe;
mod report;
mod scan;
mod shell;
mod unix;
mod windows;

use std::io;
use std::process::ExitCode;

use clap::Parser;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(
    name = "devscan",
    version,
    about = "Detect running frontend dev servers"
)]
struct Cli {
    /// Log skipped processes and external command failures to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let os = std::env::consts::OS;
    let probe = probe::probe_for_os(os);
    let mut stdout = io::stdout().lock();
    match scan::run(probe.as_ref(), os, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("scan failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
