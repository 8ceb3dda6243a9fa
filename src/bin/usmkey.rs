//! usmkey: SNMPv3 USM key derivation and KeyChange encoding.
//!
//! Prints keys and KeyChange values as lowercase hex on stdout.

use clap::Parser;
use snmp_usm_keys::KeyTools;
use snmp_usm_keys::cli::{
    self,
    args::{Command, LogArgs},
};
use std::process::ExitCode;

/// Derive, localize and extend SNMPv3 USM keys.
#[derive(Debug, Parser)]
#[command(name = "usmkey", version, about)]
struct Args {
    #[command(flatten)]
    log: LogArgs,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let args = Args::parse();

    args.log.init_tracing();

    match cli::run(KeyTools::shared(), &args.command) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
