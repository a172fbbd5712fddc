//! rsa_solver - RSA weak-key plaintext recovery
//!
//! Recovers an RSA plaintext when the key is weak: both primes known, the
//! modulus already factored in factordb, the same message broadcast under
//! e = 3, or a private exponent small enough for Wiener's attack.

mod attack;
mod cli;
mod error;
mod math;
mod oracle;
mod present;
mod types;

#[cfg(feature = "tui")]
mod tui;

use clap::Parser;

use crate::cli::Cli;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    #[cfg(feature = "tui")]
    if cli.tui {
        if let Err(e) = tui::run_tui(&cli) {
            eprintln!("TUI Error: {}", e);
            std::process::exit(error::exit_code_for(&e));
        }
        return;
    }

    #[cfg(not(feature = "tui"))]
    if cli.tui {
        eprintln!("TUI feature not enabled. Rebuild with --features tui");
        std::process::exit(error::EXIT_INVALID_INPUT);
    }

    if let Err(e) = cli::run_cli(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(error::exit_code_for(&e));
    }
}
