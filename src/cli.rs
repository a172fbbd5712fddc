//! Command-line interface

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use num_bigint::BigInt;

use crate::attack::{self, AttackRequest};
use crate::error::{InputError, SolverError};
use crate::math::parse_integer;
use crate::oracle::factordb::{DEFAULT_ORACLE_URL, DEFAULT_TIMEOUT_SECS};
use crate::oracle::{Disabled, FactorDb, FactorOracle, KnownFactors, OracleConfig, PrimeFactorization};
use crate::present;
use crate::types::{AttackVariant, Field, RsaParameters};

#[derive(Parser, Debug)]
#[command(name = "rsa_solver")]
#[command(author = "rsa_solver Contributors")]
#[command(version = "1.0.0")]
#[command(
    about = "Recover RSA plaintext from weak keys",
    long_about = "Recover RSA plaintext from weak keys\n\nRun without --attack to choose from a menu. Inputs not given as flags are prompted for.\nNumbers may be decimal or 0x-prefixed hexadecimal."
)]
pub struct Cli {
    /// Launch TUI mode (terminal interface)
    #[arg(long)]
    pub tui: bool,

    /// Attack to run, by menu index (1-4)
    #[arg(short, long)]
    pub attack: Option<usize>,

    /// List the available attacks
    #[arg(long)]
    pub list: bool,

    /// Prime p
    #[arg(short = 'p')]
    pub p: Option<String>,

    /// Prime q
    #[arg(short = 'q')]
    pub q: Option<String>,

    /// Modulus n
    #[arg(short = 'n')]
    pub n: Option<String>,

    /// Public exponent e
    #[arg(short = 'e')]
    pub e: Option<String>,

    /// Ciphertext c
    #[arg(short = 'c')]
    pub c: Option<String>,

    /// First broadcast modulus
    #[arg(long)]
    pub n1: Option<String>,

    /// Second broadcast modulus
    #[arg(long)]
    pub n2: Option<String>,

    /// Third broadcast modulus
    #[arg(long)]
    pub n3: Option<String>,

    /// Ciphertext under n1
    #[arg(long)]
    pub c1: Option<String>,

    /// Ciphertext under n2
    #[arg(long)]
    pub c2: Option<String>,

    /// Ciphertext under n3
    #[arg(long)]
    pub c3: Option<String>,

    /// Known prime factor of n as PRIME or PRIME^K (repeatable); skips the oracle
    #[arg(long = "factor", value_name = "PRIME[^K]")]
    pub factors: Vec<String>,

    /// Never contact the factor oracle
    #[arg(long)]
    pub offline: bool,

    /// Base URL of the factordb service
    #[arg(long, env = "RSA_SOLVER_ORACLE_URL", default_value = DEFAULT_ORACLE_URL)]
    pub oracle_url: String,

    /// Oracle request timeout in seconds
    #[arg(long, env = "RSA_SOLVER_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Do not ask the oracle to factor an unresolved modulus and retry
    #[arg(long)]
    pub no_retry: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Field values supplied as flags.
    pub fn preset_parameters(&self) -> Result<RsaParameters, InputError> {
        let supplied = [
            (Field::P, &self.p),
            (Field::Q, &self.q),
            (Field::N, &self.n),
            (Field::E, &self.e),
            (Field::C, &self.c),
            (Field::N1, &self.n1),
            (Field::N2, &self.n2),
            (Field::N3, &self.n3),
            (Field::C1, &self.c1),
            (Field::C2, &self.c2),
            (Field::C3, &self.c3),
        ];

        let mut params = RsaParameters::new();
        for (field, raw) in supplied {
            if let Some(raw) = raw {
                params.set(field, field.parse(raw)?)?;
            }
        }
        Ok(params)
    }

    pub fn oracle_config(&self) -> OracleConfig {
        OracleConfig {
            base_url: self.oracle_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            retry_unresolved: !self.no_retry,
        }
    }

    /// `--factor` beats `--offline`, which beats the network client.
    pub fn oracle(&self) -> Result<Box<dyn FactorOracle>, InputError> {
        if !self.factors.is_empty() {
            let factors = self
                .factors
                .iter()
                .map(|f| parse_factor(f))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Box::new(KnownFactors(PrimeFactorization::complete(factors))));
        }
        if self.offline {
            return Ok(Box::new(Disabled));
        }
        Ok(Box::new(FactorDb::new(self.oracle_config())))
    }
}

/// Parse `PRIME` or `PRIME^K`.
pub fn parse_factor(raw: &str) -> Result<(BigInt, u32), InputError> {
    let invalid = || InputError::InvalidFactor(raw.to_string());
    let (prime, exponent) = match raw.split_once('^') {
        Some((prime, k)) => (prime, k.trim().parse::<u32>().map_err(|_| invalid())?),
        None => (raw, 1),
    };
    let prime = parse_integer(prime).ok_or_else(invalid)?;
    if prime <= BigInt::from(1) || exponent == 0 {
        return Err(invalid());
    }
    Ok((prime, exponent))
}

/// Line-oriented menu and prompts over any reader and writer.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok((read > 0).then_some(line))
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Print the menu and read a choice. `None` means the operator quit.
    pub fn select_variant(&mut self) -> anyhow::Result<Option<AttackVariant>> {
        writeln!(self.output, "Choose an attack:")?;
        for variant in AttackVariant::ALL {
            writeln!(self.output, " {}/ {}", variant.index(), variant.name())?;
        }
        self.prompt("> ")?;

        let Some(choice) = self.read_line()? else {
            return Ok(None);
        };
        if matches!(choice.trim(), "q" | "quit" | "exit") {
            return Ok(None);
        }
        let variant = AttackVariant::from_choice(&choice).map_err(SolverError::from)?;
        Ok(Some(variant))
    }

    /// Prompt for every field of `variant` not already in `params`.
    pub fn collect(
        &mut self,
        variant: AttackVariant,
        params: &mut RsaParameters,
    ) -> anyhow::Result<()> {
        while let Some(field) = params.missing(variant) {
            self.prompt(&format!("{}: ", field.label()))?;
            let line = self.read_line()?.unwrap_or_default();
            let value = field.parse(&line).map_err(SolverError::from)?;
            params.set(field, value).map_err(SolverError::from)?;
        }
        Ok(())
    }

    /// One full invocation: select, collect, compute, present.
    pub fn run(
        &mut self,
        cli: &Cli,
        oracle: &dyn FactorOracle,
    ) -> anyhow::Result<()> {
        let variant = match cli.attack {
            Some(index) => AttackVariant::from_index(index)
                .ok_or_else(|| SolverError::from(InputError::InvalidSelection(index.to_string())))?,
            None => match self.select_variant()? {
                Some(variant) => variant,
                None => return Ok(()),
            },
        };

        let mut params = cli.preset_parameters().map_err(SolverError::from)?;
        self.collect(variant, &mut params)?;

        let request = AttackRequest::from_parameters(variant, &params).map_err(SolverError::from)?;
        let recovery = attack::run(&request, oracle).map_err(SolverError::from)?;

        writeln!(self.output)?;
        for line in present::render(&recovery) {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }
}

pub fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    if cli.list {
        list_attacks();
        return Ok(());
    }

    let oracle = cli.oracle().map_err(SolverError::from)?;
    let stdin = std::io::stdin();
    let mut session = Session::new(stdin.lock(), std::io::stdout());
    session.run(cli, oracle.as_ref())
}

fn list_attacks() {
    println!("\nSupported attacks:\n");
    for variant in AttackVariant::ALL {
        let fields: Vec<&str> = variant.fields().iter().map(|f| f.label()).collect();
        println!("  {}  {:45} [{}]", variant.index(), variant.name(), fields.join(", "));
    }
    println!();
}
