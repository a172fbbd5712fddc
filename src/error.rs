//! Error types and process exit codes
//!
//! Input problems at the boundary and attack failures are kept apart:
//! [`InputError`] is raised while reading numbers or a menu choice,
//! [`AttackError`] by the attacks themselves. [`SolverError`] wraps both and
//! decides the exit status.
//!
//! | code | meaning                    |
//! |------|----------------------------|
//! | 0    | success or explicit quit   |
//! | 1    | unexpected I/O failure     |
//! | 2    | invalid input              |
//! | 3    | no modular inverse         |
//! | 4    | insufficient factors       |
//! | 5    | no integer root            |
//! | 6    | Wiener attack failed       |
//! | 7    | factor oracle unavailable  |
//! | 8    | factor oracle timed out    |

use thiserror::Error;

pub const EXIT_IO: i32 = 1;
pub const EXIT_INVALID_INPUT: i32 = 2;
pub const EXIT_NO_MODULAR_INVERSE: i32 = 3;
pub const EXIT_INSUFFICIENT_FACTORS: i32 = 4;
pub const EXIT_NO_INTEGER_ROOT: i32 = 5;
pub const EXIT_WIENER_FAILED: i32 = 6;
pub const EXIT_ORACLE_UNAVAILABLE: i32 = 7;
pub const EXIT_ORACLE_TIMEOUT: i32 = 8;

/// Malformed or out-of-range entry at the system boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("{field} must be {requirement}")]
    OutOfRange {
        field: String,
        requirement: &'static str,
    },

    #[error("invalid attack selection: {0:?}")]
    InvalidSelection(String),

    #[error("invalid factor {0:?} (expected <prime> or <prime>^<exponent>)")]
    InvalidFactor(String),
}

/// Recoverable failure of one attack attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttackError {
    /// gcd(e, phi) != 1, or a CRT modulus shares a factor with the others.
    #[error("no modular inverse exists")]
    NoModularInverse,

    #[error("the factor oracle returned fewer than two prime factors")]
    InsufficientFactors,

    #[error("the combined residue has no exact integer root")]
    NoIntegerRoot,

    #[error("no convergent of e/N yields a valid private exponent")]
    WienerAttackFailed,

    #[error("factor oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("factor oracle timed out")]
    OracleTimeout,
}

/// Anything that ends one invocation with a diagnostic.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("attack failed: {0}")]
    Attack(#[from] AttackError),
}

impl InputError {
    pub fn invalid_number(field: &str, value: &str) -> Self {
        Self::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn out_of_range(field: &str, requirement: &'static str) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            requirement,
        }
    }
}

impl AttackError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AttackError::NoModularInverse => EXIT_NO_MODULAR_INVERSE,
            AttackError::InsufficientFactors => EXIT_INSUFFICIENT_FACTORS,
            AttackError::NoIntegerRoot => EXIT_NO_INTEGER_ROOT,
            AttackError::WienerAttackFailed => EXIT_WIENER_FAILED,
            AttackError::OracleUnavailable(_) => EXIT_ORACLE_UNAVAILABLE,
            AttackError::OracleTimeout => EXIT_ORACLE_TIMEOUT,
        }
    }
}

impl SolverError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SolverError::Input(_) => EXIT_INVALID_INPUT,
            SolverError::Attack(e) => e.exit_code(),
        }
    }
}

/// Exit status for an error bubbled up through `anyhow`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<SolverError>() {
        return e.exit_code();
    }
    if err.downcast_ref::<InputError>().is_some() {
        return EXIT_INVALID_INPUT;
    }
    if let Some(e) = err.downcast_ref::<AttackError>() {
        return e.exit_code();
    }
    EXIT_IO
}
