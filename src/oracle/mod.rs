//! Factor oracles
//!
//! The factorization attack does not factor anything itself. It asks an
//! injected [`FactorOracle`] and only trusts a complete answer.

pub mod factordb;

pub use factordb::{FactorDb, OracleConfig};

use num_bigint::BigInt;
use num_traits::{One, Pow};
use thiserror::Error;

use crate::error::AttackError;

/// Whether the oracle believes the factor list is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorStatus {
    /// Fully factored (or the number itself is prime).
    Complete,
    /// Composite with no or only partial factors known.
    Unresolved,
}

/// Prime factors with multiplicity, as reported by an oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeFactorization {
    pub factors: Vec<(BigInt, u32)>,
    pub status: FactorStatus,
}

impl PrimeFactorization {
    pub fn complete(factors: Vec<(BigInt, u32)>) -> Self {
        Self {
            factors,
            status: FactorStatus::Complete,
        }
    }

    /// Number of prime factors counted with multiplicity.
    pub fn len(&self) -> usize {
        self.factors.iter().map(|(_, k)| *k as usize).sum()
    }

    pub fn product(&self) -> BigInt {
        self.factors
            .iter()
            .map(|(p, k)| Pow::pow(p, *k))
            .product()
    }

    /// Euler's totient: the product of p^(k-1) * (p-1) over all prime powers.
    pub fn phi(&self) -> BigInt {
        self.factors
            .iter()
            .filter(|(_, k)| *k > 0)
            .map(|(p, k)| Pow::pow(p, *k - 1) * (p - BigInt::one()))
            .product()
    }

    pub fn has_repeated_prime(&self) -> bool {
        self.factors.iter().any(|(_, k)| *k > 1)
    }
}

/// Oracle failures. Transport details stay inside the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("oracle request timed out")]
    Timeout,

    #[error("malformed oracle response: {0}")]
    Malformed(String),
}

impl From<OracleError> for AttackError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::Timeout => AttackError::OracleTimeout,
            other => AttackError::OracleUnavailable(other.to_string()),
        }
    }
}

/// Something that may know the prime factorization of a modulus.
pub trait FactorOracle {
    /// Blocking lookup of the factors of `n`.
    fn factorize(&self, n: &BigInt) -> Result<PrimeFactorization, OracleError>;
}

/// Answers every query with the same factor list.
#[derive(Debug, Clone)]
pub struct KnownFactors(pub PrimeFactorization);

impl FactorOracle for KnownFactors {
    fn factorize(&self, _n: &BigInt) -> Result<PrimeFactorization, OracleError> {
        Ok(self.0.clone())
    }
}

/// Used when the operator runs offline.
#[derive(Debug, Clone, Copy)]
pub struct Disabled;

impl FactorOracle for Disabled {
    fn factorize(&self, _n: &BigInt) -> Result<PrimeFactorization, OracleError> {
        Err(OracleError::Unavailable("factor oracle disabled".to_string()))
    }
}
