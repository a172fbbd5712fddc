//! Factorization through an external oracle

use super::{decrypt_with_totient, PublicKeyInput};
use crate::error::AttackError;
use crate::oracle::{FactorOracle, FactorStatus};
use crate::types::Recovery;

/// Look up the factors of N, then decrypt as with known primes.
///
/// Anything short of a complete factorization into at least two primes whose
/// product is N counts as [`AttackError::InsufficientFactors`].
pub fn factorization(
    input: &PublicKeyInput,
    oracle: &dyn FactorOracle,
) -> Result<Recovery, AttackError> {
    let PublicKeyInput { n, e, c } = input;

    let factors = oracle.factorize(n)?;
    if factors.status != FactorStatus::Complete || factors.len() < 2 {
        log::debug!(
            "oracle returned {} factor(s) with status {:?}",
            factors.len(),
            factors.status
        );
        return Err(AttackError::InsufficientFactors);
    }
    if factors.product() != *n {
        log::warn!("oracle factors do not multiply to n");
        return Err(AttackError::InsufficientFactors);
    }
    if factors.has_repeated_prime() {
        log::warn!("n has a repeated prime factor, using the prime-power totient");
    }

    decrypt_with_totient(n, e, c, &factors.phi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::{primes_known, PrimesInput};
    use crate::oracle::{KnownFactors, OracleError, PrimeFactorization};
    use num_bigint::BigInt;

    fn textbook_key() -> PublicKeyInput {
        PublicKeyInput {
            n: BigInt::from(3233),
            e: BigInt::from(17),
            c: BigInt::from(855),
        }
    }

    fn oracle(factors: &[(u64, u32)]) -> KnownFactors {
        KnownFactors(PrimeFactorization::complete(
            factors.iter().map(|&(p, k)| (BigInt::from(p), k)).collect(),
        ))
    }

    struct TimingOut;

    impl FactorOracle for TimingOut {
        fn factorize(&self, _n: &BigInt) -> Result<PrimeFactorization, OracleError> {
            Err(OracleError::Timeout)
        }
    }

    #[test]
    fn test_matches_primes_known() {
        let via_oracle = factorization(&textbook_key(), &oracle(&[(61, 1), (53, 1)])).unwrap();
        let direct = primes_known(&PrimesInput {
            p: BigInt::from(61),
            q: BigInt::from(53),
            e: BigInt::from(17),
            c: BigInt::from(855),
        })
        .unwrap();
        assert_eq!(via_oracle, direct);
        assert_eq!(via_oracle.plaintext, BigInt::from(123));
    }

    #[test]
    fn test_single_factor_is_insufficient() {
        let result = factorization(&textbook_key(), &oracle(&[(3233, 1)]));
        assert_eq!(result, Err(AttackError::InsufficientFactors));
    }

    #[test]
    fn test_unresolved_status_is_insufficient() {
        let partial = KnownFactors(PrimeFactorization {
            factors: vec![(BigInt::from(61), 1), (BigInt::from(53), 1)],
            status: FactorStatus::Unresolved,
        });
        assert_eq!(
            factorization(&textbook_key(), &partial),
            Err(AttackError::InsufficientFactors)
        );
    }

    #[test]
    fn test_wrong_product_is_insufficient() {
        let result = factorization(&textbook_key(), &oracle(&[(61, 1), (59, 1)]));
        assert_eq!(result, Err(AttackError::InsufficientFactors));
    }

    #[test]
    fn test_repeated_prime() {
        // n = 7^2 * 11 = 539, phi = 420, e = 13
        let n = BigInt::from(539);
        let e = BigInt::from(13);
        let m = BigInt::from(100);
        let c = m.modpow(&e, &n);

        let input = PublicKeyInput { n, e, c };
        let recovery = factorization(&input, &oracle(&[(7, 2), (11, 1)])).unwrap();
        assert_eq!(recovery.plaintext, m);
        assert_eq!(recovery.private_exponent, Some(BigInt::from(97)));
    }

    #[test]
    fn test_oracle_timeout_propagates() {
        assert_eq!(
            factorization(&textbook_key(), &TimingOut),
            Err(AttackError::OracleTimeout)
        );
    }
}
