//! Attack dispatch
//!
//! Each variant is a function from a fixed input record to a [`Recovery`].
//! [`run`] matches exhaustively over [`AttackRequest`], so adding a variant
//! without wiring it up does not compile.

pub mod factorization;
pub mod low_exponent;
pub mod primes_known;
pub mod wiener;

pub use factorization::factorization;
pub use low_exponent::low_exponent;
pub use primes_known::primes_known;
pub use wiener::wiener;

use num_bigint::BigInt;

use crate::error::{AttackError, InputError};
use crate::math::mod_inverse;
use crate::oracle::FactorOracle;
use crate::types::{AttackVariant, Field, Recovery, RsaParameters};

/// Inputs of the known-primes attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimesInput {
    pub p: BigInt,
    pub q: BigInt,
    pub e: BigInt,
    pub c: BigInt,
}

/// A public key plus one ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyInput {
    pub n: BigInt,
    pub e: BigInt,
    pub c: BigInt,
}

/// Three `(modulus, ciphertext)` pairs of the same message under e = 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastInput {
    pub pairs: [(BigInt, BigInt); 3],
}

/// A fully populated request for one attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackRequest {
    PrimesKnown(PrimesInput),
    Factorization(PublicKeyInput),
    LowExponent(BroadcastInput),
    Wiener(PublicKeyInput),
}

impl AttackRequest {
    /// Build the request for `variant` from collected parameters.
    pub fn from_parameters(
        variant: AttackVariant,
        params: &RsaParameters,
    ) -> Result<Self, InputError> {
        let public_key = || -> Result<PublicKeyInput, InputError> {
            Ok(PublicKeyInput {
                n: params.require(Field::N)?,
                e: params.require(Field::E)?,
                c: params.require(Field::C)?,
            })
        };

        Ok(match variant {
            AttackVariant::PrimesKnown => AttackRequest::PrimesKnown(PrimesInput {
                p: params.require(Field::P)?,
                q: params.require(Field::Q)?,
                e: params.require(Field::E)?,
                c: params.require(Field::C)?,
            }),
            AttackVariant::Factorization => AttackRequest::Factorization(public_key()?),
            AttackVariant::LowExponent => AttackRequest::LowExponent(BroadcastInput {
                pairs: [
                    (params.require(Field::N1)?, params.require(Field::C1)?),
                    (params.require(Field::N2)?, params.require(Field::C2)?),
                    (params.require(Field::N3)?, params.require(Field::C3)?),
                ],
            }),
            AttackVariant::Wiener => AttackRequest::Wiener(public_key()?),
        })
    }

    pub fn variant(&self) -> AttackVariant {
        match self {
            AttackRequest::PrimesKnown(_) => AttackVariant::PrimesKnown,
            AttackRequest::Factorization(_) => AttackVariant::Factorization,
            AttackRequest::LowExponent(_) => AttackVariant::LowExponent,
            AttackRequest::Wiener(_) => AttackVariant::Wiener,
        }
    }
}

/// Run one attack to completion. The oracle is only consulted by the
/// factorization variant.
pub fn run(request: &AttackRequest, oracle: &dyn FactorOracle) -> Result<Recovery, AttackError> {
    log::debug!("running attack: {}", request.variant().name());
    match request {
        AttackRequest::PrimesKnown(input) => primes_known(input),
        AttackRequest::Factorization(input) => factorization(input, oracle),
        AttackRequest::LowExponent(input) => low_exponent(input),
        AttackRequest::Wiener(input) => wiener(input),
    }
}

/// d = e^-1 mod phi, m = c^d mod n.
pub(crate) fn decrypt_with_totient(
    n: &BigInt,
    e: &BigInt,
    c: &BigInt,
    phi: &BigInt,
) -> Result<Recovery, AttackError> {
    let d = mod_inverse(e, phi)?;
    let plaintext = c.modpow(&d, n);
    Ok(Recovery {
        plaintext,
        private_exponent: Some(d),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{Disabled, KnownFactors, PrimeFactorization};

    fn textbook_params(variant: AttackVariant) -> RsaParameters {
        let mut params = RsaParameters::new();
        let values: &[(Field, i64)] = match variant {
            AttackVariant::PrimesKnown => &[(Field::P, 61), (Field::Q, 53), (Field::E, 17), (Field::C, 855)],
            _ => &[(Field::N, 3233), (Field::E, 17), (Field::C, 855)],
        };
        for &(field, value) in values {
            params.set(field, BigInt::from(value)).unwrap();
        }
        params
    }

    #[test]
    fn test_request_from_parameters() {
        let params = textbook_params(AttackVariant::PrimesKnown);
        let request = AttackRequest::from_parameters(AttackVariant::PrimesKnown, &params).unwrap();
        assert_eq!(request.variant(), AttackVariant::PrimesKnown);

        // The same parameters do not carry n.
        assert!(AttackRequest::from_parameters(AttackVariant::Wiener, &params).is_err());
    }

    #[test]
    fn test_dispatch_primes_known() {
        let params = textbook_params(AttackVariant::PrimesKnown);
        let request = AttackRequest::from_parameters(AttackVariant::PrimesKnown, &params).unwrap();
        let recovery = run(&request, &Disabled).unwrap();
        assert_eq!(recovery.plaintext, BigInt::from(123));
        assert_eq!(recovery.private_exponent, Some(BigInt::from(2753)));
    }

    #[test]
    fn test_dispatch_factorization_uses_oracle() {
        let params = textbook_params(AttackVariant::Factorization);
        let request =
            AttackRequest::from_parameters(AttackVariant::Factorization, &params).unwrap();

        let oracle = KnownFactors(PrimeFactorization::complete(vec![
            (BigInt::from(61), 1),
            (BigInt::from(53), 1),
        ]));
        assert_eq!(run(&request, &oracle).unwrap().plaintext, BigInt::from(123));

        assert!(matches!(
            run(&request, &Disabled),
            Err(AttackError::OracleUnavailable(_))
        ));
    }

    #[test]
    fn test_decrypt_with_non_invertible_exponent() {
        let (n, c) = (BigInt::from(3233), BigInt::from(855));
        let phi = BigInt::from(3120);
        assert_eq!(
            decrypt_with_totient(&n, &BigInt::from(3), &c, &phi),
            Err(AttackError::NoModularInverse)
        );
    }
}
