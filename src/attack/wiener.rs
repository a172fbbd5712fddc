//! Wiener's attack on a small private exponent

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::PublicKeyInput;
use crate::error::AttackError;
use crate::math::{convergents, perfect_sqrt, rational_to_contfrac};
use crate::types::Recovery;

/// Search the convergents k/d of e/N for the private exponent.
///
/// A convergent qualifies when k != 0, k divides e*d - 1 and, with
/// phi = (e*d - 1)/k and s = N - phi + 1, the polynomial x^2 - s*x + N has
/// integer roots. The last qualifying convergent wins.
pub fn find_private_exponent(n: &BigInt, e: &BigInt) -> Option<BigInt> {
    let (n_u, e_u) = (n.to_biguint()?, e.to_biguint()?);
    let frac = rational_to_contfrac(&e_u, &n_u);
    let convs = convergents(&frac);
    log::debug!("wiener: testing {} convergents of e/N", convs.len());

    let one = BigInt::one();
    let four_n = n * 4u32;
    let mut found = None;

    for (k, d) in convs {
        if k.is_zero() {
            continue;
        }
        let (k, d) = (BigInt::from(k), BigInt::from(d));

        let (phi, rem) = (e * &d - &one).div_rem(&k);
        if !rem.is_zero() {
            continue;
        }

        let s = n - &phi + &one;
        let discriminant = &s * &s - &four_n;
        let Some(root) = perfect_sqrt(&discriminant) else {
            continue;
        };
        if (&s + &root).is_even() {
            log::debug!("wiener: convergent with d of {} bits qualifies", d.bits());
            found = Some(d);
        }
    }

    found
}

/// Recover d from (N, e), then m = c^d mod N.
pub fn wiener(input: &PublicKeyInput) -> Result<Recovery, AttackError> {
    let PublicKeyInput { n, e, c } = input;
    let d = find_private_exponent(n, e).ok_or(AttackError::WienerAttackFailed)?;
    Ok(Recovery {
        plaintext: c.modpow(&d, n),
        private_exponent: Some(d),
    })
}
