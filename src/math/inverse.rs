//! Extended Euclidean algorithm and modular inverse

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::AttackError;

/// Returns (g, x, y) with a*x + b*y = g = gcd(a, b), g >= 0.
///
/// `extended_gcd(0, m)` is exactly `(m, 0, 1)` for m >= 0.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    if old_r.is_negative() {
        (-old_r, -old_s, -old_t)
    } else {
        (old_r, old_s, old_t)
    }
}

/// Modular multiplicative inverse of `a` modulo `m`, in `[0, m)`.
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Result<BigInt, AttackError> {
    if !m.is_positive() {
        return Err(AttackError::NoModularInverse);
    }

    let (g, x, _) = extended_gcd(&a.mod_floor(m), m);
    if !g.is_one() {
        return Err(AttackError::NoModularInverse);
    }

    Ok(x.mod_floor(m))
}
