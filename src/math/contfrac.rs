//! Continued fractions and convergents

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Partial quotients `[a0, a1, ..., an]` of `x / y`.
///
/// Empty when `y == 0`.
pub fn rational_to_contfrac(x: &BigUint, y: &BigUint) -> Vec<BigUint> {
    let mut quotients = Vec::new();
    let (mut x, mut y) = (x.clone(), y.clone());
    while !y.is_zero() {
        let (a, r) = x.div_rem(&y);
        quotients.push(a);
        x = std::mem::replace(&mut y, r);
    }
    quotients
}

/// Fold partial quotients back into `(numerator, denominator)`.
///
/// The empty expansion is `(0, 1)`.
pub fn contfrac_to_rational(quotients: &[BigUint]) -> (BigUint, BigUint) {
    let mut rev = quotients.iter().rev();
    let Some(last) = rev.next() else {
        return (BigUint::zero(), BigUint::one());
    };
    rev.fold((last.clone(), BigUint::one()), |(num, den), a| {
        (a * &num + den, num)
    })
}

/// Convergents of `frac`: `contfrac_to_rational(&frac[..i])` for every `i`
/// in `0..frac.len()`, so the first is always `(0, 1)` and the full
/// expansion is not included.
pub fn convergents(frac: &[BigUint]) -> Vec<(BigUint, BigUint)> {
    (0..frac.len())
        .map(|i| contfrac_to_rational(&frac[..i]))
        .collect()
}
