//! Number-theoretic primitives used by the attacks

pub mod contfrac;
pub mod crt;
pub mod inverse;
pub mod root;

pub use contfrac::{convergents, rational_to_contfrac};
pub use crt::crt;
pub use inverse::mod_inverse;
pub use root::exact_root;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Num, Signed};

/// Parse a decimal or `0x`-prefixed hexadecimal integer.
///
/// Leading `-`, surrounding whitespace and `_` separators are accepted.
pub fn parse_integer(input: &str) -> Option<BigInt> {
    let cleaned: String = input.trim().chars().filter(|&ch| ch != '_').collect();
    let (negative, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };

    let magnitude = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            BigUint::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) => {
            BigUint::from_str_radix(body, 10).ok()?
        }
        None => return None,
    };

    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Some(BigInt::from_biguint(sign, magnitude))
}

/// Square root of `n` when `n` is a non-negative perfect square.
pub fn perfect_sqrt(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let r = n.sqrt();
    if &r * &r == *n {
        Some(r)
    } else {
        None
    }
}
