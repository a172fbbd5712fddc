//! Exact integer n-th roots

use num_bigint::BigUint;
use num_traits::{One, Pow, Zero};

/// Floor of the real `degree`-th root of `n`: the largest `r` with
/// `r^degree <= n`.
///
/// Binary search over `[0, n]` with exact big-integer powers, no floating
/// point. Degree 0 is degenerate and returns the upper bound `n`.
pub fn integer_root(n: &BigUint, degree: u32) -> BigUint {
    if degree <= 1 || n.is_zero() {
        return n.clone();
    }

    // Invariant: lo^degree <= n, and every r > hi has r^degree > n.
    let mut lo = BigUint::zero();
    let mut hi = n.clone();
    while lo < hi {
        let mid: BigUint = (&lo + &hi + BigUint::one()) >> 1;
        if Pow::pow(&mid, degree) <= *n {
            lo = mid;
        } else {
            hi = mid - BigUint::one();
        }
    }
    lo
}

/// The `degree`-th root of `n` when it is an integer.
pub fn exact_root(n: &BigUint, degree: u32) -> Option<BigUint> {
    let r = integer_root(n, degree);
    if Pow::pow(&r, degree) == *n {
        Some(r)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_cube_root_exact() {
        let n = BigUint::from(74088u32); // 42^3
        assert_eq!(integer_root(&n, 3), BigUint::from(42u32));
        assert_eq!(exact_root(&n, 3), Some(BigUint::from(42u32)));
    }

    #[test]
    fn test_cube_root_inexact() {
        let n = BigUint::from(74089u32);
        assert_eq!(integer_root(&n, 3), BigUint::from(42u32));
        assert_eq!(exact_root(&n, 3), None);
    }

    #[test]
    fn test_root_of_large_power() {
        let m = BigUint::parse_bytes(b"123456789012345678901234567890", 10).unwrap();
        let n = Pow::pow(&m, 5u32);
        assert_eq!(exact_root(&n, 5), Some(m.clone()));
        assert_eq!(integer_root(&(n - 1u32), 5), m - 1u32);
    }

    #[test]
    fn test_root_edge_cases() {
        assert_eq!(integer_root(&BigUint::zero(), 3), BigUint::zero());
        assert_eq!(integer_root(&BigUint::one(), 7), BigUint::one());
        assert_eq!(integer_root(&BigUint::from(99u32), 1), BigUint::from(99u32));
        assert_eq!(integer_root(&BigUint::from(7u32), 2), BigUint::from(2u32));
    }

    quickcheck! {
        fn prop_root_brackets_n(n: u64, degree: u8) -> bool {
            let degree = (degree % 8) as u32 + 1;
            let n = BigUint::from(n);
            let r = integer_root(&n, degree);
            Pow::pow(&r, degree) <= n && Pow::pow(&(r + 1u32), degree) > n
        }
    }
}
