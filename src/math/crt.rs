//! Chinese Remainder Theorem

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Signed;

use super::mod_inverse;
use crate::error::AttackError;

/// Combine `(modulus, residue)` pairs into the unique `x` in `[0, Π N_i)`
/// with `x ≡ c_i (mod N_i)`.
///
/// The moduli must be positive and pairwise coprime. This is not checked up
/// front; a shared factor shows up as [`AttackError::NoModularInverse`] when
/// the partial product is inverted.
pub fn crt(pairs: &[(BigInt, BigInt)]) -> Result<BigInt, AttackError> {
    if pairs.iter().any(|(n, _)| !n.is_positive()) {
        return Err(AttackError::NoModularInverse);
    }
    let product: BigInt = pairs.iter().map(|(n, _)| n).product();

    let mut x = BigInt::from(0);
    for (n, c) in pairs {
        let partial = &product / n;
        let inv = mod_inverse(&partial, n)?;
        x += c.mod_floor(n) * inv * partial;
    }

    log::debug!(
        "crt combined {} residues into a {}-bit modulus",
        pairs.len(),
        product.bits()
    );

    Ok(x.mod_floor(&product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn moduli() -> Vec<BigInt> {
        vec![
            BigInt::from(4294967291u64),
            BigInt::from(4294967279u64),
            BigInt::from(4294967231u64),
        ]
    }

    #[test]
    fn test_crt_small() {
        let pairs = vec![
            (BigInt::from(3), BigInt::from(2)),
            (BigInt::from(5), BigInt::from(3)),
            (BigInt::from(7), BigInt::from(2)),
        ];
        assert_eq!(crt(&pairs).unwrap(), BigInt::from(23));
    }

    #[test]
    fn test_crt_reduces_residues() {
        let pairs = vec![
            (BigInt::from(3), BigInt::from(-1)),
            (BigInt::from(5), BigInt::from(13)),
        ];
        // x = 2 mod 3, x = 3 mod 5
        assert_eq!(crt(&pairs).unwrap(), BigInt::from(8));
    }

    #[test]
    fn test_crt_empty() {
        assert_eq!(crt(&[]).unwrap(), BigInt::from(0));
    }

    #[test]
    fn test_crt_shared_factor_surfaces() {
        let pairs = vec![
            (BigInt::from(6), BigInt::from(1)),
            (BigInt::from(9), BigInt::from(4)),
        ];
        assert_eq!(crt(&pairs), Err(AttackError::NoModularInverse));
    }

    quickcheck! {
        fn prop_crt_round_trip(hi: u32, mid: u32, lo: u32) -> bool {
            let moduli = moduli();
            let product: BigInt = moduli.iter().product();
            let x = ((BigInt::from(hi) << 64u32) + (BigInt::from(mid) << 32u32) + BigInt::from(lo))
                .mod_floor(&product);
            let pairs: Vec<(BigInt, BigInt)> = moduli
                .iter()
                .map(|n| (n.clone(), x.mod_floor(n)))
                .collect();
            crt(&pairs).unwrap() == x
        }
    }
}
