//! Both primes known

use num_bigint::BigInt;
use num_traits::One;

use super::{decrypt_with_totient, PrimesInput};
use crate::error::AttackError;
use crate::types::Recovery;

/// N = p*q, phi = (p-1)(q-1), d = e^-1 mod phi, m = c^d mod N.
pub fn primes_known(input: &PrimesInput) -> Result<Recovery, AttackError> {
    let PrimesInput { p, q, e, c } = input;
    let one = BigInt::one();

    let n = p * q;
    let phi = (p - &one) * (q - &one);
    decrypt_with_totient(&n, e, c, &phi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(p: u64, q: u64, e: u64, c: u64) -> PrimesInput {
        PrimesInput {
            p: BigInt::from(p),
            q: BigInt::from(q),
            e: BigInt::from(e),
            c: BigInt::from(c),
        }
    }

    #[test]
    fn test_textbook_example() {
        // The ciphertext is 123^17 mod 3233.
        let n = BigInt::from(3233);
        assert_eq!(BigInt::from(123).modpow(&BigInt::from(17), &n), BigInt::from(855));

        let recovery = primes_known(&input(61, 53, 17, 855)).unwrap();
        assert_eq!(recovery.plaintext, BigInt::from(123));
        assert_eq!(recovery.private_exponent, Some(BigInt::from(2753)));
    }

    #[test]
    fn test_exponent_sharing_factor_with_phi() {
        // phi = 3120 is divisible by 3
        assert_eq!(
            primes_known(&input(61, 53, 3, 855)),
            Err(AttackError::NoModularInverse)
        );
    }

    #[test]
    fn test_larger_primes() {
        let (p, q) = (4294967291u64, 4294967279u64);
        let n = BigInt::from(p) * BigInt::from(q);
        let e = BigInt::from(65537);
        let m = BigInt::parse_bytes(b"1234567890123456789", 10).unwrap();
        let c = m.modpow(&e, &n);

        let recovery = primes_known(&PrimesInput {
            p: BigInt::from(p),
            q: BigInt::from(q),
            e,
            c,
        })
        .unwrap();
        assert_eq!(recovery.plaintext, m);
    }

    #[test]
    fn test_random_plaintexts() {
        use rand::Rng;

        let (p, q) = (4294967291u64, 4294967279u64);
        let n = BigInt::from(p) * BigInt::from(q);
        let e = BigInt::from(65537);
        let mut rng = rand::thread_rng();

        for _ in 0..16 {
            let m = BigInt::from(rng.gen_range(2..u64::MAX));
            let c = m.modpow(&e, &n);
            let recovery = primes_known(&PrimesInput {
                p: BigInt::from(p),
                q: BigInt::from(q),
                e: e.clone(),
                c,
            })
            .unwrap();
            assert_eq!(recovery.plaintext, m);
        }
    }
}
