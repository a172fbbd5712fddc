//! Hastad's broadcast attack with e = 3

use num_bigint::BigInt;

use super::BroadcastInput;
use crate::error::AttackError;
use crate::math::{crt, exact_root};
use crate::types::{Recovery, BROADCAST_EXPONENT};

/// The same m under e = 3 and three coprime moduli: CRT gives m^3 exactly
/// (m^3 < N1*N2*N3), and the cube root gives m.
pub fn low_exponent(input: &BroadcastInput) -> Result<Recovery, AttackError> {
    let cubed = crt(&input.pairs)?;
    let cubed = cubed.to_biguint().ok_or(AttackError::NoIntegerRoot)?;

    let m = exact_root(&cubed, BROADCAST_EXPONENT).ok_or(AttackError::NoIntegerRoot)?;
    Ok(Recovery {
        plaintext: BigInt::from(m),
        private_exponent: None,
    })
}
