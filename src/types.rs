//! Common types: attack variants, input fields and collected parameters

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_traits::{One, Signed};

use crate::error::InputError;
use crate::math::parse_integer;

/// Public exponent of the broadcast attack.
pub const BROADCAST_EXPONENT: u32 = 3;

/// The four supported attacks, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackVariant {
    PrimesKnown,
    Factorization,
    LowExponent,
    Wiener,
}

impl AttackVariant {
    pub const ALL: [AttackVariant; 4] = [
        AttackVariant::PrimesKnown,
        AttackVariant::Factorization,
        AttackVariant::LowExponent,
        AttackVariant::Wiener,
    ];

    /// Menu label.
    pub fn name(self) -> &'static str {
        match self {
            AttackVariant::PrimesKnown => "Primes known (p, q, e, c)",
            AttackVariant::Factorization => "Factorization (n, e, c)",
            AttackVariant::LowExponent => "Low exponent (e = 3, n1, n2, n3, c1, c2, c3)",
            AttackVariant::Wiener => "Wiener (n, e, c)",
        }
    }

    /// Inputs the variant needs, in prompting order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            AttackVariant::PrimesKnown => &[Field::P, Field::Q, Field::E, Field::C],
            AttackVariant::Factorization | AttackVariant::Wiener => {
                &[Field::N, Field::E, Field::C]
            }
            AttackVariant::LowExponent => &[
                Field::N1,
                Field::N2,
                Field::N3,
                Field::C1,
                Field::C2,
                Field::C3,
            ],
        }
    }

    /// 1-based menu index.
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|v| *v == self)
            .map_or(0, |i| i + 1)
    }

    /// Resolve a 1-based menu index.
    pub fn from_index(index: usize) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Resolve a typed menu choice such as `" 2\n"`.
    pub fn from_choice(choice: &str) -> Result<Self, InputError> {
        choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| InputError::InvalidSelection(choice.trim().to_string()))
    }
}

/// What a field must satisfy before it reaches the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constraint {
    /// Moduli and primes: > 1.
    AboveOne,
    /// Exponents: >= 1.
    Positive,
    /// Ciphertexts: >= 0.
    NonNegative,
}

/// One numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    P,
    Q,
    N,
    E,
    C,
    N1,
    N2,
    N3,
    C1,
    C2,
    C3,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::P => "p",
            Field::Q => "q",
            Field::N => "n",
            Field::E => "e",
            Field::C => "c",
            Field::N1 => "n1",
            Field::N2 => "n2",
            Field::N3 => "n3",
            Field::C1 => "c1",
            Field::C2 => "c2",
            Field::C3 => "c3",
        }
    }

    fn constraint(self) -> Constraint {
        match self {
            Field::P | Field::Q | Field::N | Field::N1 | Field::N2 | Field::N3 => {
                Constraint::AboveOne
            }
            Field::E => Constraint::Positive,
            Field::C | Field::C1 | Field::C2 | Field::C3 => Constraint::NonNegative,
        }
    }

    /// Parse and range-check a raw entry for this field.
    pub fn parse(self, raw: &str) -> Result<BigInt, InputError> {
        let value =
            parse_integer(raw).ok_or_else(|| InputError::invalid_number(self.label(), raw.trim()))?;
        self.check(&value)?;
        Ok(value)
    }

    pub fn check(self, value: &BigInt) -> Result<(), InputError> {
        let (ok, requirement) = match self.constraint() {
            Constraint::AboveOne => (value > &BigInt::one(), "greater than 1"),
            Constraint::Positive => (value.is_positive(), "at least 1"),
            Constraint::NonNegative => (!value.is_negative(), "non-negative"),
        };
        if ok {
            Ok(())
        } else {
            Err(InputError::out_of_range(self.label(), requirement))
        }
    }
}

/// Values collected for one attack invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsaParameters {
    values: BTreeMap<Field, BigInt>,
}

impl RsaParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value after range-checking it.
    pub fn set(&mut self, field: Field, value: BigInt) -> Result<(), InputError> {
        field.check(&value)?;
        self.values.insert(field, value);
        Ok(())
    }

    pub fn get(&self, field: Field) -> Option<&BigInt> {
        self.values.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// First field of `variant` that is still missing.
    pub fn missing(&self, variant: AttackVariant) -> Option<Field> {
        variant.fields().iter().copied().find(|f| !self.contains(*f))
    }

    pub(crate) fn require(&self, field: Field) -> Result<BigInt, InputError> {
        self.get(field)
            .cloned()
            .ok_or_else(|| InputError::out_of_range(field.label(), "provided"))
    }
}

/// A successful recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub plaintext: BigInt,
    /// The private exponent, when the attack derived one.
    pub private_exponent: Option<BigInt>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_indices_are_one_based() {
        assert_eq!(AttackVariant::from_index(0), None);
        assert_eq!(AttackVariant::from_index(1), Some(AttackVariant::PrimesKnown));
        assert_eq!(AttackVariant::from_index(4), Some(AttackVariant::Wiener));
        assert_eq!(AttackVariant::from_index(5), None);
        for variant in AttackVariant::ALL {
            assert_eq!(AttackVariant::from_index(variant.index()), Some(variant));
        }
    }

    #[test]
    fn test_from_choice() {
        assert_eq!(
            AttackVariant::from_choice(" 3\n"),
            Ok(AttackVariant::LowExponent)
        );
        assert_eq!(
            AttackVariant::from_choice("abc"),
            Err(InputError::InvalidSelection("abc".into()))
        );
        assert!(AttackVariant::from_choice("0").is_err());
    }

    #[test]
    fn test_field_constraints() {
        assert!(Field::N.parse("1").is_err());
        assert!(Field::N.parse("0x10").is_ok());
        assert!(Field::E.parse("0").is_err());
        assert!(Field::C.parse("0").is_ok());
        assert!(Field::C.parse("-1").is_err());
        assert_eq!(
            Field::P.parse("sixty-one"),
            Err(InputError::invalid_number("p", "sixty-one"))
        );
    }

    #[test]
    fn test_missing_fields_follow_prompt_order() {
        let mut params = RsaParameters::new();
        assert_eq!(params.missing(AttackVariant::Wiener), Some(Field::N));
        params.set(Field::N, BigInt::from(3233)).unwrap();
        params.set(Field::E, BigInt::from(17)).unwrap();
        assert_eq!(params.missing(AttackVariant::Wiener), Some(Field::C));
        params.set(Field::C, BigInt::from(855)).unwrap();
        assert_eq!(params.missing(AttackVariant::Wiener), None);
        assert_eq!(params.missing(AttackVariant::PrimesKnown), Some(Field::P));
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let mut params = RsaParameters::new();
        assert!(params.set(Field::N1, BigInt::from(-5)).is_err());
        assert!(!params.contains(Field::N1));
    }
}
