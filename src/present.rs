//! Rendering a recovered plaintext

use num_bigint::{BigInt, Sign};

use crate::types::Recovery;

/// Percentage of bytes that must be printable for a decoding to be shown.
pub const PRINTABLE_PERCENT: usize = 95;

/// True when at least 95% of `bytes` are printable ASCII, tab, LF or CR.
pub fn is_printable(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }
    let printable = bytes
        .iter()
        .filter(|&&b| (0x20..=0x7e).contains(&b) || matches!(b, b'\t' | b'\n' | b'\r'))
        .count();
    printable * 100 >= PRINTABLE_PERCENT * bytes.len()
}

/// Big-endian bytes of a non-negative integer.
pub fn integer_to_bytes(m: &BigInt) -> Option<Vec<u8>> {
    match m.sign() {
        Sign::Minus => None,
        _ => Some(m.to_bytes_be().1),
    }
}

/// The decimal digits of `m` read as a hex string. An odd digit count gets
/// a leading zero.
pub fn decimal_as_hex_bytes(m: &BigInt) -> Option<Vec<u8>> {
    if m.sign() == Sign::Minus {
        return None;
    }
    let digits = m.to_str_radix(10);
    let digits = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits
    };
    hex::decode(digits).ok()
}

fn printable_text(bytes: Option<Vec<u8>>) -> Option<String> {
    bytes
        .filter(|b| is_printable(b))
        .map(|b| String::from_utf8_lossy(&b).into_owned())
}

/// Output lines for a recovery: always the decimal value, then the private
/// exponent and any decoding that looks like text.
pub fn render(recovery: &Recovery) -> Vec<String> {
    let m = &recovery.plaintext;
    let mut lines = vec![format!("-> m(dec): {m}")];

    if let Some(d) = &recovery.private_exponent {
        lines.push(format!("-> d: {d}"));
    }
    if let Some(text) = printable_text(integer_to_bytes(m)) {
        lines.push(format!("-> m(str): {text}"));
    }
    if let Some(text) = printable_text(decimal_as_hex_bytes(m)) {
        lines.push(format!("-> m(dec as hex): {text}"));
    }
    lines
}
