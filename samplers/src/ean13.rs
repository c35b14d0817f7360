//! EAN-13 barcode checksum
//!
//! The check digit is a weighted modulo-10 sum over the first twelve digits:
//! digits in odd positions (1st, 3rd, ...) weigh 1, digits in even positions
//! weigh 3, and the check digit is `(10 - sum % 10) % 10`.

/// Number of digits in a complete barcode
pub const EAN13_LEN: usize = 13;

/// Check digit for the first 12 digits of a barcode
///
/// Returns `None` unless `first12` is exactly twelve ASCII digits.
pub fn ean13_check_digit(first12: &str) -> Option<u8> {
    if first12.len() != EAN13_LEN - 1 {
        return None;
    }

    let mut sum = 0u32;
    for (idx, byte) in first12.bytes().enumerate() {
        if !byte.is_ascii_digit() {
            return None;
        }
        let digit = u32::from(byte - b'0');
        sum += if idx % 2 == 0 { digit } else { digit * 3 };
    }

    Some(((10 - sum % 10) % 10) as u8)
}

/// Whether `code` is thirteen digits with a correct check digit
pub fn is_valid_ean13(code: &str) -> bool {
    if code.len() != EAN13_LEN {
        return false;
    }
    let (body, check) = code.split_at(EAN13_LEN - 1);
    match (ean13_check_digit(body), check.bytes().next()) {
        (Some(expected), Some(actual)) if actual.is_ascii_digit() => expected == actual - b'0',
        _ => false,
    }
}
