//! Phone number normalization

use crate::{Error, Result};

/// Keep only the digits of `text` as ASCII
///
/// Full-width digits (`０`..=`９`, typed by Korean IMEs in full-width mode) are
/// folded to their ASCII forms; every other character is dropped.
pub fn ascii_digits(text: &str) -> String {
    text.chars().filter_map(ascii_digit).collect()
}

fn ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '\u{FF10}'..='\u{FF19}' => char::from_u32(u32::from(c) - 0xFF10 + u32::from('0')),
        _ => None,
    }
}

/// Strip every non-digit character; `None` when no digits remain
pub fn normalize_phone(token: &str) -> Option<String> {
    let digits = ascii_digits(token);
    if digits.is_empty() { None } else { Some(digits) }
}

/// Normalize a phone number for a single-quote save, which also enforces a
/// minimum digit count (domestic numbers have at least 9 digits)
pub fn sanitize_phone_for_save(token: &str, min_digits: usize) -> Result<String> {
    let digits = normalize_phone(token).ok_or_else(|| {
        Error::data_validation(format!("Phone number '{}' contains no digits", token.trim()))
    })?;

    if digits.len() < min_digits {
        return Err(Error::data_validation(format!(
            "Phone number '{}' has {} digits, at least {} required",
            token.trim(),
            digits.len(),
            min_digits
        )));
    }

    Ok(digits)
}
