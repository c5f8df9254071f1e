//! Tab-delimited tokenization of batch lines

use super::policy::FieldPolicy;
use crate::constants::FIELD_DELIMITER;

/// Split a line on tabs and trim every token
///
/// Under a policy that drops empty tokens, blank fields disappear and later
/// fields shift left; otherwise blank fields keep their slot as `""`.
pub fn tokenize<'a>(line: &'a str, policy: &FieldPolicy) -> Vec<&'a str> {
    let tokens = line.split(FIELD_DELIMITER).map(str::trim);

    if policy.drops_empty_tokens() {
        tokens.filter(|token| !token.is_empty()).collect()
    } else {
        tokens.collect()
    }
}

/// Token at a slot, or `None` when the slot is missing or blank
pub fn field_at<'a>(tokens: &[&'a str], slot: usize) -> Option<&'a str> {
    tokens
        .get(slot)
        .copied()
        .filter(|token| !token.is_empty())
}
