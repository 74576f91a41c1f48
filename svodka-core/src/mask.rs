//! Card number masking for display.

use crate::error::Error;

/// Mask a card number down to its first and last four digits: "1234 ** 3456".
///
/// Fewer than six digits cannot be masked meaningfully and is reported as a
/// validation error value.
pub fn mask_card_number(raw: &str) -> Result<String, Error> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 6 {
        return Err(Error::Validation(format!("card number too short: '{raw}'")));
    }
    Ok(format!("{} ** {}", &digits[..4], &digits[digits.len() - 4..]))
}
