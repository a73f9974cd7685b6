use crate::events::Inquiry;

pub const MSG_MISSING_FIELDS: &str = "Please fill in all fields.";
pub const MSG_INVALID_PHONE: &str = "Please enter a valid 10-digit phone number.";

const PHONE_DIGITS: usize = 10;

/// Drop every character that is not an ASCII digit
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Exactly ten ASCII digits, nothing else
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Check the form before anything is sent.
///
/// Fields are trimmed first; presence is checked before the phone format so an
/// empty form always reports the missing-fields message.
pub fn validate_form(name: &str, phone: &str) -> Result<Inquiry, String> {
    let name = name.trim();
    let phone = phone.trim();

    if name.is_empty() || phone.is_empty() {
        return Err(MSG_MISSING_FIELDS.to_string());
    }

    if !is_valid_phone(phone) {
        return Err(MSG_INVALID_PHONE.to_string());
    }

    Ok(Inquiry {
        name: name.to_string(),
        phone: phone.to_string(),
    })
}
