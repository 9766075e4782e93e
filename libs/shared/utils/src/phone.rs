/// Canonicalize a phone string to its bare 10-digit form.
///
/// Strips everything that is not an ASCII digit; an 11-digit result starting
/// with the North American country code `1` drops that leading digit. Empty
/// or digit-free input yields an empty string.
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 11 && digits.starts_with('1') {
        digits[1..].to_string()
    } else {
        digits
    }
}
