//! QR reference (QRR) and ISO 11649 creditor reference (SCOR) handling.

use super::iban::mod97;

const MOD10_TABLE: [u32; 10] = [0, 9, 4, 6, 8, 2, 7, 1, 3, 5];

/// Remove whitespace from a reference.
pub fn normalize_reference(reference: &str) -> String {
    reference.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Recursive mod-10 check digit over a string of digits.
///
/// Returns `None` if `digits` contains anything but ASCII digits.
pub fn qr_check_digit(digits: &str) -> Option<u32> {
    let mut carry = 0u32;
    for c in digits.chars() {
        let d = c.to_digit(10)?;
        carry = MOD10_TABLE[((carry + d) % 10) as usize];
    }
    Some((10 - carry) % 10)
}

/// True for a 27-digit QR reference with a correct check digit.
pub fn is_qr_reference(reference: &str) -> bool {
    let reference = normalize_reference(reference);
    if reference.len() != 27 || !reference.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (body, check) = reference.split_at(26);
    qr_check_digit(body) == check.parse().ok()
}

/// Build a QR reference from up to 26 digits: zero-padded, check digit appended.
pub fn create_qr_reference(digits: &str) -> Option<String> {
    let digits = normalize_reference(digits);
    if digits.len() > 26 {
        return None;
    }
    let body = format!("{digits:0>26}");
    let check = qr_check_digit(&body)?;
    Some(format!("{body}{check}"))
}

/// True for a valid ISO 11649 creditor reference (`RF` + 2 check digits + up to 21 chars).
pub fn is_creditor_reference(reference: &str) -> bool {
    let reference = normalize_reference(reference).to_ascii_uppercase();
    if !(5..=25).contains(&reference.len())
        || !reference.starts_with("RF")
        || !reference.bytes().all(|b| b.is_ascii_alphanumeric())
        || !reference.as_bytes()[2..4].iter().all(u8::is_ascii_digit)
    {
        return false;
    }
    mod97(&reference[4..], &reference[..4]) == 1
}

/// Print form. QR references: `21 00000 00003 13947 14300 09017`;
/// creditor references: groups of four.
pub fn format_reference(reference: &str) -> String {
    let reference = normalize_reference(reference);
    if is_qr_reference(&reference) {
        let (head, rest) = reference.split_at(2);
        let mut parts = vec![head.to_string()];
        parts.extend(
            rest.as_bytes()
                .chunks(5)
                .map(|c| String::from_utf8_lossy(c).into_owned()),
        );
        parts.join(" ")
    } else {
        reference
            .as_bytes()
            .chunks(4)
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
