//! IBAN and QR-IBAN checks.

use std::fmt;

/// Error returned when an account number fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbanError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for IbanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid IBAN '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for IbanError {}

/// Strip spaces and uppercase.
pub fn normalize_iban(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Validate an IBAN by structure and ISO 13616 mod-97 checksum.
///
/// Whitespace is ignored. Swiss and Liechtenstein IBANs must be 21 characters.
pub fn validate_iban(iban: &str) -> Result<(), IbanError> {
    let iban = normalize_iban(iban);
    let fail = |reason: &str| IbanError {
        value: iban.clone(),
        reason: reason.into(),
    };

    if !(15..=34).contains(&iban.len()) {
        return Err(fail("length must be between 15 and 34 characters"));
    }
    if !iban.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(fail("only letters and digits are allowed"));
    }

    let bytes = iban.as_bytes();
    if !bytes[..2].iter().all(u8::is_ascii_alphabetic) {
        return Err(fail("must start with a two-letter country code"));
    }
    if !bytes[2..4].iter().all(u8::is_ascii_digit) {
        return Err(fail("check digits must be numeric"));
    }
    if matches!(&iban[..2], "CH" | "LI") && iban.len() != 21 {
        return Err(fail("Swiss and Liechtenstein IBANs have 21 characters"));
    }

    if mod97(&iban[4..], &iban[..4]) != 1 {
        return Err(fail("checksum mismatch"));
    }

    Ok(())
}

/// True for a QR-IBAN: a CH/LI IBAN whose institution id is 30000–31999.
pub fn is_qr_iban(iban: &str) -> bool {
    let iban = normalize_iban(iban);
    if !matches!(iban.get(..2), Some("CH" | "LI")) {
        return false;
    }
    iban.get(4..9)
        .and_then(|iid| iid.parse::<u32>().ok())
        .is_some_and(|iid| (30000..=31999).contains(&iid))
}

/// Print form: groups of four characters.
pub fn format_iban(iban: &str) -> String {
    let iban = normalize_iban(iban);
    iban.as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// ISO 7064 mod 97-10 over `body` followed by `tail`, letters mapped A=10..Z=35.
///
/// Shared by IBAN and ISO 11649 creditor reference checks.
pub(crate) fn mod97(body: &str, tail: &str) -> u32 {
    let mut remainder = 0u32;
    for c in body.chars().chain(tail.chars()) {
        let Some(value) = c.to_digit(36) else {
            return 0;
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }
    remainder
}
