use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::iban::{is_qr_iban, validate_iban};
use super::payload::MAX_PAYLOAD_CHARS;
use super::reference::{is_creditor_reference, is_qr_reference};
use super::QrBill;
use crate::core::countries::{is_known_country_code, is_qr_account_country};
use crate::core::{Party, ValidationError};

const MAX_AMOUNT: Decimal = dec!(999999999.99);
const MIN_AMOUNT: Decimal = dec!(0.01);

/// Validate slip data against the Swiss payment standards.
/// Returns all validation errors found (not just the first).
pub(super) fn validate_qr_bill(bill: &QrBill) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_account(bill, &mut errors);
    validate_reference(bill, &mut errors);

    if let Some(amount) = bill.amount {
        if amount < MIN_AMOUNT || amount > MAX_AMOUNT {
            errors.push(ValidationError::with_rule(
                "amount",
                format!("amount {amount} must be between 0.01 and 999999999.99"),
                "QR-AMOUNT",
            ));
        }
    }

    validate_party(&bill.creditor, "creditor", &mut errors);
    if let Some(debtor) = &bill.debtor {
        validate_party(debtor, "debtor", &mut errors);
    }

    let free_text = bill.message.as_deref().map_or(0, |m| m.chars().count())
        + bill
            .additional_information
            .as_deref()
            .map_or(0, |a| a.chars().count());
    for (field, text) in [
        ("message", bill.message.as_deref()),
        ("additionalInformation", bill.additional_information.as_deref()),
    ] {
        if let Some(text) = text {
            check_charset(field, text, &mut errors);
        }
    }
    if free_text > 140 {
        errors.push(ValidationError::with_rule(
            "message",
            format!("message and additional information together exceed 140 characters ({free_text})"),
            "QR-MESSAGE",
        ));
    }

    // Only meaningful once the fields above are sane.
    if errors.is_empty() {
        let len = bill.payload().chars().count();
        if len > MAX_PAYLOAD_CHARS {
            errors.push(ValidationError::with_rule(
                "payload",
                format!("encoded payload has {len} characters, maximum is {MAX_PAYLOAD_CHARS}"),
                "QR-PAYLOAD",
            ));
        }
    }

    errors
}

fn validate_account(bill: &QrBill, errors: &mut Vec<ValidationError>) {
    if bill.account.is_empty() {
        errors.push(ValidationError::with_rule(
            "creditor.account",
            "creditor account (IBAN) is required",
            "QR-IBAN",
        ));
        return;
    }

    if let Err(e) = validate_iban(&bill.account) {
        errors.push(ValidationError::with_rule(
            "creditor.account",
            e.to_string(),
            "QR-IBAN",
        ));
        return;
    }

    if !is_qr_account_country(&bill.account[..2]) {
        errors.push(ValidationError::with_rule(
            "creditor.account",
            format!(
                "account must be a CH or LI IBAN, got country '{}'",
                &bill.account[..2]
            ),
            "QR-IBAN",
        ));
    }
}

fn validate_reference(bill: &QrBill, errors: &mut Vec<ValidationError>) {
    let qr_account = is_qr_iban(&bill.account);
    match (&bill.reference, qr_account) {
        (None, true) => errors.push(ValidationError::with_rule(
            "reference",
            "a QR-IBAN requires a QR reference",
            "QR-REFERENCE",
        )),
        (Some(r), true) if !is_qr_reference(r) => errors.push(ValidationError::with_rule(
            "reference",
            format!("'{r}' is not a valid QR reference (27 digits with check digit)"),
            "QR-REFERENCE",
        )),
        (Some(r), false) if is_qr_reference(r) => errors.push(ValidationError::with_rule(
            "reference",
            "a QR reference may only be used with a QR-IBAN",
            "QR-REFERENCE",
        )),
        (Some(r), false) if !is_creditor_reference(r) => {
            errors.push(ValidationError::with_rule(
                "reference",
                format!("'{r}' is not a valid creditor reference (ISO 11649)"),
                "QR-REFERENCE",
            ))
        }
        _ => {}
    }
}

fn validate_party(party: &Party, prefix: &str, errors: &mut Vec<ValidationError>) {
    let mut check = |field: &str, value: &str, required: bool, max: usize| {
        let len = value.trim().chars().count();
        if required && len == 0 {
            errors.push(ValidationError::new(
                format!("{prefix}.{field}"),
                format!("{field} must not be empty"),
            ));
        } else if len > max {
            errors.push(ValidationError::new(
                format!("{prefix}.{field}"),
                format!("{field} must be at most {max} characters, got {len}"),
            ));
        }
        check_charset(&format!("{prefix}.{field}"), value, errors);
    };

    check("name", &party.name, true, 70);
    check("address", &party.address, false, 70);
    check(
        "buildingNumber",
        party.building_number.as_deref().unwrap_or_default(),
        false,
        16,
    );
    check("zip", &party.zip, true, 16);
    check("city", &party.city, true, 35);

    let country = party.country_code().trim();
    if !is_known_country_code(country) || country.len() != 2 {
        errors.push(ValidationError::new(
            format!("{prefix}.country"),
            format!("country code '{country}' is not a known ISO 3166-1 alpha-2 code"),
        ));
    }
}

/// Payload fields are newline-separated, so no field may carry control characters.
fn check_charset(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if let Some(c) = value.chars().find(|c| c.is_control()) {
        errors.push(ValidationError::with_rule(
            field,
            format!("{field} contains control character {c:?}"),
            "QR-CHARSET",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Currency, PartyBuilder};

    fn bill() -> QrBill {
        QrBill {
            account: "CH4431999123000889012".into(),
            creditor: PartyBuilder::new("Muster SA", "Rue du Lac", "1000", "Lausanne").build(),
            debtor: None,
            amount: Some(dec!(64.62)),
            currency: Currency::Chf,
            reference: Some("210000000003139471430009017".into()),
            message: Some("Facture 2024-17".into()),
            additional_information: None,
        }
    }

    #[test]
    fn valid_bill_has_no_findings() {
        assert!(validate_qr_bill(&bill()).is_empty());
    }

    #[test]
    fn qr_iban_without_reference() {
        let errors = validate_qr_bill(&QrBill {
            reference: None,
            ..bill()
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "reference");
    }

    #[test]
    fn regular_iban_with_creditor_reference() {
        let b = QrBill {
            account: "CH5800791123000889012".into(),
            reference: Some("RF18539007547034".into()),
            ..bill()
        };
        assert!(validate_qr_bill(&b).is_empty());

        let b = QrBill {
            account: "CH5800791123000889012".into(),
            ..bill()
        };
        let errors = validate_qr_bill(&b);
        assert!(errors[0].message.contains("only be used with a QR-IBAN"));
    }

    #[test]
    fn foreign_account_rejected() {
        let errors = validate_qr_bill(&QrBill {
            account: "DE89370400440532013000".into(),
            reference: None,
            ..bill()
        });
        assert!(errors.iter().any(|e| e.message.contains("CH or LI")));
    }

    #[test]
    fn amount_bounds() {
        let errors = validate_qr_bill(&QrBill {
            amount: Some(dec!(0)),
            ..bill()
        });
        assert_eq!(errors[0].field, "amount");
        assert!(validate_qr_bill(&QrBill { amount: None, ..bill() }).is_empty());
    }

    #[test]
    fn field_lengths() {
        let mut b = bill();
        b.creditor.name = "x".repeat(71);
        b.creditor.city = String::new();
        let errors = validate_qr_bill(&b);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["creditor.name", "creditor.city"]);
    }

    #[test]
    fn free_text_limit() {
        let errors = validate_qr_bill(&QrBill {
            message: Some("m".repeat(100)),
            additional_information: Some("a".repeat(41)),
            ..bill()
        });
        assert_eq!(errors[0].field, "message");
    }

    #[test]
    fn line_breaks_are_rejected() {
        let mut b = bill();
        b.creditor.name = "Muster\nSA".into();
        b.message = Some("a\nb".into());
        let errors = validate_qr_bill(&b);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["creditor.name", "message"]);
        assert!(errors.iter().all(|e| e.rule.as_deref() == Some("QR-CHARSET")));
    }
}
