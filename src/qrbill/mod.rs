//! Swiss QR-bill data: account and reference checks, field validation and
//! the `SPC` payload encoded in the QR code.
//!
//! A [`QrBill`] is derived from a request after reconciliation; it never
//! changes the request itself.

mod iban;
mod payload;
mod reference;
mod validate;

pub use iban::{IbanError, format_iban, is_qr_iban, normalize_iban, validate_iban};
pub use payload::MAX_PAYLOAD_CHARS;
pub use reference::{
    create_qr_reference, format_reference, is_creditor_reference, is_qr_reference,
    normalize_reference, qr_check_digit,
};

use rust_decimal::Decimal;

use crate::core::{
    BillError, Currency, EffectiveDebtor, InvoiceRequest, Party, ReconciledAmounts,
    ValidationError,
};

/// Reference type field of the payment slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceType {
    /// QR reference, only with a QR-IBAN.
    Qrr,
    /// ISO 11649 creditor reference.
    Scor,
    /// No reference.
    Non,
}

impl ReferenceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Qrr => "QRR",
            Self::Scor => "SCOR",
            Self::Non => "NON",
        }
    }
}

/// Everything printed on and encoded in the payment part.
#[derive(Debug, Clone, PartialEq)]
pub struct QrBill {
    /// Creditor IBAN, normalized (no spaces, uppercase).
    pub account: String,
    pub creditor: Party,
    pub debtor: Option<Party>,
    /// `None` leaves the amount blank for the payer to fill in.
    pub amount: Option<Decimal>,
    pub currency: Currency,
    /// Reference without spaces.
    pub reference: Option<String>,
    pub message: Option<String>,
    pub additional_information: Option<String>,
}

impl QrBill {
    /// Assemble slip data from a request, its reconciled amounts and the
    /// debtor as the slip may use it. The billed amount is the grand total.
    pub fn from_request(
        request: &InvoiceRequest,
        amounts: &ReconciledAmounts,
        debtor: &EffectiveDebtor,
    ) -> Self {
        let non_empty = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            account: request
                .creditor
                .account
                .as_deref()
                .map(normalize_iban)
                .unwrap_or_default(),
            creditor: request.creditor.clone(),
            debtor: debtor.for_slip.clone(),
            amount: Some(amounts.grand_total),
            currency: request.currency,
            reference: non_empty(&request.reference).map(|r| normalize_reference(&r)),
            message: non_empty(&request.message),
            additional_information: non_empty(&request.additional_information),
        }
    }

    pub fn reference_type(&self) -> ReferenceType {
        match &self.reference {
            Some(r) if is_qr_reference(r) => ReferenceType::Qrr,
            Some(_) => ReferenceType::Scor,
            None => ReferenceType::Non,
        }
    }

    /// All rule violations; empty means the slip can be printed.
    pub fn validate(&self) -> Vec<ValidationError> {
        validate::validate_qr_bill(self)
    }

    /// The `SPC` text encoded in the QR code.
    pub fn payload(&self) -> String {
        payload::build_payload(self)
    }

    /// Validate and return `self`, or every finding as one error.
    pub fn checked(self) -> Result<Self, BillError> {
        let findings = self.validate();
        if findings.is_empty() {
            Ok(self)
        } else {
            Err(BillError::from_findings(&findings))
        }
    }
}
