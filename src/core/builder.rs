use rust_decimal::Decimal;

use super::types::*;

/// Builder for invoice requests.
///
/// ```
/// use swissbill::core::*;
/// use rust_decimal_macros::dec;
///
/// let request = InvoiceRequestBuilder::new(
///     "2024-17",
///     PartyBuilder::new("Muster SA", "Rue du Lac", "1000", "Lausanne")
///         .building_number("1")
///         .account("CH93 0076 2011 6238 5295 7")
///         .build(),
/// )
/// .row(LineItem::new("1", "Conseil", "CHF 60.00"))
/// .vat(dec!(7.7))
/// .amount(dec!(64.62))
/// .build();
///
/// assert_eq!(request.rows.len(), 1);
/// ```
pub struct InvoiceRequestBuilder {
    bill_number: String,
    creditor: Party,
    debtor: Option<PartyDraft>,
    rows: Vec<LineItem>,
    vat: Option<Decimal>,
    amount: Option<Decimal>,
    currency: Currency,
    reference: Option<String>,
    message: Option<String>,
    additional_information: Option<String>,
}

impl InvoiceRequestBuilder {
    pub fn new(bill_number: impl Into<String>, creditor: Party) -> Self {
        Self {
            bill_number: bill_number.into(),
            creditor,
            debtor: None,
            rows: Vec::new(),
            vat: None,
            amount: None,
            currency: Currency::Chf,
            reference: None,
            message: None,
            additional_information: None,
        }
    }

    pub fn debtor(mut self, debtor: impl Into<PartyDraft>) -> Self {
        self.debtor = Some(debtor.into());
        self
    }

    pub fn row(mut self, row: LineItem) -> Self {
        self.rows.push(row);
        self
    }

    pub fn vat(mut self, rate: Decimal) -> Self {
        self.vat = Some(rate);
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn additional_information(mut self, info: impl Into<String>) -> Self {
        self.additional_information = Some(info.into());
        self
    }

    /// Build the request. No validation happens here; amounts are checked by
    /// [`crate::core::reconcile`] and slip fields by the QR-bill validator.
    pub fn build(self) -> InvoiceRequest {
        InvoiceRequest {
            creditor: self.creditor,
            debtor: self.debtor,
            bill_number: self.bill_number,
            rows: self.rows,
            vat: self.vat,
            amount: self.amount,
            currency: self.currency,
            reference: self.reference,
            message: self.message,
            additional_information: self.additional_information,
        }
    }
}

/// Builder for a [`Party`].
pub struct PartyBuilder {
    name: String,
    address: String,
    building_number: Option<String>,
    zip: String,
    city: String,
    country: Option<String>,
    account: Option<String>,
}

impl PartyBuilder {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            building_number: None,
            zip: zip.into(),
            city: city.into(),
            country: None,
            account: None,
        }
    }

    pub fn building_number(mut self, number: impl Into<String>) -> Self {
        self.building_number = Some(number.into());
        self
    }

    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.country = Some(code.into());
        self
    }

    pub fn account(mut self, iban: impl Into<String>) -> Self {
        self.account = Some(iban.into());
        self
    }

    pub fn build(self) -> Party {
        Party {
            name: self.name,
            address: self.address,
            building_number: self.building_number,
            zip: self.zip,
            city: self.city,
            country: self.country,
            account: self.account,
        }
    }
}
