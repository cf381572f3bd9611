use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// An invoice request as submitted by the caller.
///
/// Field names follow the caller's JSON; `bill_number` keeps its snake_case
/// spelling and also accepts `billNumber`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    /// Payee; also the sender of the invoice letter.
    pub creditor: Party,
    /// Payer. May be incomplete, see [`crate::core::EffectiveDebtor`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor: Option<PartyDraft>,
    /// Invoice number shown in the title line.
    #[serde(
        rename = "bill_number",
        alias = "billNumber",
        deserialize_with = "text_or_number"
    )]
    pub bill_number: String,
    /// Itemized billing rows.
    pub rows: Vec<LineItem>,
    /// VAT percentage (e.g. 7.7).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<Decimal>,
    /// Caller-computed grand total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Payment currency.
    #[serde(default)]
    pub currency: Currency,
    /// QR reference (27 digits) or creditor reference (RF...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Unstructured message printed under "Additional information".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Structured bill information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
}

/// A fully specified party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    /// Street name.
    pub address: String,
    #[serde(
        default,
        deserialize_with = "opt_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub building_number: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub zip: String,
    pub city: String,
    /// ISO 3166-1 alpha-2 code, `CH` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// IBAN or QR-IBAN. Required for the creditor only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl Party {
    pub fn country_code(&self) -> &str {
        self.country.as_deref().unwrap_or(DEFAULT_COUNTRY)
    }

    /// Street and building number on one line.
    pub fn street_line(&self) -> String {
        match &self.building_number {
            Some(number) => format!("{} {}", self.address, number),
            None => self.address.clone(),
        }
    }
}

const DEFAULT_COUNTRY: &str = "CH";

/// A party where every field may be missing, as debtors arrive from callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub building_number: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl PartyDraft {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.address,
            &self.building_number,
            &self.zip,
            &self.city,
            &self.country,
        ]
        .iter()
        .all(|field| field.as_deref().is_none_or(|v| v.trim().is_empty()))
    }

    /// Convert into a [`Party`] if name, address, zip, city and country are all set.
    pub fn complete(&self) -> Option<Party> {
        let present = |field: &Option<String>| {
            field
                .as_ref()
                .filter(|v| !v.trim().is_empty())
                .cloned()
        };
        Some(Party {
            name: present(&self.name)?,
            address: present(&self.address)?,
            building_number: present(&self.building_number),
            zip: present(&self.zip)?,
            city: present(&self.city)?,
            country: Some(present(&self.country)?),
            account: None,
        })
    }
}

impl From<Party> for PartyDraft {
    fn from(party: Party) -> Self {
        Self {
            name: Some(party.name),
            address: Some(party.address),
            building_number: party.building_number,
            zip: Some(party.zip),
            city: Some(party.city),
            country: party.country,
        }
    }
}

/// One billing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(
        default,
        deserialize_with = "opt_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<String>,
    /// Free-form quantity ("2", "1.5 h").
    #[serde(deserialize_with = "text_or_number")]
    pub quantity: String,
    pub description: String,
    /// Row total, either a money string ("CHF 1'200.00") or a JSON number.
    pub total: MoneyInput,
}

impl LineItem {
    pub fn new(
        quantity: impl Into<String>,
        description: impl Into<String>,
        total: impl Into<MoneyInput>,
    ) -> Self {
        Self {
            position: None,
            quantity: quantity.into(),
            description: description.into(),
            total: total.into(),
        }
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

/// A monetary value as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoneyInput {
    Text(String),
    Number(Decimal),
}

impl MoneyInput {
    /// Parse into a decimal; `field` names the value in error messages.
    pub fn amount(&self, field: &str) -> Result<Decimal, super::BillError> {
        match self {
            Self::Text(raw) => super::money::parse_money(raw).map_err(|reason| {
                super::BillError::Money {
                    field: field.to_string(),
                    value: raw.clone(),
                    reason,
                }
            }),
            Self::Number(value) => Ok(*value),
        }
    }
}

impl From<&str> for MoneyInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MoneyInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for MoneyInput {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

/// Currencies accepted on a Swiss QR-bill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Chf,
    Eur,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Chf => "CHF",
            Self::Eur => "EUR",
        }
    }

    /// Parse from ISO 4217 code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CHF" => Some(Self::Chf),
            "EUR" => Some(Self::Eur),
            _ => None,
        }
    }
}

/// Language of the printed labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    De,
    #[default]
    Fr,
    It,
    En,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" => Ok(Self::De),
            "fr" => Ok(Self::Fr),
            "it" => Ok(Self::It),
            "en" => Ok(Self::En),
            other => Err(format!("unknown language '{other}' (expected de, fr, it or en)")),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Int(n) => n.to_string(),
            TextOrNumber::Float(f) => f.to_string(),
        }
    }
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    TextOrNumber::deserialize(deserializer).map(String::from)
}

fn opt_text_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(String::from))
}
