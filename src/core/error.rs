use thiserror::Error;

/// Errors that can occur while handling an invoice request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BillError {
    /// The request carried no body at all.
    #[error("No data provided")]
    NoData,

    /// The body is not parseable JSON.
    #[error("Invalid JSON format")]
    InvalidJson,

    /// The body is JSON but does not have the shape of an invoice request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A monetary value could not be parsed.
    #[error("{field}: invalid money value '{value}': {reason}")]
    Money {
        /// Path of the offending field (e.g. "rows[2].total").
        field: String,
        /// The raw input value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Caller-supplied amount does not match the reconciled grand total.
    #[error("Amount is not equal to taxAmount + sum, amount: {amount} taxAmount: {tax} sum: {sum}")]
    AmountMismatch {
        /// Caller amount, or "missing".
        amount: String,
        /// Computed VAT amount.
        tax: String,
        /// Sum of all row totals.
        sum: String,
    },

    /// One or more payment slip rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The PDF or QR code could not be produced.
    #[error("render error: {0}")]
    Render(String),

    /// The object store rejected an upload or presign request.
    #[error("{0}")]
    Storage(String),

    /// Handler configuration is invalid or incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}

impl BillError {
    /// HTTP status code reported for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NoData
            | Self::InvalidJson
            | Self::InvalidRequest(_)
            | Self::Money { .. }
            | Self::AmountMismatch { .. }
            | Self::Validation(_) => 400,
            Self::Render(_) | Self::Storage(_) | Self::Config(_) => 500,
        }
    }

    /// Collapse a list of validation findings into a single error.
    pub fn from_findings(findings: &[ValidationError]) -> Self {
        let msg = findings
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation(msg)
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "creditor.account").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Swiss payment standards rule reference if applicable (e.g. "QR-IBAN").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule reference.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error with a rule reference.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(BillError::InvalidJson.status_code(), 400);
        assert_eq!(BillError::NoData.status_code(), 400);
        assert_eq!(BillError::Validation("x".into()).status_code(), 400);
    }

    #[test]
    fn server_errors_map_to_500() {
        assert_eq!(BillError::Storage("denied".into()).status_code(), 500);
        assert_eq!(BillError::Render("broken".into()).status_code(), 500);
    }

    #[test]
    fn mismatch_message_names_all_values() {
        let err = BillError::AmountMismatch {
            amount: "60".into(),
            tax: "4.62".into(),
            sum: "60".into(),
        };
        assert_eq!(
            err.to_string(),
            "Amount is not equal to taxAmount + sum, amount: 60 taxAmount: 4.62 sum: 60"
        );
    }

    #[test]
    fn findings_are_joined() {
        let err = BillError::from_findings(&[
            ValidationError::new("creditor.name", "must not be empty"),
            ValidationError::with_rule("creditor.account", "bad checksum", "IBAN"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: creditor.name: must not be empty; [IBAN] creditor.account: bad checksum"
        );
    }
}
