use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::BillError;
use super::money::round_half_up;
use super::types::InvoiceRequest;

/// How the caller-supplied `amount` is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Reject the request unless `amount` equals rows + VAT.
    #[default]
    Strict,
    /// Ignore `amount` and bill the computed grand total.
    Derive,
}

impl std::str::FromStr for ValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "derive" | "lenient" => Ok(Self::Derive),
            other => Err(format!("unknown validation policy '{other}' (expected strict or derive)")),
        }
    }
}

/// Amounts derived once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledAmounts {
    /// Parsed total of every row, in request order.
    pub row_totals: Vec<Decimal>,
    /// Sum of all row totals.
    pub line_sum: Decimal,
    /// VAT percentage, if the request carried one.
    pub vat_rate: Option<Decimal>,
    /// VAT on `line_sum`, rounded to cents. Zero without a rate.
    pub vat_amount: Decimal,
    /// `line_sum + vat_amount`; the amount billed on the payment slip.
    pub grand_total: Decimal,
}

/// Parse row totals, compute VAT and check the caller amount per `policy`.
pub fn reconcile(
    request: &InvoiceRequest,
    policy: ValidationPolicy,
) -> Result<ReconciledAmounts, BillError> {
    if request.rows.is_empty() {
        return Err(BillError::InvalidRequest("rows must not be empty".into()));
    }

    let row_totals = request
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| row.total.amount(&format!("rows[{i}].total")))
        .collect::<Result<Vec<_>, _>>()?;
    let line_sum = row_totals
        .iter()
        .try_fold(Decimal::ZERO, |sum, total| sum.checked_add(*total))
        .ok_or_else(|| overflow("sum of row totals"))?;

    let vat_amount = match request.vat {
        Some(rate) => {
            if rate.is_sign_negative() || rate > dec!(100) {
                return Err(BillError::InvalidRequest(format!(
                    "vat must be between 0 and 100, got {rate}"
                )));
            }
            let tax = line_sum
                .checked_mul(rate)
                .and_then(|v| v.checked_div(dec!(100)))
                .ok_or_else(|| overflow("vat amount"))?;
            round_half_up(tax, 2)
        }
        None => Decimal::ZERO,
    };
    let grand_total = line_sum
        .checked_add(vat_amount)
        .ok_or_else(|| overflow("grand total"))?;

    if policy == ValidationPolicy::Strict && request.amount != Some(grand_total) {
        return Err(BillError::AmountMismatch {
            amount: request
                .amount
                .map(|a| a.normalize().to_string())
                .unwrap_or_else(|| "missing".into()),
            tax: vat_amount.normalize().to_string(),
            sum: line_sum.normalize().to_string(),
        });
    }

    Ok(ReconciledAmounts {
        row_totals,
        line_sum,
        vat_rate: request.vat,
        vat_amount,
        grand_total,
    })
}

fn overflow(what: &str) -> BillError {
    BillError::InvalidRequest(format!("{what} is out of range"))
}
