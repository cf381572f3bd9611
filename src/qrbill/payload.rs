use rust_decimal::Decimal;

use super::QrBill;
use crate::core::Party;
use crate::core::money::round_half_up;

/// Upper bound for the encoded text.
pub const MAX_PAYLOAD_CHARS: usize = 997;

const HEADER: [&str; 3] = ["SPC", "0200", "1"];
const TRAILER: &str = "EPD";

/// Assemble the payload: header, account, creditor, empty ultimate creditor,
/// amount, debtor, reference, message, trailer and optional bill information.
pub(super) fn build_payload(bill: &QrBill) -> String {
    let mut lines: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();

    lines.push(bill.account.clone());
    push_address(&mut lines, Some(&bill.creditor));
    // Ultimate creditor: reserved for future use, always empty.
    lines.extend(std::iter::repeat_n(String::new(), 7));

    lines.push(bill.amount.map(payload_amount).unwrap_or_default());
    lines.push(bill.currency.code().to_string());
    push_address(&mut lines, bill.debtor.as_ref());

    lines.push(bill.reference_type().code().to_string());
    lines.push(bill.reference.clone().unwrap_or_default());
    lines.push(bill.message.clone().unwrap_or_default());
    lines.push(TRAILER.to_string());
    if let Some(info) = &bill.additional_information {
        lines.push(info.clone());
    }

    lines.join("\n")
}

/// Structured address block (type `S`) or seven empty lines.
fn push_address(lines: &mut Vec<String>, party: Option<&Party>) {
    let Some(party) = party else {
        lines.extend(std::iter::repeat_n(String::new(), 7));
        return;
    };
    lines.push("S".to_string());
    lines.push(party.name.trim().to_string());
    lines.push(party.address.trim().to_string());
    lines.push(
        party
            .building_number
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    );
    lines.push(party.zip.trim().to_string());
    lines.push(party.city.trim().to_string());
    lines.push(party.country_code().trim().to_ascii_uppercase());
}

fn payload_amount(amount: Decimal) -> String {
    let mut value = round_half_up(amount, 2);
    value.rescale(2);
    value.to_string()
}
