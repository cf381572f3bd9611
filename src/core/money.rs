//! Money parsing and formatting.
//!
//! Row totals arrive as display strings such as `"CHF 1'234.50"`. Parsing is
//! strict: anything that is not an optionally prefixed, apostrophe-grouped
//! decimal with at most two fraction digits is rejected with a reason.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::types::Currency;

/// Parse a money string into a decimal.
///
/// Accepted: optional `CHF`/`EUR` prefix (any case, optional whitespace),
/// optional minus sign, digits grouped by `'` or `’` in threes, and up to two
/// fraction digits after a `.`.
pub fn parse_money(raw: &str) -> Result<Decimal, String> {
    let mut s = raw.trim();
    if s.is_empty() {
        return Err("empty value".into());
    }

    for code in ["CHF", "EUR"] {
        if s.get(..3).is_some_and(|p| p.eq_ignore_ascii_case(code)) {
            s = s[3..].trim_start();
            break;
        }
    }

    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (body, None),
    };

    let mut digits = String::with_capacity(body.len());
    let mut group_len = 0usize;
    let mut grouped = false;
    for c in int_part.chars() {
        match c {
            '0'..='9' => {
                digits.push(c);
                group_len += 1;
            }
            '\'' | '\u{2019}' => {
                if group_len == 0 || (grouped && group_len != 3) {
                    return Err("misplaced thousands separator".into());
                }
                grouped = true;
                group_len = 0;
            }
            other => return Err(format!("unexpected character '{other}'")),
        }
    }

    if digits.is_empty() {
        return Err("no digits before the decimal point".into());
    }
    if grouped && group_len != 3 {
        return Err("misplaced thousands separator".into());
    }

    if let Some(frac) = frac_part {
        if frac.is_empty() || frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err("expected one or two decimal places".into());
        }
        digits.push('.');
        digits.push_str(frac);
    }

    let value = Decimal::from_str(&digits).map_err(|e| e.to_string())?;
    Ok(if negative { -value } else { value })
}

/// Format with the currency code and apostrophe grouping: `CHF 1'234.50`.
pub fn format_money(currency: Currency, amount: Decimal) -> String {
    format!("{} {}", currency.code(), group_thousands(amount, '\''))
}

/// Format for the payment slip amount field: `1 234.50`.
pub fn format_slip_amount(amount: Decimal) -> String {
    group_thousands(amount, ' ')
}

/// Two fraction digits, thousands separated by `sep`.
pub fn group_thousands(amount: Decimal, sep: char) -> String {
    let mut rounded = round_half_up(amount, 2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded = rounded.abs();
    rounded.rescale(2);

    let text = rounded.to_string();
    let (int_part, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
