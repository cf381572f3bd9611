#![no_main]

use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;
use swissbill::core::Currency;
use swissbill::core::money::{format_money, parse_money};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs. Amounts a slip can carry must
        // survive formatting.
        if let Ok(value) = parse_money(s) {
            if value.abs() < Decimal::from(1_000_000_000_000i64) {
                let text = format_money(Currency::Chf, value);
                assert_eq!(parse_money(&text), Ok(value));
            }
        }
    }
});
