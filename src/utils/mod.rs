//! Utility functions for formatting
//!
//! Centralized display helpers so tables show amounts and unit counts the
//! same way everywhere.

use crate::tax::{Amount, Quantity};

/// Insert `,` between groups of three digits of an unsigned integer string
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Core formatting function with full control over output.
///
/// Formats an amount with `,` as thousands separator and `.` as decimal
/// separator, right-aligned to `width` (0 for no padding).
///
/// # Examples
/// ```
/// use capital_gains::tax::Amount;
/// use capital_gains::utils::format_amount_with_width;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount_with_width(Amount::of(dec!(1234.5)), 0), "1,234.50");
/// assert_eq!(format_amount_with_width(Amount::of(dec!(1234)), 12), "    1,234.00");
/// ```
pub fn format_amount_with_width(amount: Amount, width: usize) -> String {
    let value = amount.value();
    let sign = if amount.is_negative() { "-" } else { "" };

    let formatted = format!("{:.2}", value.abs());
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let result = format!("{}{}.{}", sign, group_thousands(integer_part), decimal_part);

    if width > 0 && result.len() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

/// Format an amount: "1,234.56"
///
/// # Examples
/// ```
/// use capital_gains::tax::Amount;
/// use capital_gains::utils::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(Amount::of(dec!(7998))), "7,998.00");
/// assert_eq!(format_amount(Amount::of(dec!(-500))), "-500.00");
/// ```
pub fn format_amount(amount: Amount) -> String {
    format_amount_with_width(amount, 0)
}

/// Format a unit count with thousands separators: "10,000"
pub fn format_quantity(quantity: Quantity) -> String {
    let value = quantity.value();
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(&value.unsigned_abs().to_string()))
}
