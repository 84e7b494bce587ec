//! Display formatting for money and calendar dates.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::TransactionType;

/// numfmt switches to scientific notation for large values, e.g. "$1.0e15".
const LARGE_AMOUNT_CENTS: f64 = 1e11;

/// Format `number` as US dollars with thousands separators and two decimal places,
/// e.g. `-$1,000.00`.
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    // Anything that rounds to zero cents is displayed as zero, which also avoids "-$0.00".
    let cents = (number * 100.0).round();

    let formatted_string = if cents.abs() >= LARGE_AMOUNT_CENTS {
        return format_large_currency(cents);
    } else if cents < 0.0 {
        negative_fmt.fmt_string(cents.abs() / 100.0)
    } else if cents > 0.0 {
        positive_fmt.fmt_string(cents / 100.0)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    };

    pad_cents(formatted_string)
}

/// Group whole dollars by hand, e.g. `1e17` cents as "$1,000,000,000,000,000.00".
fn format_large_currency(cents: f64) -> String {
    let sign = if cents < 0.0 { "-" } else { "" };
    // Saturates for values beyond u128, including infinity.
    let whole_cents = cents.abs() as u128;
    let dollars = (whole_cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{:02}", whole_cents % 100)
}

/// numfmt drops trailing zeros, e.g. "12.30" comes out as "12.3" and "12.00" as "12".
fn pad_cents(mut formatted_string: String) -> String {
    match formatted_string.rfind('.') {
        None => formatted_string.push_str(".00"),
        Some(dot) => {
            for _ in formatted_string.len() - dot - 1..2 {
                formatted_string.push('0');
            }
        }
    }

    formatted_string
}

/// Format a transaction amount with the sign implied by its direction,
/// e.g. `+$3,000.00` for income and `-$50.00` for an expense.
///
/// `amount` is expected to be non-negative, the sign comes from `transaction_type`.
pub fn format_signed_amount(amount: f64, transaction_type: TransactionType) -> String {
    let sign = match transaction_type {
        TransactionType::Income => '+',
        TransactionType::Expense => '-',
    };

    format!("{sign}{}", format_currency(amount.abs()))
}

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Format a calendar date for display, e.g. "Jan 15, 2024".
pub fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT).unwrap_or_else(|error| {
        tracing::error!("could not format date {date}: {error}");
        date.to_string()
    })
}
