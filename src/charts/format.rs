use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Currency with thousands separators: `2172536` → `$2,172,536`.
///
/// Fractions are kept without trailing zeros.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let text = amount.abs().normalize().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };
    match fraction {
        Some(fraction) => format!("{sign}${}.{fraction}", group_thousands(whole)),
        None => format!("{sign}${}", group_thousands(whole)),
    }
}

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Two significant digits with an SI suffix: `1_500_000.0` → `1.5M`.
#[must_use]
pub fn format_si(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0.0".to_owned();
    }

    let exponent = value.abs().log10().floor();
    let rounded = {
        let factor = 10f64.powf(exponent - 1.0);
        (value / factor).round() * factor
    };
    let exponent = rounded.abs().log10().floor() as i32;
    let prefix_exponent = (exponent.div_euclid(3) * 3).clamp(-24, 24);
    let mantissa = rounded / 10f64.powi(prefix_exponent);
    let decimals = (1 - (exponent - prefix_exponent)).max(0) as usize;
    let prefix = SI_PREFIXES[((prefix_exponent + 24) / 3) as usize];
    format!("{mantissa:.decimals$}{prefix}")
}

/// Numeric month and year, as in `6/2018`.
#[must_use]
pub fn format_month_year(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.year())
}
