//! Display formatting for amounts and percentages.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// numfmt switches to scientific notation from a trillion upwards.
const NUMFMT_PLAIN_LIMIT: f64 = 1e12;

/// Formats a number as dollars with thousands separators and two decimal
/// places, e.g. "$1,234.50" or "-$3.00". Amounts are rounded to the nearest
/// cent.
pub fn format_currency(number: f64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("'$' is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    if !number.is_finite() {
        return "$0.00".to_owned();
    }

    // numfmt truncates rather than rounds, and renders anything under a cent in
    // scientific notation.
    let cents = round_to_cents(number.abs());

    if cents == 0.0 {
        return "$0.00".to_owned();
    }

    let sign = if number < 0.0 { "-" } else { "" };
    let formatted = if cents < NUMFMT_PLAIN_LIMIT {
        pad_cents(fmt.fmt_string(cents))
    } else {
        format!("${}", group_thousands(&format!("{cents:.2}")))
    };

    format!("{sign}{formatted}")
}

fn round_to_cents(number: f64) -> f64 {
    (number * 100.0).round() / 100.0
}

// numfmt drops trailing zeros, so "12.30" comes out as "12.3" and "5.00" as "5".
fn pad_cents(mut formatted: String) -> String {
    match formatted.rfind('.') {
        None => formatted.push_str(".00"),
        Some(point) => {
            for _ in formatted.len() - point - 1..2 {
                formatted.push('0');
            }
        }
    }

    formatted
}

/// Inserts a comma between each group of three integer digits of `decimal`.
fn group_thousands(decimal: &str) -> String {
    let (integer, fraction) = decimal.split_once('.').unwrap_or((decimal, ""));
    let mut grouped = String::with_capacity(decimal.len() + integer.len() / 3);

    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}

/// Formats a number as dollars scaled to thousands, millions, billions or
/// trillions with two decimal places, e.g. "$1.25m". Amounts under a thousand
/// are shown in full, e.g. "$950.00".
pub fn format_compact_currency(number: f64) -> String {
    const SCALES: [(f64, &str); 5] = [
        (1e12, "t"),
        (1e9, "b"),
        (1e6, "m"),
        (1e3, "k"),
        (1.0, ""),
    ];

    if !number.is_finite() {
        return "$0.00".to_owned();
    }

    let magnitude = number.abs();

    for (scale, suffix) in SCALES {
        // The scale is chosen after rounding so 999.995 becomes "$1.00k".
        let scaled = round_to_cents(magnitude / scale);

        if scaled >= 1.0 {
            let sign = if number < 0.0 { "-" } else { "" };
            return format!("{sign}${scaled:.2}{suffix}");
        }
    }

    let cents = round_to_cents(magnitude);

    if cents == 0.0 {
        "$0.00".to_owned()
    } else {
        let sign = if number < 0.0 { "-" } else { "" };
        format!("{sign}${cents:.2}")
    }
}

/// Formats a change in percent with an explicit sign, e.g. "+131%" or "-56%".
pub fn format_signed_percentage(value: f64) -> String {
    let rounded = value.round();

    // Avoid "-0%"
    if rounded == 0.0 {
        "+0%".to_owned()
    } else if rounded > 0.0 {
        format!("+{rounded:.0}%")
    } else {
        format!("{rounded:.0}%")
    }
}

/// Formats a change in percent to two decimal places with an explicit sign,
/// e.g. "+12.35%".
pub fn format_precise_change(value: f64) -> String {
    let rounded = round_to_cents(value);

    if rounded == 0.0 || !rounded.is_finite() {
        "+0.00%".to_owned()
    } else if rounded > 0.0 {
        format!("+{rounded:.2}%")
    } else {
        format!("{rounded:.2}%")
    }
}

/// Formats a share of a total to one decimal place, e.g. "85.7%".
pub fn format_share(percentage: f64) -> String {
    let rounded = (percentage * 10.0).round() / 10.0;

    if rounded == 0.0 {
        "0.0%".to_owned()
    } else {
        format!("{rounded:.1}%")
    }
}
