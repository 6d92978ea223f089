//! Display formatting for rupee amounts and rates

/// Amounts at or above this are shown in crore (Cr)
pub const CRORE: f64 = 10_000_000.0;

/// Amounts at or above this are shown in lakh (L)
pub const LAKH: f64 = 100_000.0;

/// Format a rupee amount for display.
///
/// `₹1.14 Cr` from one crore up, `₹4.50 L` from one lakh up, otherwise the
/// amount with thousands separators and at most two decimals (`₹12,345.5`).
/// The amount is rounded to two decimals before picking a unit, and the unit
/// is picked on the magnitude, so `-2 Cr` reads `₹-2.00 Cr`.
pub fn format_inr(amount: f64) -> String {
    let rounded = round2(amount);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let magnitude = rounded.abs();

    if magnitude >= CRORE {
        format!("₹{}{:.2} Cr", sign, magnitude / CRORE)
    } else if magnitude >= LAKH {
        format!("₹{}{:.2} L", sign, magnitude / LAKH)
    } else {
        format!("₹{}{}", sign, group_thousands(magnitude))
    }
}

/// Rate as a percentage with one decimal, e.g. `0.1` -> `10.0%`
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Round to the nearest whole currency unit, halves away from zero
pub fn round_amount(amount: f64) -> f64 {
    amount.round()
}

/// Round to two decimals (used for multipliers)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Takes a non-negative amount below one lakh, where the Indian and Western
// groupings coincide: a single comma before the last three digits.
fn group_thousands(magnitude: f64) -> String {
    let fixed = format!("{:.2}", magnitude);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}
