//! Human-readable renderings of snapshot values (en-US conventions).

use crate::rounding::to_fixed;

const COMPACT_UNITS: [(f64, &str); 4] = [(1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

/// `$1,234.56`, `-$0.50`.
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", to_fixed(value.abs(), 2));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Short compact notation with up to 2 fraction digits: `1.42T`, `350.5M`, `999`.
pub fn format_compact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let mut unit_idx = None;
    for (idx, (scale, _)) in COMPACT_UNITS.iter().enumerate() {
        if magnitude >= *scale {
            unit_idx = Some(idx);
        }
    }
    // 999_999 rounds to 1000K, which reads as 1M.
    let mut scaled = match unit_idx {
        Some(idx) => to_fixed(magnitude / COMPACT_UNITS[idx].0, 2),
        None => to_fixed(magnitude, 2),
    };
    if scaled >= 1000.0 {
        let next = unit_idx.map_or(0, |idx| idx + 1);
        if next < COMPACT_UNITS.len() {
            unit_idx = Some(next);
            scaled = to_fixed(magnitude / COMPACT_UNITS[next].0, 2);
        }
    }

    let suffix = unit_idx.map_or("", |idx| COMPACT_UNITS[idx].1);
    format!("{}{}{}", sign, trim_fraction(scaled), suffix)
}

/// `$` followed by [`format_compact`].
pub fn format_money_compact(value: f64) -> String {
    let compact = format_compact(value);
    match compact.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", compact),
    }
}

/// Signed percentage with 2 decimals: `+4.35%`, `-0.08%`.
pub fn format_percent(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "-" };
    format!("{}{:.2}%", sign, to_fixed(value.abs(), 2))
}

fn trim_fraction(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
