//! Rounding with the exact semantics the dashboard numbers were produced with.
//!
//! - [`js_round`]: nearest integer, ties toward positive infinity.
//! - [`to_fixed`]: round the *exact* binary value to `digits` decimals, ties
//!   away from zero, then read the decimal back as the nearest `f64`.
//!
//! `{:.N}` formatting alone is not enough: it breaks exact ties to even.

/// Extra fraction digits printed to tell an exact tie from a near miss.
const TIE_GUARD_DIGITS: usize = 40;

/// Nearest integer, halves rounded up (`-2.5 -> -2`, `2.5 -> 3`).
pub fn js_round(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round to `digits` decimals and parse back.
pub fn to_fixed(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value == 0.0 {
        return 0.0;
    }
    let magnitude = value.abs();
    let wide = format!("{:.*}", digits + TIE_GUARD_DIGITS, magnitude);
    let (head, tail) = wide.split_at(wide.len() - TIE_GUARD_DIGITS);
    let exact_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let text = if exact_tie {
        increment_last_digit(head.trim_end_matches('.'))
    } else {
        format!("{:.*}", digits, magnitude)
    };
    let rounded: f64 = text.parse().unwrap_or(magnitude);
    if value.is_sign_negative() { -rounded } else { rounded }
}

/// Adds one unit in the last place of a plain decimal string.
fn increment_last_digit(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if *b == b'.' {
            continue;
        }
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            carry = false;
            break;
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
