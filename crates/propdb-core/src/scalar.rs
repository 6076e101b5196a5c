//! Scalar conversions shared by sources and contexts
//!
//! Values are stored as strings. Numbers are rendered the way a JavaScript
//! `toString()` would render them (`5.0` becomes `"5"`) and parsed back with
//! `parseFloat` rules: the longest numeric prefix wins and anything without
//! one is `NaN`.

use serde_json::Number;

/// Render a JSON number in its canonical string form.
pub fn number_to_string(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(value) => float_to_string(value),
        None => number.to_string(),
    }
}

/// Render a float without a trailing `.0` for integral values.
///
/// Magnitudes below `1e-6` or from `1e21` up switch to exponent form with an
/// explicit exponent sign (`1e-7`, `1.5e+21`).
pub fn float_to_string(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() < 1e-6 || value.abs() >= 1e21 {
        exponent_form(value)
    } else {
        value.to_string()
    }
}

fn exponent_form(value: f64) -> String {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Parse the leading numeric prefix of `input`.
///
/// Leading whitespace is skipped, trailing garbage is ignored and input with
/// no numeric prefix yields `NaN`.
pub fn parse_float(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let rest = &trimmed[end..];
    if rest.starts_with("Infinity") {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().unwrap_or(f64::NAN)
}
