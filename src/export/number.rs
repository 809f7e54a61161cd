//! Number formatting shared by the clip writers.

/// Format a value in general notation with `precision` significant digits.
///
/// Matches the classic `%g` conversion: fixed notation for moderate
/// exponents, scientific otherwise, with trailing zeros removed.
///
/// ```
/// use svg2clip::export::number::general;
///
/// assert_eq!(general(0.5, 6), "0.5");
/// assert_eq!(general(3.0 / 1024.0, 6), "0.00292969");
/// assert_eq!(general(6562.0, 6), "6562");
/// assert_eq!(general(0.00001, 6), "1e-05");
/// ```
pub fn general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // Round to the requested significant digits first so the exponent
    // reflects any carry (e.g. 999999.5 -> 1e+06).
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Format a value in fixed notation with exactly `decimals` digits after the
/// point. Negative zero is printed without a sign.
///
/// ```
/// use svg2clip::export::number::fixed;
///
/// assert_eq!(fixed(3.46, 3), "3.460");
/// assert_eq!(fixed(-0.0001, 3), "0.000");
/// ```
pub fn fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
