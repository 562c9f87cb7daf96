/// Significant digits used when nothing else is configured.
pub const DEFAULT_PRECISION: usize = 6;

/// Formats `value` with `precision` significant digits, like C's `%g`.
///
/// Fixed notation is used when the decimal exponent lies in
/// `-4..precision`, scientific notation otherwise. Trailing zeros and a
/// dangling decimal point are removed. A precision of `0` is treated as `1`.
///
/// ## Example
/// ```
/// use expreval::util::num::format_significant;
///
/// assert_eq!(format_significant(14.0, 6), "14");
/// assert_eq!(format_significant(500.0 / 18.0, 6), "27.7778");
/// assert_eq!(format_significant(-0.5, 6), "-0.5");
/// assert_eq!(format_significant(1234567.0, 6), "1.23457e+06");
/// assert_eq!(format_significant(0.00001, 6), "1e-05");
/// ```
#[must_use]
pub fn format_significant(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value.is_sign_negative() {
            "-inf".to_string()
        } else {
            "inf".to_string()
        };
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    // Rounding to the requested digits first decides the exponent, so 999999.5
    // becomes 1e+06 and not 1000000.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let digits = i64::try_from(precision).unwrap_or(i64::MAX);

    if exponent < -4 || exponent >= digits {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.unsigned_abs())
    } else {
        let decimals = usize::try_from(digits - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Strips trailing zeros after a decimal point, and the point itself if
/// nothing remains behind it.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
