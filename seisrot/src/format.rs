//! Fixed-width number formatting for ASCII seismograms.
//!
//! Output lines follow the layout SPECFEM writes for `.sem.ascii` files:
//! time as `%11.6f` then amplitude as `%19.7E`.

/// Width of the time column.
pub const TIME_WIDTH: usize = 11;

/// Decimal places of the time column.
pub const TIME_PRECISION: usize = 6;

/// Width of the amplitude column.
pub const AMPLITUDE_WIDTH: usize = 19;

/// Mantissa decimal places of the amplitude column.
pub const AMPLITUDE_PRECISION: usize = 7;

/// Format `value` like C's `%{width}.{precision}f`.
pub fn format_fixed(value: f64, width: usize, precision: usize) -> String {
    if !value.is_finite() {
        return format!("{:>width$}", non_finite(value, false), width = width);
    }
    format!("{:>width$.precision$}", value, width = width, precision = precision)
}

/// Format `value` like C's `%{width}.{precision}E`.
///
/// The exponent always carries a sign and at least two digits, so `1.5`
/// becomes `1.5000000E+00` rather than Rust's `1.5000000E0`.
pub fn format_scientific(value: f64, width: usize, precision: usize) -> String {
    if !value.is_finite() {
        return format!("{:>width$}", non_finite(value, true), width = width);
    }

    let raw = format!("{:.precision$E}", value, precision = precision);
    let body = match raw.split_once('E') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}E{}{:0>2}", mantissa, sign, digits)
        }
        None => raw,
    };

    format!("{:>width$}", body, width = width)
}

/// Format one `time amplitude` output line, without the newline.
pub fn format_sample(time: f64, amplitude: f64) -> String {
    let mut line = format_fixed(time, TIME_WIDTH, TIME_PRECISION);
    line.push_str(&format_scientific(amplitude, AMPLITUDE_WIDTH, AMPLITUDE_PRECISION));
    line
}

fn non_finite(value: f64, upper: bool) -> &'static str {
    match (value.is_nan(), value.is_sign_negative(), upper) {
        (true, _, false) => "nan",
        (true, _, true) => "NAN",
        (false, false, false) => "inf",
        (false, true, false) => "-inf",
        (false, false, true) => "INF",
        (false, true, true) => "-INF",
    }
}
