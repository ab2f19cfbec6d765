//! Compact numeric formatting

/// Format a number compactly
///
/// Integral magnitudes below 1e6 print as plain integers. Large magnitudes
/// switch to two-decimal scientific notation, tiny nonzero magnitudes keep
/// four decimals, everything else gets two.
pub fn format_num(val: f64) -> String {
    if val.is_nan() {
        return "NaN".to_string();
    }
    if val.is_infinite() {
        return val.to_string();
    }
    if val.fract() == 0.0 && val.abs() < 1e6 {
        return format!("{}", val as i64);
    }
    if val.abs() >= 1e6 {
        return format_scientific(val);
    }
    if val.abs() < 0.01 && val != 0.0 {
        return format!("{:.4}", val);
    }
    format!("{:.2}", val)
}

/// Two-decimal scientific notation with a signed, zero-padded exponent
/// (`1.50e+06`), which `{:e}` does not produce
fn format_scientific(val: f64) -> String {
    let mut exp = val.abs().log10().floor() as i32;
    let mut mantissa = val / 10f64.powi(exp);
    // Rounding the mantissa to two decimals can carry into the next decade
    if (mantissa.abs() * 100.0).round() >= 1000.0 {
        mantissa /= 10.0;
        exp += 1;
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{:.2}e{}{:02}", mantissa, sign, exp.abs())
}
