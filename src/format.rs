//! Fixed-precision decimal rendering shared by quantized keys and the report.

/// Render `value` with at most `precision` fractional digits.
///
/// Rounding works on the shortest decimal text that reads back as `value`, so a literal
/// such as `472258133803.6` keeps its digits even though the nearest `f64` lies slightly
/// below it. Ties round half-to-even; a tie that only exists in the shortest text is
/// settled by the exact binary value (`1.005` is really `1.00499...` and rounds down).
/// Trailing zeros and a dangling decimal point are stripped, and the output never uses
/// scientific notation.
///
/// ```
/// use rowgroup::format::format_decimal;
///
/// assert_eq!(format_decimal(2.5, 5), "2.5");
/// assert_eq!(format_decimal(1.000004, 5), "1");
/// assert_eq!(format_decimal(79855053897.0, 5), "79855053897");
/// assert_eq!(format_decimal(472258133803.6, 5), "472258133803.6");
/// ```
#[must_use]
pub fn format_decimal(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    let shortest = magnitude.to_string();
    let (whole, fraction) = shortest.split_once('.').unwrap_or((&shortest, ""));

    let mut text = match fraction.as_bytes().get(precision) {
        None => shortest.clone(),
        Some(&first) => {
            let rest = &fraction.as_bytes()[precision + 1..];
            if first == b'5' && rest.iter().all(|&b| b == b'0') {
                format!("{magnitude:.precision$}")
            } else {
                let mut digits: Vec<u8> = whole
                    .bytes()
                    .chain(fraction[..precision].bytes())
                    .collect();
                if first >= b'5' {
                    increment(&mut digits);
                }
                let split = digits.len() - precision;
                let mut rounded: String =
                    digits[..split].iter().map(|&b| char::from(b)).collect();
                if precision > 0 {
                    rounded.push('.');
                    rounded.extend(digits[split..].iter().map(|&b| char::from(b)));
                }
                rounded
            }
        }
    };

    if text.contains('.') {
        let kept = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(kept);
    }
    if value.is_sign_negative() && text != "0" {
        text.insert(0, '-');
    }
    text
}

/// Add one unit in the last place of an ASCII digit string.
fn increment(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

#[cfg(test)]
mod tests {
    use super::format_decimal;

    #[test]
    fn strips_trailing_zeros() {
        assert_eq!(format_decimal(1.5, 5), "1.5");
        assert_eq!(format_decimal(100.0, 5), "100");
        assert_eq!(format_decimal(0.0, 5), "0");
    }

    #[test]
    fn rounds_to_precision() {
        assert_eq!(format_decimal(0.123456, 5), "0.12346");
        assert_eq!(format_decimal(0.999999, 5), "1");
        assert_eq!(format_decimal(9.999996, 5), "10");
        assert_eq!(format_decimal(1.000004, 5), "1");
        assert_eq!(format_decimal(1.000006, 5), "1.00001");
    }

    #[test]
    fn zero_precision_drops_fraction() {
        assert_eq!(format_decimal(7.25, 0), "7");
        assert_eq!(format_decimal(7.75, 0), "8");
        assert_eq!(format_decimal(-0.2, 0), "0");
        assert_eq!(format_decimal(-1.5, 5), "-1.5");
    }

    #[test]
    fn large_integers_stay_positional() {
        assert_eq!(format_decimal(9_999_999_999_999.0, 5), "9999999999999");
        assert_eq!(format_decimal(1e15, 5), "1000000000000000");
        assert_eq!(format_decimal(0.0000001, 9), "0.0000001");
    }

    #[test]
    fn large_fractions_keep_their_written_digits() {
        assert_eq!(format_decimal(472258133803.6, 5), "472258133803.6");
        assert_eq!(format_decimal(7609839961096.07, 5), "7609839961096.07");
        assert_eq!(format_decimal(605133674493.417, 5), "605133674493.417");
        assert_eq!(format_decimal(7907011638445.633, 5), "7907011638445.633");
    }

    #[test]
    fn ties_round_half_even_on_the_binary_value() {
        // Exactly representable ties.
        assert_eq!(format_decimal(2.5, 0), "2");
        assert_eq!(format_decimal(3.5, 0), "4");
        assert_eq!(format_decimal(0.125, 2), "0.12");
        // Apparent ties whose binary value lies just below the midpoint.
        assert_eq!(format_decimal(1.005, 2), "1");
        assert_eq!(format_decimal(1.015, 2), "1.01");
    }
}
