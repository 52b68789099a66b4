//! Decimal rounding for reported totals.
//!
//! Totals are rounded on the shortest decimal representation of the float
//! (what `Display` prints), not on its binary expansion. A mean that prints
//! as `2.35` is treated as the decimal 2.35 and rounds to 2.4, even though
//! the nearest `f64` is slightly below it.

/// Round `value` to `scale` decimal places, ties to the even neighbour.
///
/// Non-finite values are returned unchanged. The sign is kept, so
/// `-2.25` rounds to `-2.2`.
#[must_use]
pub fn round_half_even(value: f64, scale: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // `Display` for f64 never switches to exponent notation.
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    if frac_part.len() <= scale {
        return value;
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..scale].bytes())
        .map(|b| b - b'0')
        .collect();
    let next = frac_part.as_bytes()[scale] - b'0';
    let beyond_tie = frac_part[scale + 1..].bytes().any(|b| b != b'0');
    let last_is_odd = digits.last().is_some_and(|d| d % 2 == 1);

    if next > 5 || (next == 5 && (beyond_tie || last_is_odd)) {
        increment(&mut digits);
    }

    let point = digits.len() - scale;
    let mut text = String::with_capacity(digits.len() + 1);
    for (i, d) in digits.iter().enumerate() {
        if i == point {
            text.push('.');
        }
        text.push(char::from(b'0' + d));
    }

    let magnitude = text.parse::<f64>().unwrap_or_else(|_| value.abs());
    if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Add one unit in the last place to a big-endian decimal digit string.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_go_to_even() {
        assert_eq!(round_half_even(2.25, 1), 2.2);
        assert_eq!(round_half_even(2.35, 1), 2.4);
        assert_eq!(round_half_even(2.45, 1), 2.4);
        assert_eq!(round_half_even(0.05, 1), 0.0);
        assert_eq!(round_half_even(0.15, 1), 0.2);
    }

    #[test]
    fn test_past_the_tie_rounds_away() {
        assert_eq!(round_half_even(2.251, 1), 2.3);
        assert_eq!(round_half_even(2.2499, 1), 2.2);
        assert_eq!(round_half_even(66.66666666666667, 1), 66.7);
        assert_eq!(round_half_even(33.333333333333336, 1), 33.3);
    }

    #[test]
    fn test_carry_into_integer_part() {
        assert_eq!(round_half_even(9.95, 1), 10.0);
        assert_eq!(round_half_even(99.96, 1), 100.0);
        assert_eq!(round_half_even(0.96, 1), 1.0);
    }

    #[test]
    fn test_short_values_unchanged() {
        assert_eq!(round_half_even(3.0, 1), 3.0);
        assert_eq!(round_half_even(42.5, 1), 42.5);
        assert_eq!(round_half_even(0.0, 1), 0.0);
    }

    #[test]
    fn test_scale_zero() {
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        assert_eq!(round_half_even(3.6, 0), 4.0);
    }

    #[test]
    fn test_negative_and_tiny() {
        assert_eq!(round_half_even(-2.25, 1), -2.2);
        assert_eq!(round_half_even(-2.35, 1), -2.4);
        assert_eq!(round_half_even(1e-7, 1), 0.0);
    }

    #[test]
    fn test_non_finite() {
        assert!(round_half_even(f64::NAN, 1).is_nan());
        assert_eq!(round_half_even(f64::INFINITY, 1), f64::INFINITY);
    }

    #[test]
    fn test_huge_value_has_no_fraction() {
        assert_eq!(round_half_even(1e20, 1), 1e20);
    }
}
