//! Rupee formatting in the en-IN locale
//!
//! Indian grouping puts a separator after the last three integer digits and
//! then after every two: `12,34,56,789`.

/// Currency glyph prefixed to every amount
pub const RUPEE: &str = "₹";

const MAX_FRACTION_DIGITS: usize = 3;

/// Format a price the way the result panel shows it, e.g. `₹ 4,25,000`
pub fn format_inr(amount: f64) -> String {
    format!("{} {}", RUPEE, group_en_in(amount))
}

/// Format a number with en-IN digit grouping and at most three decimals.
///
/// Ties round away from zero and a negative value keeps its sign even when
/// it rounds to zero (`-0`).
pub fn group_en_in(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let (int_part, frac_part) = round_fraction(&value.abs().to_string(), MAX_FRACTION_DIGITS);
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_integer_digits(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Round a plain decimal string to `places` fraction digits, half away from zero
fn round_fraction(decimal: &str, places: usize) -> (String, String) {
    let (int_part, frac_part) = decimal.split_once('.').unwrap_or((decimal, ""));
    if frac_part.len() <= places {
        return (int_part.to_string(), frac_part.to_string());
    }

    let round_up = frac_part.as_bytes()[places] >= b'5';
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .collect();

    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - places;
    let frac = digits.split_off(split);
    (
        String::from_utf8_lossy(&digits).into_owned(),
        String::from_utf8_lossy(&frac).into_owned(),
    )
}

fn group_integer_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last3) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(last3);
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lakh_grouping() {
        assert_eq!(format_inr(425000.0), "₹ 4,25,000");
        assert_eq!(format_inr(1234567.0), "₹ 12,34,567");
        assert_eq!(format_inr(123456789.0), "₹ 12,34,56,789");
    }

    #[test]
    fn test_small_values_ungrouped() {
        assert_eq!(group_en_in(0.0), "0");
        assert_eq!(group_en_in(999.0), "999");
        assert_eq!(group_en_in(1000.0), "1,000");
        assert_eq!(group_en_in(99999.0), "99,999");
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(group_en_in(425000.5), "4,25,000.5");
        assert_eq!(group_en_in(1234.56789), "1,234.568");
        assert_eq!(group_en_in(12.100), "12.1");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(group_en_in(2.0625), "2.063");
        assert_eq!(group_en_in(0.0625), "0.063");
        assert_eq!(group_en_in(-2.0625), "-2.063");
        assert_eq!(format_inr(99999.9995), "₹ 1,00,000");
        assert_eq!(group_en_in(0.0004), "0");
    }

    #[test]
    fn test_negative_and_non_finite() {
        assert_eq!(group_en_in(-150000.0), "-1,50,000");
        assert_eq!(group_en_in(-0.0001), "-0");
        assert_eq!(group_en_in(f64::NAN), "NaN");
        assert_eq!(format_inr(f64::INFINITY), "₹ ∞");
    }
}
