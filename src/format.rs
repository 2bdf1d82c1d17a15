//! Number formatting shared by the renderers.

/// Round half toward positive infinity, the way browsers round numbers for display.
pub fn round_half_up(value: f64) -> f64 {
    let r = value.round();
    // `round` breaks ties away from zero; negative ties go up instead.
    if r - value == -0.5 {
        r + 1.0
    } else {
        r
    }
}

/// Integer display of a rounded value, never printing `-0`.
pub fn rounded(value: f64) -> String {
    let r = round_half_up(value);
    if r == 0.0 {
        "0".to_string()
    } else {
        format!("{}", r)
    }
}

pub fn percent(value: f64) -> String {
    format!("{}%", value)
}

pub fn kg(value: f64) -> String {
    format!("{} kg", value)
}

/// Insert thousands separators into the integer part of `value`.
pub fn group_thousands(value: f64) -> String {
    let text = format!("{}", value);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Leading-prefix number parsing: `"12.5kg"` is 12.5, `"abc"` is `None`.
pub fn parse_leading_number(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    while end < bytes.len() {
        match bytes[end] {
            b'+' | b'-' if end == 0 => {}
            b'+' | b'-' if seen_exp && matches!(bytes[end - 1], b'e' | b'E') => {}
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
        end += 1;
    }

    // Back off a dangling exponent marker or sign, e.g. "3e" or "3e+".
    let mut candidate = &trimmed[..end];
    while let Some(last) = candidate.chars().last() {
        if matches!(last, 'e' | 'E' | '+' | '-') {
            candidate = &candidate[..candidate.len() - 1];
        } else {
            break;
        }
    }

    if !seen_digit {
        return None;
    }
    candidate.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(rounded(-0.2), "0");
        assert_eq!(rounded(47.6), "48");
    }

    #[test]
    fn test_round_half_up_near_ties() {
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-1.5), -1.0);
        assert_eq!(round_half_up(4503599627370497.0), 4503599627370497.0);
        assert_eq!(rounded(-0.5), "0");
    }

    #[test]
    fn test_plain_number_display() {
        assert_eq!(percent(62.4), "62.4%");
        assert_eq!(percent(30.0), "30%");
        assert_eq!(kg(12.35), "12.35 kg");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1543.0), "1,543");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(-98765.25), "-98,765.25");
        assert_eq!(group_thousands(1234.5678), "1,234.5678");
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("0.5"), Some(0.5));
        assert_eq!(parse_leading_number("  8000"), Some(8000.0));
        assert_eq!(parse_leading_number("12.5kg"), Some(12.5));
        assert_eq!(parse_leading_number("3e2"), Some(300.0));
        assert_eq!(parse_leading_number("3e"), Some(3.0));
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("kg"), None);
        assert_eq!(parse_leading_number("-"), None);
    }
}
