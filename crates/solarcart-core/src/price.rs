//! Brazilian Real formatting for display.

/// Format a value as Brazilian Real, e.g. `1234.5` → `R$ 1.234,50`.
///
/// Rounds half away from zero to whole centavos. Non-finite input renders
/// as zero.
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return "R$ 0,00".to_string();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let negative = value < 0.0 && cents > 0;

    let reais = group_thousands(cents / 100);
    let centavos = cents % 100;

    if negative {
        format!("-R$ {},{:02}", reais, centavos)
    } else {
        format!("R$ {},{:02}", reais, centavos)
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_simple_values() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(500.0), "R$ 500,00");
        assert_eq!(format_brl(9.9), "R$ 9,90");
        assert_eq!(format_brl(0.05), "R$ 0,05");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(1000.0), "R$ 1.000,00");
        assert_eq!(format_brl(1_234_567.891), "R$ 1.234.567,89");
    }

    #[test]
    fn test_format_rounds_to_cents() {
        assert_eq!(format_brl(2.499), "R$ 2,50");
        assert_eq!(format_brl(0.004), "R$ 0,00");
    }

    #[test]
    fn test_format_negative_and_non_finite() {
        assert_eq!(format_brl(-5.0), "-R$ 5,00");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
        assert_eq!(format_brl(f64::NAN), "R$ 0,00");
        assert_eq!(format_brl(f64::INFINITY), "R$ 0,00");
    }
}
