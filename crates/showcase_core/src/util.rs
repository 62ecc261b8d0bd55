//! Number helpers shared by the counters and the CLI

/// Browser `Math.round`: halves round toward positive infinity
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Abbreviate large values: `1_500` → `1.5K`, `2_500_000` → `2.5M`
///
/// Values below one thousand are printed as-is.
pub fn format_number(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{}M", to_fixed_1(n / 1_000_000.0))
    } else if n >= 1_000.0 {
        format!("{}K", to_fixed_1(n / 1_000.0))
    } else if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// One decimal place, ties away from zero (matches `Number.toFixed(1)`)
fn to_fixed_1(x: f64) -> String {
    let tenths = round_half_up(x * 10.0) as i64;
    format!("{}.{}", tenths / 10, (tenths % 10).abs())
}

/// Extract the number shown in a piece of display text
///
/// Every character other than ASCII digits and `.` is dropped, then the
/// longest valid decimal prefix is parsed: `"85%"` → 85, `"<3分钟"` → 3,
/// `"1.2.3"` → 1.2. Returns `None` when no digits are left.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let filtered: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in filtered.char_indices() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                if seen_digit {
                    end = i + 1;
                }
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    filtered[..end].trim_end_matches('.').parse().ok()
}
