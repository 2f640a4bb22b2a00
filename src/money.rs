//! Price arithmetic and display helpers

/// `value * factor / 1000`, truncated.
///
/// Multipliers such as 1.15 are written as 1150 so that presets and
/// concessions stay exact where a float product would land a hair below the
/// integer.
pub fn per_mille(value: u64, factor: u64) -> u64 {
    (u128::from(value) * u128::from(factor) / 1_000).min(u128::from(u64::MAX)) as u64
}

/// `a - b` as a signed amount, saturating at the `i64` bounds
pub fn signed_diff(a: u64, b: u64) -> i64 {
    let diff = i128::from(a) - i128::from(b);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Format `amount` with thousands separators after `currency`
pub fn money(amount: u64, currency: &str) -> String {
    format!("{}{}", currency, group_thousands(&amount.to_string()))
}

/// Signed variant of [`money`]
pub fn money_signed(amount: i64, currency: &str) -> String {
    let digits = group_thousands(&amount.unsigned_abs().to_string());
    if amount < 0 {
        format!("-{}{}", currency, digits)
    } else {
        format!("{}{}", currency, digits)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
