//! Small helpers with no better home.

use crate::consts;

/// Last characters of a masked account number, as stored in token details.
pub fn pan_suffix(masked_account_number: &str) -> String {
    let chars: Vec<char> = masked_account_number.chars().collect();
    let start = chars.len().saturating_sub(consts::PAN_SUFFIX_LEN);
    chars[start..].iter().collect()
}

/// Format a minor-unit amount as a decimal string for status-history comments.
pub fn format_minor_units(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let amount = amount.unsigned_abs();
    format!("{sign}{}.{:02}", amount / 100, amount % 100)
}
