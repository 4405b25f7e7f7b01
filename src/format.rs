use crate::models::NumberFormat;

pub fn format_value(
    value: f64,
    format: &NumberFormat,
    prefix: Option<&str>,
    suffix: Option<&str>,
) -> String {
    let fixed = format!("{:.*}", format.decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + 8);
    if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
        out.push_str(prefix);
    }
    // "-0" after rounding is just zero
    if value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, &format.separator));
    if let Some(frac_part) = frac_part {
        out.push_str(&format.decimal);
        out.push_str(frac_part);
    }
    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        out.push_str(suffix);
    }
    out
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}
