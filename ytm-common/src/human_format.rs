//! Human-readable number and label formatting
//!
//! Console tables and the insights report group thousands with commas
//! (`1,234,567`) and shorten long titles with a trailing `...`.

/// Format an integer with comma thousands separators
///
/// # Examples
///
/// ```
/// use ytm_common::human_format::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Format a float rounded to `decimals` places, with comma thousands separators
///
/// Non-finite values are rendered as `nan`, `inf` or `-inf`.
///
/// # Examples
///
/// ```
/// use ytm_common::human_format::format_grouped;
///
/// assert_eq!(format_grouped(1234567.891, 0), "1,234,568");
/// assert_eq!(format_grouped(-1234.5, 2), "-1,234.50");
/// ```
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::new();
    // Avoid "-0" after rounding
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Shorten `text` to `max_chars` characters, appending `...` when cut
///
/// Counts Unicode scalar values, not bytes, so multi-byte titles are never
/// split mid-character.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut short: String = text.chars().take(max_chars).collect();
        short.push_str("...");
        short
    } else {
        text.to_string()
    }
}

/// Pad `label` with dots up to `width` characters (dotted leader)
pub fn dotted(label: &str, width: usize) -> String {
    let len = label.chars().count();
    if len >= width {
        label.to_string()
    } else {
        format!("{}{}", label, ".".repeat(width - len))
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
