//! Field formatting shared by the user and admin templates.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Japan Standard Time has no daylight saving, so a fixed +09:00 offset is exact.
const JST_OFFSET_SECONDS: i32 = 9 * 3600;

/// Yen amount rounded to whole yen with comma thousands separators, e.g. `1,234,567`.
pub fn format_yen(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let rounded = amount.round();
    let digits = group_thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Percentage with one decimal place, without the `%` sign.
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}")
    } else {
        "0.0".to_string()
    }
}

pub fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (index, digit) in raw.chars().enumerate() {
        if index > 0 && (raw.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Submission time in Asia/Tokyo, `YYYY/MM/DD HH:MM:SS`.
pub fn format_jst(instant: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(JST_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix());
    instant
        .with_timezone(&offset)
        .format("%Y/%m/%d %H:%M:%S")
        .to_string()
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
