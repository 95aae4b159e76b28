//! Display helpers shared by the view model.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Descriptions longer than this are cut for table display.
pub const DESCRIPTION_LIMIT: usize = 50;

/// Base-1024 human readable size with at most two decimals, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{scaled:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// Returns the description cut at [`DESCRIPTION_LIMIT`] characters with `...` appended.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_LIMIT {
        let head: String = text.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// `March 15, 2024`
pub fn format_deadline(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `Mar 15, 2024, 02:30 PM`. Unparseable timestamps are shown as received.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%b %-d, %Y, %I:%M %p").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
}

/// Colour band of the affinity badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffinityBand {
    High,
    Medium,
    Low,
    Poor,
}

impl AffinityBand {
    pub fn for_affinity(affinity: f64) -> Self {
        if affinity >= 80.0 {
            AffinityBand::High
        } else if affinity >= 60.0 {
            AffinityBand::Medium
        } else if affinity >= 40.0 {
            AffinityBand::Low
        } else {
            AffinityBand::Poor
        }
    }
}
