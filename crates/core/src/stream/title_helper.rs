//! Helpers for reading metadata out of stream title lines.
//!
//! Upstream titles carry a details line such as
//! `👤 152 💾 2.1 GB ⚙️ ThePirateBay`.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static SEEDERS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"👤\s*(\d+)").unwrap());

static SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)💾\s*(\d+(?:\.\d+)?)\s*([KMGT]?B)\b").unwrap());

/// Extract the seeder count following the `👤` marker.
///
/// Returns `None` when the marker is missing. Counts beyond `u32::MAX`
/// saturate so a bigger swarm never reads as a smaller one.
pub fn extract_seeders(title: &str) -> Option<u32> {
    let digits = SEEDERS_RE.captures(title)?.get(1)?.as_str();
    // Digits only, so the parse can fail solely on overflow
    Some(digits.parse().unwrap_or(u32::MAX))
}

/// Extract the size in bytes following the `💾` marker.
pub fn extract_size(title: &str) -> Option<u64> {
    let caps = SIZE_RE.captures(title)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let multiplier: f64 = match caps.get(2)?.as_str().to_uppercase().as_str() {
        "B" => 1.0,
        "KB" => 1024.0,
        "MB" => 1024.0 * 1024.0,
        "GB" => 1024.0 * 1024.0 * 1024.0,
        "TB" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => return None,
    };
    Some((value * multiplier).round() as u64)
}
