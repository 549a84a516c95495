//! Download-speed proxy derived from seeder counts.

/// Multiplier applied to the log-compressed seeder count.
pub const SPEED_SCALE: f64 = 200.0;

/// Speed proxy for a seeder count: `ln(1 + seeders) * 200`.
///
/// Absent counts are treated as zero seeders. Log compression gives each
/// additional order of magnitude of seeders the same credit.
pub fn speed_proxy(seeders: Option<u32>) -> f64 {
    f64::from(seeders.unwrap_or(0)).ln_1p() * SPEED_SCALE
}
