//! Sort modes selectable through the `sort` user option.

use std::cmp::Reverse;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::autostream::{apply_autostream, QualityTier, SelectionConfig, SelectionDefaults};
use crate::metrics;
use crate::options::UserOptions;
use crate::stream::StreamCandidate;

/// How a candidate list is ordered before being returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Tier descending, then seeders descending.
    #[default]
    Quality,
    /// Tier descending, then size descending.
    QualitySize,
    Seeders,
    Size,
    /// Curate down to one or two picks.
    Autostream,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Quality,
        SortMode::QualitySize,
        SortMode::Seeders,
        SortMode::Size,
        SortMode::Autostream,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Quality => "quality",
            SortMode::QualitySize => "qualitysize",
            SortMode::Seeders => "seeders",
            SortMode::Size => "size",
            SortMode::Autostream => "autostream",
        }
    }

    /// Read the mode from the `sort` option. Unknown values use the default.
    pub fn from_options(options: &UserOptions) -> SortMode {
        options
            .get("sort")
            .map(|v| v.trim().to_lowercase())
            .and_then(|v| SortMode::ALL.into_iter().find(|m| m.as_str() == v))
            .unwrap_or_default()
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order `streams` according to the `sort` option.
///
/// Autostream ignores `limit`; it already returns at most two candidates.
/// The other modes are stable sorts truncated to `limit` when given.
pub fn sort_streams(
    streams: &[StreamCandidate],
    options: &UserOptions,
    defaults: &SelectionDefaults,
) -> Vec<StreamCandidate> {
    let mode = SortMode::from_options(options);

    let sorted = match mode {
        SortMode::Autostream => {
            let config = SelectionConfig::from_options(options, defaults);
            apply_autostream(streams, &config)
        }
        _ => {
            let mut sorted = streams.to_vec();
            sort_by_mode(&mut sorted, mode);
            if let Some(limit) = options.positive_int("limit") {
                sorted.truncate(limit);
            }
            sorted
        }
    };

    let outcome = match (mode, sorted.len()) {
        (_, 0) => "empty",
        (SortMode::Autostream, 1) => "single",
        (SortMode::Autostream, _) => "with_fallback",
        _ => "sorted",
    };
    metrics::CURATIONS
        .with_label_values(&[mode.as_str(), outcome])
        .inc();

    sorted
}

fn sort_by_mode(streams: &mut [StreamCandidate], mode: SortMode) {
    let tier = |s: &StreamCandidate| QualityTier::classify(&s.label());
    let seeders = |s: &StreamCandidate| s.seeders().unwrap_or(0);
    let size = |s: &StreamCandidate| s.size_bytes().unwrap_or(0);

    match mode {
        SortMode::Quality => streams.sort_by_cached_key(|s| Reverse((tier(s), seeders(s)))),
        SortMode::QualitySize => streams.sort_by_cached_key(|s| Reverse((tier(s), size(s)))),
        SortMode::Seeders => streams.sort_by_key(|s| Reverse(seeders(s))),
        SortMode::Size => streams.sort_by_key(|s| Reverse(size(s))),
        SortMode::Autostream => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(title: &str, seeders: u32, size: &str) -> StreamCandidate {
        StreamCandidate::new("Torrentio", format!("{}\n👤 {} 💾 {}", title, seeders, size))
    }

    fn first_lines(streams: &[StreamCandidate]) -> Vec<&str> {
        streams
            .iter()
            .map(|s| s.title.lines().next().unwrap_or_default())
            .collect()
    }

    fn sample() -> Vec<StreamCandidate> {
        vec![
            stream("A.720p", 400, "1 GB").with_info_hash("a"),
            stream("B.2160p", 100, "20 GB").with_info_hash("b"),
            stream("C.1080p", 50, "4 GB").with_info_hash("c"),
            stream("D.1080p", 80, "2 GB").with_info_hash("d"),
        ]
    }

    fn sorted_with(config: &str) -> Vec<StreamCandidate> {
        sort_streams(
            &sample(),
            &UserOptions::parse(config),
            &SelectionDefaults::default(),
        )
    }

    #[test]
    fn test_mode_parsing() {
        let mode = |config: &str| SortMode::from_options(&UserOptions::parse(config));
        assert_eq!(mode(""), SortMode::Quality);
        assert_eq!(mode("sort=AutoStream"), SortMode::Autostream);
        assert_eq!(mode("sort=qualitysize"), SortMode::QualitySize);
        assert_eq!(mode("sort=bogus"), SortMode::Quality);
    }

    #[test]
    fn test_quality_then_seeders() {
        let sorted = sorted_with("");
        assert_eq!(first_lines(&sorted), vec!["B.2160p", "D.1080p", "C.1080p", "A.720p"]);
    }

    #[test]
    fn test_quality_then_size() {
        let sorted = sorted_with("sort=qualitysize");
        assert_eq!(first_lines(&sorted), vec!["B.2160p", "C.1080p", "D.1080p", "A.720p"]);
    }

    #[test]
    fn test_seeders_and_size() {
        assert_eq!(
            first_lines(&sorted_with("sort=seeders")),
            vec!["A.720p", "B.2160p", "D.1080p", "C.1080p"]
        );
        assert_eq!(
            first_lines(&sorted_with("sort=size")),
            vec!["B.2160p", "C.1080p", "D.1080p", "A.720p"]
        );
    }

    #[test]
    fn test_limit() {
        assert_eq!(sorted_with("limit=2").len(), 2);
        // Invalid limits are ignored
        assert_eq!(sorted_with("limit=0").len(), 4);
        assert_eq!(sorted_with("limit=abc").len(), 4);
    }

    #[test]
    fn test_autostream_mode_curates() {
        let sorted = sorted_with("sort=autostream|limit=1");
        // The 720p is not much faster than the 2160p; best 1080p appended
        assert_eq!(first_lines(&sorted), vec!["B.2160p", "D.1080p"]);
    }

    #[test]
    fn test_empty_input() {
        for mode in SortMode::ALL {
            let options = UserOptions::from_pairs([("sort", mode.as_str())]);
            assert!(sort_streams(&[], &options, &SelectionDefaults::default()).is_empty());
        }
    }
}
