//! Testing utilities and mock implementations.
//!
//! This module provides a mock of the title resolution capability plus
//! candidate fixtures, allowing the curation pipeline to be tested without
//! network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use autostream_core::testing::{fixtures, MockTitleResolver};
//!
//! let resolver = MockTitleResolver::with_title("tt0111161", "The Shawshank Redemption").await;
//! resolver.set_delay(Duration::from_secs(10)).await;
//!
//! let streams = vec![fixtures::candidate("Movie.2160p.WEB-DL", "abc", 120)];
//! ```

mod mock_title_resolver;

pub use mock_title_resolver::{MockTitleResolver, RecordedLookup};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::stream::{BehaviorHints, StreamCandidate};

    /// A Torrentio-style candidate: release name on the first title line,
    /// seeders and size on the second.
    pub fn candidate(release: &str, info_hash: &str, seeders: u32) -> StreamCandidate {
        StreamCandidate::new(
            "Torrentio",
            format!("{}\n👤 {} 💾 2.5 GB ⚙️ ThePirateBay", release, seeders),
        )
        .with_info_hash(info_hash)
    }

    /// A debrid-resolved candidate identified by url only.
    pub fn debrid_candidate(release: &str, url: &str, seeders: u32) -> StreamCandidate {
        let mut candidate = StreamCandidate::new(
            "[RD+] Torrentio",
            format!("{}\n👤 {} 💾 4 GB", release, seeders),
        )
        .with_url(url);
        candidate.behavior_hints = Some(BehaviorHints {
            binge_group: Some(format!("torrentio|{}", release)),
            filename: Some(format!("{}.mkv", release)),
            ..Default::default()
        });
        candidate
    }

    /// One candidate per common tier, all with the same seeder count.
    pub fn tier_ladder(seeders: u32) -> Vec<StreamCandidate> {
        ["4320p", "2160p", "1440p", "1080p", "720p", "480p", "CAM"]
            .iter()
            .enumerate()
            .map(|(i, tier)| candidate(&format!("Movie.2024.{}.WEB-DL", tier), &format!("h{}", i), seeders))
            .collect()
    }
}
