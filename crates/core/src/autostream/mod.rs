//! Quality/speed curation of candidate streams.
//!
//! The pipeline is pure and synchronous:
//!
//! ```text
//! raw candidates -> deduplicate -> classify + speed proxy -> score (stable sort)
//!                -> selection policy -> 1 or 2 curated candidates
//! ```
//!
//! Nothing here fails: malformed labels classify as [`QualityTier::Other`],
//! missing seeder counts count as zero, and an empty input yields an empty
//! output.

mod dedup;
mod options;
mod policy;
mod quality;
mod scorer;
mod speed;

pub use dedup::{deduplicate, deduplicate_identified, IdentifiedCandidate};
pub use options::{DowngradeRule, SelectionConfig, SelectionDefaults, DEBRID_RATIO_TIGHTENING};
pub use policy::{is_much_faster, select, DowngradeDecision, Selection};
pub use quality::{resolution_token, QualityTier};
pub use scorer::{
    preference_bonus, score_candidates, ScoredCandidate, DEBRID_TAG_BONUS, DISC_SOURCE_BONUS,
    EFFICIENT_CODEC_BONUS, WEB_SOURCE_BONUS,
};
pub use speed::{speed_proxy, SPEED_SCALE};

use tracing::debug;

use crate::metrics;
use crate::stream::StreamCandidate;

/// Rank `streams` and run the selection policy.
///
/// Returns `None` when nothing survives deduplication.
pub fn curate(streams: &[StreamCandidate], config: &SelectionConfig) -> Option<Selection> {
    let unique = deduplicate_identified(streams);
    metrics::CANDIDATES_DEDUPLICATED.observe(unique.len() as f64);

    let ranked = score_candidates(unique);
    let selection = select(&ranked, config)?;

    metrics::DOWNGRADE_DECISIONS
        .with_label_values(&[selection.decision.as_str()])
        .inc();
    debug!(
        input = streams.len(),
        ranked = ranked.len(),
        decision = selection.decision.as_str(),
        primary_tier = %selection.primary.tier,
        fallback = selection.fallback.is_some(),
        "Curated streams"
    );

    Some(selection)
}

/// Curate `streams` down to the primary pick and optional 1080p fallback.
pub fn apply_autostream(streams: &[StreamCandidate], config: &SelectionConfig) -> Vec<StreamCandidate> {
    curate(streams, config)
        .map(Selection::into_candidates)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, title: &str, hash: &str) -> StreamCandidate {
        StreamCandidate::new(name, title).with_info_hash(hash)
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert!(apply_autostream(&[], &SelectionConfig::default()).is_empty());
        assert!(curate(&[], &SelectionConfig::default()).is_none());
    }

    #[test]
    fn test_duplicates_never_reach_output() {
        let streams = vec![
            candidate("Torrentio\n4k", "Movie.2160p\n👤 100", "AAA"),
            candidate("Torrentio\n4k", "Movie.2160p.mirror\n👤 900", "aaa"),
            candidate("Torrentio\n1080p", "Movie.1080p\n👤 50", "bbb"),
        ];
        let out = apply_autostream(&streams, &SelectionConfig::default());
        assert_eq!(out.len(), 2);
        // The first occurrence wins, not the better-seeded duplicate
        assert_eq!(out[0].title, "Movie.2160p\n👤 100");
        assert_eq!(out[1].info_hash.as_deref(), Some("bbb"));
    }

    #[test]
    fn test_records_are_passed_through_unchanged() {
        let mut input = candidate("Torrentio\n1080p", "Movie.1080p.WEB-DL\n👤 12 💾 2.1 GB", "ccc");
        input.file_idx = Some(3);
        input
            .extra
            .insert("sources".to_string(), serde_json::json!(["tracker:udp://x"]));

        let out = apply_autostream(std::slice::from_ref(&input), &SelectionConfig::default());
        assert_eq!(out, vec![input]);
    }

    #[test]
    fn test_name_field_contributes_to_tier() {
        // Resolution only in the name line
        let streams = vec![
            candidate("Torrentio\n4k", "Some.Movie\n👤 3", "uhd"),
            candidate("Torrentio\n720p", "Some.Movie\n👤 3", "hd"),
        ];
        let selection = curate(&streams, &SelectionConfig::default()).unwrap();
        assert_eq!(selection.primary.tier, QualityTier::Uhd2160);
    }
}
