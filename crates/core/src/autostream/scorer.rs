//! Composite ranking of deduplicated candidates.
//!
//! `score = tier base + speed proxy + preference bonus`. Tier bases are
//! 200 apart, so a one-tier difference outweighs most seeder advantages
//! unless the selection policy explicitly clears a speed threshold.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::dedup::IdentifiedCandidate;
use super::quality::QualityTier;
use super::speed::speed_proxy;
use crate::stream::{CandidateIdentity, StreamCandidate};

/// Bonus for web-delivery sources (WEB-DL, WEBRip).
pub const WEB_SOURCE_BONUS: f64 = 30.0;
/// Bonus for disc-sourced releases (Remux, BluRay, BDRip, BRRip).
pub const DISC_SOURCE_BONUS: f64 = 40.0;
/// Bonus for efficient codecs (HEVC, x265).
pub const EFFICIENT_CODEC_BONUS: f64 = 10.0;
/// Bonus for a debrid provider tag in the label.
pub const DEBRID_TAG_BONUS: f64 = 20.0;

static PREFERENCE_PATTERNS: Lazy<Vec<(f64, Regex)>> = Lazy::new(|| {
    [
        (WEB_SOURCE_BONUS, r"(?i)web[-\s]?(dl|rip)\b"),
        (DISC_SOURCE_BONUS, r"(?i)\b(remux|blu[-\s]?ray|b[dr]rip)\b"),
        (EFFICIENT_CODEC_BONUS, r"(?i)\b(hevc|x265)\b"),
        (
            DEBRID_TAG_BONUS,
            r"(?i)\b(real[-\s]?debrid|premiumize|all[-\s]?debrid|rd|ad|pm)\b",
        ),
    ]
    .into_iter()
    .map(|(bonus, pattern)| (bonus, Regex::new(pattern).unwrap()))
    .collect()
});

/// A candidate annotated with its derived attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub identity: CandidateIdentity,
    pub candidate: StreamCandidate,
    pub tier: QualityTier,
    pub speed: f64,
    pub bonus: f64,
    pub score: f64,
}

impl ScoredCandidate {
    /// Derive tier, speed and score for one candidate.
    pub fn new(identity: CandidateIdentity, candidate: StreamCandidate) -> Self {
        let label = candidate.label();
        let tier = QualityTier::classify(&label);
        let speed = speed_proxy(candidate.seeders());
        let bonus = preference_bonus(&label);
        Self {
            identity,
            tier,
            speed,
            bonus,
            score: tier.base_score() + speed + bonus,
            candidate,
        }
    }
}

/// Sum of the independent heuristic credits matched in `label`.
pub fn preference_bonus(label: &str) -> f64 {
    PREFERENCE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(label))
        .map(|(bonus, _)| bonus)
        .sum()
}

/// Score candidates and sort them by score, highest first.
///
/// The sort is stable: equal scores keep their input order.
pub fn score_candidates(candidates: Vec<IdentifiedCandidate>) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|c| ScoredCandidate::new(c.identity, c.candidate))
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}
