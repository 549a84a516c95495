//! Selection policy: keep the top pick or substitute a much faster one.

use serde::Serialize;
use tracing::debug;

use super::options::{DowngradeRule, SelectionConfig};
use super::quality::QualityTier;
use super::scorer::ScoredCandidate;
use crate::stream::StreamCandidate;

/// Outcome of the downgrade evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DowngradeDecision {
    /// Downgrades were disabled by configuration.
    Disabled,
    /// No lower-tier candidate to compare against.
    NoAlternative,
    /// The alternative was not much faster.
    Rejected,
    /// Passed the normal test but failed the tightened one.
    RejectedByTightening,
    /// The alternative replaced the best candidate.
    Accepted,
}

impl DowngradeDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            DowngradeDecision::Disabled => "disabled",
            DowngradeDecision::NoAlternative => "no_alternative",
            DowngradeDecision::Rejected => "rejected",
            DowngradeDecision::RejectedByTightening => "rejected_by_tightening",
            DowngradeDecision::Accepted => "accepted",
        }
    }
}

/// Result of running the policy over a ranked list.
#[derive(Debug, Clone)]
pub struct Selection {
    pub primary: ScoredCandidate,
    pub fallback: Option<ScoredCandidate>,
    pub decision: DowngradeDecision,
}

impl Selection {
    /// Curated candidates, primary first.
    pub fn into_candidates(self) -> Vec<StreamCandidate> {
        std::iter::once(self.primary)
            .chain(self.fallback)
            .map(|s| s.candidate)
            .collect()
    }
}

/// Whether `alt_speed` beats `best_speed` by the configured margins.
///
/// The ratio is infinite when the best candidate has no speed but the
/// alternative does, and 1.0 when both are zero.
pub fn is_much_faster(
    alt_speed: f64,
    best_speed: f64,
    ratio_need: f64,
    delta_need: f64,
    rule: DowngradeRule,
) -> bool {
    let ratio = if best_speed > 0.0 {
        alt_speed / best_speed
    } else if alt_speed > 0.0 {
        f64::INFINITY
    } else {
        1.0
    };
    let delta = alt_speed - best_speed;

    let ratio_ok = ratio >= ratio_need;
    let delta_ok = delta >= delta_need;
    match rule {
        DowngradeRule::RatioAndDelta => ratio_ok && delta_ok,
        DowngradeRule::RatioOrDelta => ratio_ok || delta_ok,
    }
}

fn passes(alt: &ScoredCandidate, best: &ScoredCandidate, config: &SelectionConfig) -> bool {
    is_much_faster(
        alt.speed,
        best.speed,
        config.ratio_need,
        config.delta_need,
        config.rule,
    )
}

/// Run the selection policy over a score-sorted list.
///
/// Returns `None` only for an empty list.
pub fn select(ranked: &[ScoredCandidate], config: &SelectionConfig) -> Option<Selection> {
    let best = ranked.first()?;

    let (picked, decision) = if !config.prefer_lower_if_much_faster {
        (best, DowngradeDecision::Disabled)
    } else {
        pick_with_downgrade(best, ranked, config)
    };

    let fallback = if config.two_outputs && picked.tier != QualityTier::Fhd1080 {
        ranked
            .iter()
            .find(|c| c.tier == QualityTier::Fhd1080 && c.identity != picked.identity)
            .cloned()
    } else {
        None
    };

    Some(Selection {
        primary: picked.clone(),
        fallback,
        decision,
    })
}

fn pick_with_downgrade<'a>(
    best: &'a ScoredCandidate,
    ranked: &'a [ScoredCandidate],
    config: &SelectionConfig,
) -> (&'a ScoredCandidate, DowngradeDecision) {
    // Only the first lower-tier candidate in rank order is considered.
    let Some(alt) = ranked[1..].iter().find(|c| c.tier < best.tier) else {
        return (best, DowngradeDecision::NoAlternative);
    };

    if !passes(alt, best, config) {
        debug!(
            best_tier = %best.tier,
            alt_tier = %alt.tier,
            best_speed = best.speed,
            alt_speed = alt.speed,
            "Alternative is not much faster, keeping best"
        );
        return (best, DowngradeDecision::Rejected);
    }

    if config.tighten_when_debrid && !passes(alt, best, &config.tightened()) {
        debug!(
            best_tier = %best.tier,
            alt_tier = %alt.tier,
            "Alternative failed tightened test, keeping best"
        );
        return (best, DowngradeDecision::RejectedByTightening);
    }

    debug!(
        best_tier = %best.tier,
        alt_tier = %alt.tier,
        best_speed = best.speed,
        alt_speed = alt.speed,
        "Downgrading to much faster alternative"
    );
    (alt, DowngradeDecision::Accepted)
}
