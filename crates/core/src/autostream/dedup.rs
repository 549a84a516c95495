//! Deduplication of candidate streams by identity.

use std::collections::HashSet;

use crate::stream::{CandidateIdentity, StreamCandidate};

/// A candidate paired with the identity it was deduplicated under.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifiedCandidate {
    pub identity: CandidateIdentity,
    pub candidate: StreamCandidate,
}

/// Remove duplicate candidates, keeping the first occurrence of each identity.
///
/// Identity precedence is info hash, then url, then the grouping hints.
/// Candidates with none of these are never merged.
pub fn deduplicate(candidates: &[StreamCandidate]) -> Vec<StreamCandidate> {
    deduplicate_identified(candidates)
        .into_iter()
        .map(|c| c.candidate)
        .collect()
}

/// Like [`deduplicate`], keeping the computed identity with each survivor.
pub fn deduplicate_identified(candidates: &[StreamCandidate]) -> Vec<IdentifiedCandidate> {
    let mut seen: HashSet<CandidateIdentity> = HashSet::with_capacity(candidates.len());
    let mut out = Vec::with_capacity(candidates.len());

    for (position, candidate) in candidates.iter().enumerate() {
        let identity = candidate.identity(position);
        if !seen.insert(identity.clone()) {
            continue;
        }
        out.push(IdentifiedCandidate {
            identity,
            candidate: candidate.clone(),
        });
    }

    out
}
