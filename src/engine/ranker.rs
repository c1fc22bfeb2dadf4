// SociaClip Ranker
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::engine::candidate::ScoredCandidate;
use std::cmp::Ordering;

/// Order by score descending; equal scores keep discovery order.
///
/// The tie-break uses `discovery_index`, so the output is the same whatever
/// order the input arrives in.
pub fn rank(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by(compare);
    scored
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.discovery_index.cmp(&b.discovery_index))
}
