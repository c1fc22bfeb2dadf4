// SociaClip Engine Module
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// The scoring and selection core: score -> dedup -> rank -> select, plus the
// slot planner, template formatter and random source it leans on. Pure and
// synchronous; no I/O.

pub mod candidate;
pub mod dedup;
pub mod random;
pub mod ranker;
pub mod scorer;
pub mod selector;
pub mod slots;
pub mod template;

pub use candidate::{Candidate, Identified, Niche, Platform, RuleContribution, ScoredCandidate};
pub use dedup::dedup;
pub use random::{choose, FirstChoice, RandomSource, SeededRandom, ThreadRandom};
pub use ranker::rank;
pub use scorer::{KeywordGroup, Scorer, ScoringTables};
pub use selector::{select, Assignment, DiversityKey, SelectionRequest, SelectionResult};
pub use slots::{SchedulingTables, Slot, SlotCatalog, SlotPlanner, TimeOfDay};
pub use template::{truncate, FormatError, TemplateBook};

/// Whole points of a 0-100 score; fractions are dropped, not rounded
pub fn truncate_score(raw: f64) -> u8 {
    // 1e-9 absorbs float noise such as 67.99999999 for an exact 68
    (raw + 1e-9).floor().clamp(0.0, 100.0) as u8
}

/// Ranked survivors of one batch, plus how many were left after dedup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Qualified {
    pub ranked: Vec<ScoredCandidate>,
    pub unique: usize,
}

/// Score every candidate, drop duplicates, apply the score floor and rank.
pub fn score_and_rank(scorer: &Scorer, candidates: Vec<Candidate>, min_score: u8) -> Qualified {
    let scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| scorer.evaluate(c, i))
        .collect();
    let unique = dedup(scored);
    let unique_count = unique.len();
    let kept: Vec<ScoredCandidate> = unique.into_iter().filter(|s| s.score >= min_score).collect();
    Qualified {
        ranked: rank(kept),
        unique: unique_count,
    }
}
