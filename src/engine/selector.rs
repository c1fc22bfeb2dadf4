// SociaClip Selector - Greedy Constrained Slot Assignment
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Walks ranked candidates and gives each the best still-free slot that keeps
// the minimum gap to every other post on the same platform. No backtracking:
// a candidate with no free slot is dropped, not retried.

use crate::engine::candidate::{Candidate, ScoredCandidate};
use crate::engine::slots::{Slot, SlotCatalog};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use url::Url;

/// Grouping used by the diversity pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiversityKey {
    Niche,
    Host,
}

impl DiversityKey {
    /// `None` when the candidate has no usable key (e.g. an unparseable URL)
    pub fn key_for(&self, candidate: &Candidate) -> Option<String> {
        match self {
            DiversityKey::Niche => Some(candidate.category.as_str().to_string()),
            DiversityKey::Host => host_of(&candidate.identifier),
        }
    }
}

fn host_of(identifier: &str) -> Option<String> {
    let url = Url::parse(identifier.trim()).ok()?;
    let host = url.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub quota: usize,
    pub diversity: Option<DiversityKey>,
    pub min_gap_minutes: u32,
    /// Max assignments per platform, unlimited when `None`
    #[serde(default)]
    pub per_platform_limit: Option<usize>,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            quota: 5,
            diversity: None,
            min_gap_minutes: 30,
            per_platform_limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub candidate: ScoredCandidate,
    pub slot: Slot,
}

/// Assignments in the order they were made
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub assignments: Vec<Assignment>,
}

impl SelectionResult {
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments ordered by time of day, then platform
    pub fn chronological(&self) -> Vec<&Assignment> {
        let mut out: Vec<&Assignment> = self.assignments.iter().collect();
        out.sort_by(|a, b| {
            a.slot
                .time
                .cmp(&b.slot.time)
                .then_with(|| a.slot.platform.cmp(&b.slot.platform))
        });
        out
    }
}

/// Greedy selection over `ranked` (already sorted best-first)
pub fn select(
    ranked: &[ScoredCandidate],
    request: &SelectionRequest,
    catalog: &SlotCatalog,
) -> SelectionResult {
    let mut result = SelectionResult::default();
    if request.quota == 0 || ranked.is_empty() || catalog.is_empty() {
        debug!("[SELECT] Nothing to select (quota {}, {} candidates, {} slots)", request.quota, ranked.len(), catalog.len());
        return result;
    }

    let mut used = vec![false; catalog.len()];
    let mut attempted = vec![false; ranked.len()];
    let mut dropped = 0usize;

    if let Some(key) = request.diversity {
        let mut seen_keys: HashSet<String> = HashSet::new();
        for (i, candidate) in ranked.iter().enumerate() {
            if result.len() >= request.quota {
                break;
            }
            let Some(k) = key.key_for(&candidate.candidate) else {
                continue;
            };
            // A key is spent on its best candidate even if that one finds no slot
            if !seen_keys.insert(k) {
                continue;
            }
            attempted[i] = true;
            if !try_assign(candidate, request, catalog, &mut used, &mut result) {
                dropped += 1;
            }
        }
        debug!("[SELECT] Diversity pass by {:?}: {} assigned", key, result.len());
    }

    for (i, candidate) in ranked.iter().enumerate() {
        if result.len() >= request.quota {
            break;
        }
        if attempted[i] {
            continue;
        }
        attempted[i] = true;
        if !try_assign(candidate, request, catalog, &mut used, &mut result) {
            dropped += 1;
        }
    }

    info!(
        "[SELECT] ✅ Selected {}/{} (quota {}, {} dropped for lack of a slot)",
        result.len(),
        ranked.len(),
        request.quota,
        dropped
    );
    result
}

fn try_assign(
    candidate: &ScoredCandidate,
    request: &SelectionRequest,
    catalog: &SlotCatalog,
    used: &mut [bool],
    result: &mut SelectionResult,
) -> bool {
    let mut per_platform: HashMap<_, usize> = HashMap::new();
    for a in &result.assignments {
        *per_platform.entry(a.slot.platform).or_default() += 1;
    }

    let mut best: Option<usize> = None;
    for (idx, slot) in catalog.slots().iter().enumerate() {
        if used[idx] {
            continue;
        }
        if let Some(limit) = request.per_platform_limit {
            if per_platform.get(&slot.platform).copied().unwrap_or(0) >= limit {
                continue;
            }
        }
        let too_close = result.assignments.iter().any(|a| {
            a.slot.platform == slot.platform
                && a.slot.time.minutes_between(&slot.time) < request.min_gap_minutes
        });
        if too_close {
            continue;
        }
        // Strictly greater keeps the earliest catalog entry on ties
        let better = match best {
            Some(b) => slot.recommendation_score > catalog.slots()[b].recommendation_score,
            None => true,
        };
        if better {
            best = Some(idx);
        }
    }

    match best {
        Some(idx) => {
            used[idx] = true;
            let slot = catalog.slots()[idx].clone();
            debug!(
                "[SELECT] {} -> {} {} (score {}, slot {})",
                candidate.candidate.identifier,
                slot.platform,
                slot.time,
                candidate.score,
                slot.recommendation_score
            );
            result.assignments.push(Assignment {
                candidate: candidate.clone(),
                slot,
            });
            true
        }
        None => {
            debug!("[SELECT] No free slot for {}", candidate.candidate.identifier);
            false
        }
    }
}
