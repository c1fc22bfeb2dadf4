// SociaClip Deduplicator
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Identity-key deduplication. The key is the identifier (URL) compared
// case-sensitively, so `https://a/X` and `https://a/x` are distinct items.

use crate::engine::candidate::Identified;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Keep the first occurrence of every identifier, preserving order.
///
/// Items without an identifier are dropped and logged as skipped.
pub fn dedup<T: Identified>(items: Vec<T>) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let mut unique = Vec::with_capacity(items.len());
    let mut skipped = 0usize;

    for item in items {
        let key = match item.identifier() {
            Some(id) => id.to_string(),
            None => {
                skipped += 1;
                continue;
            }
        };
        if seen.insert(key) {
            unique.push(item);
        }
    }

    if skipped > 0 {
        warn!("[DEDUP] ⚠️ Skipped {} candidate(s) with no identifier", skipped);
    }
    debug!("[DEDUP] {} unique candidates", unique.len());
    unique
}
