// SociaClip Quality Review
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Post-selection review: a quality score per planned post, issues for the
// ones under the optimization floor, plan-level suggestions, a rough
// engagement prediction and the discovery funnel summary.

use crate::agent::pipeline::PlannedPost;
use crate::config::QualityFilters;
use crate::engine::candidate::{Platform, ScoredCandidate};
use crate::engine::selector::SelectionResult;
use crate::engine::truncate_score;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

fn viral_tier_points(viral_score: u8) -> f64 {
    match viral_score {
        71..=u8::MAX => 20.0,
        51..=70 => 15.0,
        31..=50 => 10.0,
        _ => 5.0,
    }
}

/// Optimization 40%, slot 30%, viral tier up to 20, completeness up to 10
pub fn post_quality(post: &PlannedPost) -> u8 {
    let optimization = post.optimization_score().unwrap_or(0) as f64;
    let recommendation = post.slot().recommendation_score as f64;

    let has_caption = post.copy.as_ref().is_some_and(|c| !c.caption.is_empty());
    let has_hashtags = post.copy.as_ref().is_some_and(|c| !c.hashtags.is_empty());
    // Slot and platform are always present on an assignment
    let complete = [has_caption, has_hashtags, true, true]
        .iter()
        .filter(|f| **f)
        .count() as f64;

    let score = optimization * 0.4
        + recommendation * 0.3
        + viral_tier_points(post.viral_score())
        + complete / 4.0 * 10.0;
    truncate_score(score)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostQuality {
    pub identifier: String,
    pub platform: Platform,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub identifier: String,
    pub platform: Platform,
    pub issue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformPrediction {
    pub posts: usize,
    pub expected_engagement: f64,
    pub viral_potential: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformancePrediction {
    pub total_expected_engagement: f64,
    pub viral_potential_posts: usize,
    pub platforms: BTreeMap<Platform, PlatformPrediction>,
    /// Percent, kept within 20..=95
    pub success_probability: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub individual_scores: Vec<PostQuality>,
    pub overall_quality_score: f64,
    pub issues: Vec<QualityIssue>,
    pub suggestions: Vec<String>,
    pub prediction: PerformancePrediction,
}

pub fn review(posts: &[PlannedPost], filters: &QualityFilters) -> QualityReport {
    let mut report = QualityReport::default();

    for post in posts {
        let score = post_quality(post);
        if score < filters.min_optimization_score {
            report.issues.push(QualityIssue {
                identifier: post.identifier().to_string(),
                platform: post.platform(),
                issue: format!("Low quality score: {}/100", score),
            });
        }
        report.individual_scores.push(PostQuality {
            identifier: post.identifier().to_string(),
            platform: post.platform(),
            score,
        });
    }

    if !report.individual_scores.is_empty() {
        let sum: u32 = report.individual_scores.iter().map(|q| q.score as u32).sum();
        report.overall_quality_score = sum as f64 / report.individual_scores.len() as f64;
    }

    report.prediction = predict(posts);
    report.suggestions = suggestions(posts, report.overall_quality_score);
    report
}

fn predict(posts: &[PlannedPost]) -> PerformancePrediction {
    let mut prediction = PerformancePrediction::default();

    for post in posts {
        let slot = post.slot();
        let optimization = post.optimization_score().unwrap_or(0) as f64 / 100.0;
        let engagement = slot.expected_engagement * slot.viral_multiplier * optimization;
        let viral = post.viral_score() > 60;

        prediction.total_expected_engagement += engagement;
        if viral {
            prediction.viral_potential_posts += 1;
        }
        let entry = prediction.platforms.entry(post.platform()).or_default();
        entry.posts += 1;
        entry.expected_engagement += engagement;
        if viral {
            entry.viral_potential += 1;
        }
    }

    let raw = prediction.total_expected_engagement * 30.0 + prediction.viral_potential_posts as f64 * 10.0;
    prediction.success_probability = (raw as i64).clamp(20, 95) as u8;
    prediction
}

fn suggestions(posts: &[PlannedPost], overall: f64) -> Vec<String> {
    let mut out = Vec::new();
    if posts.is_empty() {
        return out;
    }
    let n = posts.len() as f64;

    if overall < 80.0 {
        out.push("Consider regenerating content with higher viral score videos for better quality".to_string());
    }

    let viral = posts.iter().filter(|p| p.viral_score() > 60).count() as f64;
    if viral < n * 0.3 {
        out.push("Increase viral content ratio - target more high-scoring trending videos".to_string());
    }

    let mut per_platform: BTreeMap<Platform, usize> = BTreeMap::new();
    for p in posts {
        *per_platform.entry(p.platform()).or_default() += 1;
    }
    if per_platform.values().copied().max().unwrap_or(0) as f64 > n * 0.6 {
        out.push("Consider more balanced platform distribution for broader reach".to_string());
    }

    let distinct_times: HashSet<_> = posts.iter().map(|p| p.slot().time).collect();
    if (distinct_times.len() as f64) < n * 0.8 {
        out.push("Spread out posting times more for better individual post visibility".to_string());
    }

    out
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViralTiers {
    /// Above 70
    pub high: usize,
    /// 50 through 70
    pub medium: usize,
    /// Below 50
    pub low: usize,
}

/// Discovery funnel for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoverySummary {
    pub total_discovered: usize,
    pub unique: usize,
    pub qualified: usize,
    pub total_selected: usize,
    pub selection_rate: f64,
    pub average_viral_score: f64,
    pub niche_distribution: BTreeMap<String, usize>,
    pub viral_tiers: ViralTiers,
}

pub fn summarize_discovery(
    total_discovered: usize,
    unique: usize,
    qualified: &[ScoredCandidate],
    selection: &SelectionResult,
) -> DiscoverySummary {
    let selected: Vec<&ScoredCandidate> = selection.assignments.iter().map(|a| &a.candidate).collect();

    let mut summary = DiscoverySummary {
        total_discovered,
        unique,
        qualified: qualified.len(),
        total_selected: selected.len(),
        ..Default::default()
    };

    if total_discovered > 0 {
        summary.selection_rate = selected.len() as f64 / total_discovered as f64;
    }
    if !selected.is_empty() {
        let sum: u32 = selected.iter().map(|s| s.score as u32).sum();
        summary.average_viral_score = sum as f64 / selected.len() as f64;
    }

    for s in &selected {
        *summary
            .niche_distribution
            .entry(s.candidate.category.to_string())
            .or_default() += 1;
        match s.score {
            71..=u8::MAX => summary.viral_tiers.high += 1,
            50..=70 => summary.viral_tiers.medium += 1,
            _ => summary.viral_tiers.low += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::content_writer::{ContentStrategy, PostCopy};
    use crate::engine::candidate::{Candidate, Niche};
    use crate::engine::selector::Assignment;
    use crate::engine::slots::{Slot, TimeOfDay};

    fn planned(id: &str, viral: u8, slot_score: u8, optimization: Option<u8>, h: u32) -> PlannedPost {
        let candidate = ScoredCandidate::with_score(Candidate::new(id, id, "", Niche::Fitness), viral, 0);
        let copy = optimization.map(|o| PostCopy {
            caption: "caption".to_string(),
            hashtags: vec!["#fitness".to_string()],
            optimization_score: o,
            strategy: ContentStrategy::Storytelling,
        });
        PlannedPost {
            assignment: Assignment {
                candidate,
                slot: Slot::new(TimeOfDay::hm(h, 0), Platform::Instagram, slot_score),
            },
            copy,
            quality_score: None,
        }
    }

    #[test]
    fn test_post_quality_formula() {
        // 80*0.4 + 70*0.3 + 20 + 10 = 83
        assert_eq!(post_quality(&planned("a", 90, 70, Some(80), 9)), 83);
        // no copy: 0 + 50*0.3 + 5 + 5 = 25
        assert_eq!(post_quality(&planned("b", 10, 50, None, 9)), 25);
        // 64*0.4 + 81*0.3 + 20 + 10 = 79.9, fractions dropped
        assert_eq!(post_quality(&planned("c", 90, 81, Some(64), 9)), 79);
    }

    #[test]
    fn test_review_flags_low_posts() {
        let posts = vec![planned("good", 90, 90, Some(100), 9), planned("bad", 10, 10, None, 12)];
        let filters = QualityFilters::default();
        let report = review(&posts, &filters);
        assert_eq!(report.individual_scores.len(), 2);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].identifier, "bad");
        assert!(report
            .suggestions
            .iter()
            .any(|s| s.contains("balanced platform distribution")));
        assert!((20..=95).contains(&report.prediction.success_probability));
    }

    #[test]
    fn test_review_empty() {
        let report = review(&[], &QualityFilters::default());
        assert_eq!(report.overall_quality_score, 0.0);
        assert!(report.suggestions.is_empty());
        assert_eq!(report.prediction.success_probability, 20);
    }

    #[test]
    fn test_discovery_summary() {
        let posts = vec![planned("a", 90, 50, None, 9), planned("b", 60, 50, None, 12), planned("c", 20, 50, None, 15)];
        let selection = SelectionResult {
            assignments: posts.into_iter().map(|p| p.assignment).collect(),
        };
        let summary = summarize_discovery(10, 8, &[], &selection);
        assert_eq!(summary.total_selected, 3);
        assert!((summary.selection_rate - 0.3).abs() < 1e-9);
        assert!((summary.average_viral_score - 170.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.viral_tiers, ViralTiers { high: 1, medium: 1, low: 1 });
        assert_eq!(summary.niche_distribution.get("fitness"), Some(&3));
    }
}
