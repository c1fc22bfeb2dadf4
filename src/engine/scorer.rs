// SociaClip Viral Scorer - Keyword Heuristics
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Assigns every candidate a 0-100 "viral score" from keyword presence in its
// title and description. The score is a pure function of the text and the
// configured tables: no randomness, no external state.

use crate::engine::candidate::{Candidate, Niche, RuleContribution, ScoredCandidate, VIRAL_SCORE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const MAX_SCORE: u32 = 100;

/// A named set of keywords worth a fixed number of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    pub points: u32,
    pub keywords: Vec<String>,
    /// Award the points once when any keyword matches, instead of per keyword
    #[serde(default)]
    pub once: bool,
}

impl KeywordGroup {
    pub fn per_keyword(name: &str, points: u32, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            points,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            once: false,
        }
    }

    pub fn any_once(name: &str, points: u32, keywords: &[&str]) -> Self {
        Self {
            once: true,
            ..Self::per_keyword(name, points, keywords)
        }
    }
}

/// Keyword tables and weights driving the viral score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTables {
    pub groups: Vec<KeywordGroup>,
    /// Category -> keywords that count as "on-niche"
    pub niche_keywords: BTreeMap<Niche, Vec<String>>,
    pub niche_relevance_points: u32,
}

impl Default for ScoringTables {
    fn default() -> Self {
        let groups = vec![
            KeywordGroup::per_keyword(
                "viral",
                10,
                &[
                    "trending", "viral", "millions", "views", "breaking", "shocking", "amazing",
                    "incredible", "unbelievable", "must see", "gone viral", "exploding", "massive",
                    "huge", "crazy", "insane", "epic",
                ],
            ),
            KeywordGroup::any_once("youtube_mention", 15, &["youtube"]),
            KeywordGroup::any_once("tiktok_mention", 12, &["tiktok"]),
            KeywordGroup::any_once("instagram_mention", 8, &["instagram"]),
            KeywordGroup::any_once("recency", 8, &["today", "yesterday", "this week", "recent"]),
            KeywordGroup::any_once("magnitude", 5, &["million", "billion", "thousand"]),
        ];

        let synonyms: &[(Niche, &[&str])] = &[
            (Niche::Fitness, &["fitness", "workout", "gym"]),
            (Niche::Business, &["business", "entrepreneur", "startup"]),
            (Niche::Comedy, &["comedy", "funny", "prank"]),
            (Niche::Gaming, &["gaming", "gameplay", "esports"]),
            (Niche::Technology, &["technology", "tech", "gadget"]),
            (Niche::Food, &["food", "recipe", "cooking"]),
            (Niche::Travel, &["travel", "destination", "trip"]),
            (Niche::Fashion, &["fashion", "outfit", "style"]),
            (Niche::Music, &["music", "song", "cover"]),
            (Niche::Education, &["education", "explained", "lesson"]),
            (Niche::Motivation, &["motivation", "motivational", "mindset"]),
            (Niche::Lifestyle, &["lifestyle", "routine", "vlog"]),
            (Niche::Sports, &["sports", "highlights", "match"]),
            (Niche::News, &["news", "breaking news", "update"]),
            (Niche::Entertainment, &["entertainment", "celebrity", "movie"]),
        ];
        let niche_keywords = synonyms
            .iter()
            .map(|(niche, words)| {
                (
                    niche.clone(),
                    words.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
                )
            })
            .collect();

        Self {
            groups,
            niche_keywords,
            niche_relevance_points: 20,
        }
    }
}

/// Keyword-table scorer
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    tables: ScoringTables,
}

impl Scorer {
    pub fn new(tables: ScoringTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    /// Viral score for `candidate` against `category`, clamped to 0..=100
    pub fn score(&self, candidate: &Candidate, category: &Niche) -> u8 {
        let total: u32 = self
            .contributions(candidate, category)
            .iter()
            .map(|c| c.points)
            .sum();
        total.min(MAX_SCORE) as u8
    }

    /// Score a candidate against its own category, keeping the rule breakdown
    pub fn evaluate(&self, candidate: Candidate, discovery_index: usize) -> ScoredCandidate {
        let category = candidate.category.clone();
        let contributions = self.contributions(&candidate, &category);
        let total: u32 = contributions.iter().map(|c| c.points).sum();
        let score = total.min(MAX_SCORE) as u8;

        debug!(
            "[SCORER] {} -> {} ({} rules fired)",
            candidate.identifier,
            score,
            contributions.len()
        );

        let mut candidate = candidate;
        candidate.attributes.insert(VIRAL_SCORE.to_string(), score);

        ScoredCandidate {
            candidate,
            score,
            contributions,
            discovery_index,
        }
    }

    /// Every rule that fired for the candidate, in table order
    pub fn contributions(&self, candidate: &Candidate, category: &Niche) -> Vec<RuleContribution> {
        let text = candidate.searchable_text();
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut fired = Vec::new();

        for group in &self.tables.groups {
            let mut matched = group
                .keywords
                .iter()
                .filter(|kw| !kw.is_empty() && text.contains(&kw.to_lowercase()));

            if group.once {
                if let Some(kw) = matched.next() {
                    fired.push(RuleContribution {
                        rule: group.name.clone(),
                        keyword: Some(kw.clone()),
                        points: group.points,
                    });
                }
            } else {
                for kw in matched {
                    fired.push(RuleContribution {
                        rule: group.name.clone(),
                        keyword: Some(kw.clone()),
                        points: group.points,
                    });
                }
            }
        }

        if let Some(kw) = self.niche_match(&text, category) {
            fired.push(RuleContribution {
                rule: "niche_relevance".to_string(),
                keyword: Some(kw),
                points: self.tables.niche_relevance_points,
            });
        }

        fired
    }

    fn niche_match(&self, text: &str, category: &Niche) -> Option<String> {
        // Niches without a table entry still match on their own name
        let fallback = [category.as_str().to_string()];
        let keywords = self
            .tables
            .niche_keywords
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&fallback[..]);

        keywords
            .iter()
            .find(|kw| !kw.is_empty() && text.contains(&kw.to_lowercase()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candidate(title: &str, description: &str, niche: Niche) -> Candidate {
        Candidate::new("https://example.com/v", title, description, niche)
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let scorer = Scorer::default();
        let c = candidate("", "", Niche::Fitness);
        assert_eq!(scorer.score(&c, &Niche::Fitness), 0);
        assert!(scorer.contributions(&c, &Niche::Fitness).is_empty());
    }

    #[test]
    fn test_default_weights() {
        let scorer = Scorer::default();
        // viral (10) + youtube (15) + niche name (20)
        let c = candidate("Viral fitness clip on YouTube", "", Niche::Fitness);
        assert_eq!(scorer.score(&c, &Niche::Fitness), 45);
    }

    #[test]
    fn test_once_groups_fire_once() {
        let scorer = Scorer::default();
        let c = candidate("today yesterday recent", "this week", Niche::Custom("x".into()));
        let fired = scorer.contributions(&c, &Niche::Custom("x".into()));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].rule, "recency");
        assert_eq!(fired[0].points, 8);
    }

    #[test]
    fn test_score_clamps_at_100() {
        let scorer = Scorer::default();
        let c = candidate(
            "Trending viral shocking amazing incredible insane epic crazy huge massive",
            "youtube tiktok fitness",
            Niche::Fitness,
        );
        let scored = scorer.evaluate(c, 0);
        assert!(scored.raw_total() > 100);
        assert_eq!(scored.score, 100);
        assert_eq!(scored.candidate.attribute(VIRAL_SCORE), Some(100));
    }

    #[test]
    fn test_custom_niche_matches_own_name() {
        let scorer = Scorer::default();
        let niche = Niche::from("woodworking");
        let c = candidate("Woodworking tips", "", niche.clone());
        assert_eq!(scorer.score(&c, &niche), 20);
    }

    #[test]
    fn test_configurable_weights() {
        let tables = ScoringTables {
            groups: vec![KeywordGroup::per_keyword("viral", 40, &["viral"])],
            niche_keywords: BTreeMap::new(),
            niche_relevance_points: 0,
        };
        let scorer = Scorer::new(tables);
        let c = candidate("viral", "", Niche::Comedy);
        assert_eq!(scorer.score(&c, &Niche::Comedy), 40);
    }

    proptest! {
        #[test]
        fn prop_score_bounded(title in ".{0,200}", description in ".{0,200}") {
            let scorer = Scorer::default();
            let c = candidate(&title, &description, Niche::Technology);
            let s = scorer.score(&c, &Niche::Technology);
            prop_assert!(s <= 100);
        }

        #[test]
        fn prop_score_deterministic(title in "[a-z ]{0,120}", description in "[a-z ]{0,120}") {
            let scorer = Scorer::default();
            let c = candidate(&title, &description, Niche::Comedy);
            let first = scorer.score(&c, &Niche::Comedy);
            for _ in 0..3 {
                prop_assert_eq!(scorer.score(&c, &Niche::Comedy), first);
            }
        }
    }
}
