// SociaClip Content Pipeline
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// One configurable pipeline from raw candidates to a posting plan:
//   1. score -> dedup -> viral floor -> rank
//   2. slot catalog for every configured platform
//   3. greedy constrained selection
//   4. captions + hashtags (stage flag)
//   5. quality review (stage flag)

use crate::agent::content_writer::{ContentWriter, PostCopy};
use crate::agent::quality::{self, DiscoverySummary, QualityReport};
use crate::config::SociaConfig;
use crate::engine::candidate::{Candidate, Niche, Platform, ScoredCandidate, OPTIMIZATION_SCORE};
use crate::engine::random::RandomSource;
use crate::engine::scorer::Scorer;
use crate::engine::selector::{select, Assignment};
use crate::engine::slots::{Slot, SlotCatalog, SlotPlanner};
use crate::engine::template::FormatError;
use crate::engine::{score_and_rank, Qualified};
use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A selected candidate with its slot and generated copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedPost {
    pub assignment: Assignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy: Option<PostCopy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u8>,
}

impl PlannedPost {
    pub fn candidate(&self) -> &Candidate {
        &self.assignment.candidate.candidate
    }

    pub fn identifier(&self) -> &str {
        &self.candidate().identifier
    }

    pub fn slot(&self) -> &Slot {
        &self.assignment.slot
    }

    pub fn platform(&self) -> Platform {
        self.assignment.slot.platform
    }

    pub fn viral_score(&self) -> u8 {
        self.assignment.candidate.score
    }

    pub fn optimization_score(&self) -> Option<u8> {
        self.copy.as_ref().map(|c| c.optimization_score)
    }
}

/// Everything one run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub generated_at: DateTime<Utc>,
    pub focus_niche: Niche,
    pub discovery: DiscoverySummary,
    pub posts: Vec<PlannedPost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityReport>,
}

pub struct ContentPipeline {
    config: SociaConfig,
    scorer: Scorer,
    planner: SlotPlanner,
    writer: ContentWriter,
}

impl ContentPipeline {
    pub fn new(config: SociaConfig) -> Self {
        let scorer = Scorer::new(config.scoring.clone());
        let planner = SlotPlanner::new(config.scheduling.tables.clone());
        let writer = ContentWriter::from_config(&config);
        Self {
            config,
            scorer,
            planner,
            writer,
        }
    }

    pub fn config(&self) -> &SociaConfig {
        &self.config
    }

    pub fn writer(&self) -> &ContentWriter {
        &self.writer
    }

    /// The top candidate's niche, else the first target niche
    pub fn focus_niche(&self, ranked: &[ScoredCandidate]) -> Niche {
        ranked
            .first()
            .map(|s| s.candidate.category.clone())
            .or_else(|| self.config.target_niches.first().cloned())
            .unwrap_or_default()
    }

    /// Slot options for every configured platform, sized by the batch's mean viral score
    pub fn build_catalog(&self, ranked: &[ScoredCandidate], niche: &Niche, weekday: Weekday) -> SlotCatalog {
        let mean = if ranked.is_empty() {
            0
        } else {
            let sum: u32 = ranked.iter().map(|s| s.score as u32).sum();
            (sum / ranked.len() as u32) as u8
        };
        self.planner.catalog(&self.config.platforms, niche, mean, weekday)
    }

    pub fn plan(
        &self,
        candidates: Vec<Candidate>,
        weekday: Weekday,
        rng: &mut dyn RandomSource,
    ) -> Result<PlanReport, FormatError> {
        let total_discovered = candidates.len();
        info!("[PIPELINE] 🚀 Planning from {} raw candidates", total_discovered);

        let floor = self.config.quality_filters.min_viral_score;
        let Qualified { ranked, unique } = score_and_rank(&self.scorer, candidates, floor);
        info!(
            "[PIPELINE] {} unique, {} above viral floor {}",
            unique,
            ranked.len(),
            floor
        );

        let focus_niche = self.focus_niche(&ranked);
        let catalog = self.build_catalog(&ranked, &focus_niche, weekday);
        let selection = select(&ranked, &self.config.selection_request(), &catalog);
        let discovery = quality::summarize_discovery(total_discovered, unique, &ranked, &selection);

        let mut posts = Vec::with_capacity(selection.len());
        for assignment in selection.assignments {
            let mut post = PlannedPost {
                assignment,
                copy: None,
                quality_score: None,
            };
            if self.config.stages.captions {
                let copy = self
                    .writer
                    .write_post(post.candidate(), post.platform(), post.viral_score(), rng)?;
                post.assignment
                    .candidate
                    .candidate
                    .attributes
                    .insert(OPTIMIZATION_SCORE.to_string(), copy.optimization_score);
                post.copy = Some(copy);
            }
            posts.push(post);
        }

        let quality = if self.config.stages.quality_review {
            for post in posts.iter_mut() {
                post.quality_score = Some(quality::post_quality(post));
            }
            let report = quality::review(&posts, &self.config.quality_filters);
            info!(
                "[PIPELINE] 📊 Quality {:.1}/100, {} issue(s)",
                report.overall_quality_score,
                report.issues.len()
            );
            Some(report)
        } else {
            None
        };

        info!("[PIPELINE] ✅ Planned {} post(s) for niche '{}'", posts.len(), focus_niche);
        Ok(PlanReport {
            generated_at: Utc::now(),
            focus_niche,
            discovery,
            posts,
            quality,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::content_writer::ContentStrategy;
    use crate::engine::random::FirstChoice;

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new("https://youtube.com/a", "Viral fitness workout on YouTube", "insane gains", Niche::Fitness),
            Candidate::new("https://tiktok.com/b", "Trending startup tips", "business advice going viral on tiktok", Niche::Business),
            Candidate::new("https://youtube.com/a", "duplicate", "", Niche::Fitness),
            Candidate::new("https://example.com/c", "calm", "nothing", Niche::Comedy),
        ]
    }

    #[test]
    fn test_plan_end_to_end() {
        let pipeline = ContentPipeline::new(SociaConfig::default());
        let report = pipeline.plan(candidates(), Weekday::Tue, &mut FirstChoice).unwrap();

        assert_eq!(report.discovery.total_discovered, 4);
        assert_eq!(report.discovery.unique, 3);
        assert_eq!(report.discovery.qualified, 2);
        assert_eq!(report.posts.len(), 2);
        assert_eq!(report.focus_niche, Niche::Fitness);
        for post in &report.posts {
            assert!(post.copy.is_some());
            assert!(post.quality_score.is_some());
            assert!(post.candidate().attribute(OPTIMIZATION_SCORE).is_some());
        }
        assert!(report.quality.is_some());
    }

    #[test]
    fn test_stage_flags_skip_optional_stages() {
        let mut config = SociaConfig::default();
        config.stages.captions = false;
        config.stages.quality_review = false;
        let pipeline = ContentPipeline::new(config);
        let report = pipeline.plan(candidates(), Weekday::Sat, &mut FirstChoice).unwrap();
        assert!(report.posts.iter().all(|p| p.copy.is_none() && p.quality_score.is_none()));
        assert!(report.quality.is_none());
    }

    #[test]
    fn test_empty_input_gives_empty_plan() {
        let pipeline = ContentPipeline::new(SociaConfig::default());
        let report = pipeline.plan(Vec::new(), Weekday::Mon, &mut FirstChoice).unwrap();
        assert!(report.posts.is_empty());
        assert_eq!(report.focus_niche, Niche::Fitness);
    }

    #[test]
    fn test_broken_template_is_hard_failure() {
        let mut config = SociaConfig::default();
        for strategy in [
            ContentStrategy::ViralFocused,
            ContentStrategy::Educational,
            ContentStrategy::Storytelling,
        ] {
            for id in strategy.template_ids() {
                config.templates.insert(id, "{insight} {missing}");
            }
        }
        config.platforms = vec![Platform::Instagram];
        let pipeline = ContentPipeline::new(config);
        let err = pipeline.plan(candidates(), Weekday::Wed, &mut FirstChoice).unwrap_err();
        assert_eq!(err, FormatError::MissingVariable("missing".to_string()));
    }
}
