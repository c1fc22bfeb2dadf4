// SociaClip Exporter
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Flattens a plan into plain records and writes them out as pretty JSON.

use crate::agent::content_writer::ContentStrategy;
use crate::agent::pipeline::PlanReport;
use crate::agent::quality::{DiscoverySummary, QualityReport};
use crate::engine::candidate::{Niche, Platform};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// One post, ready for a scheduler to pick up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub identifier: String,
    pub title: String,
    pub niche: Niche,
    pub platform: Platform,
    /// `HH:MM`
    pub scheduled_time: String,
    /// `YYYY-MM-DD HH:MM` on the plan's generation date
    pub scheduled_for: String,
    pub viral_score: u8,
    pub recommendation_score: u8,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub full_post: String,
    pub content_strategy: Option<ContentStrategy>,
    pub optimization_score: Option<u8>,
    pub quality_score: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub generated_at: DateTime<Utc>,
    pub focus_niche: Niche,
    pub discovery: DiscoverySummary,
    pub posts: Vec<ExportRecord>,
    pub quality: Option<QualityReport>,
}

pub fn export_records(report: &PlanReport) -> Vec<ExportRecord> {
    let date = report.generated_at.date_naive();
    report
        .posts
        .iter()
        .map(|post| {
            let slot = post.slot();
            let (caption, hashtags, full_post) = match &post.copy {
                Some(copy) => (copy.caption.clone(), copy.hashtags.clone(), copy.full_post()),
                None => (String::new(), Vec::new(), String::new()),
            };
            ExportRecord {
                identifier: post.identifier().to_string(),
                title: post.candidate().title.clone(),
                niche: post.candidate().category.clone(),
                platform: slot.platform,
                scheduled_time: slot.time.to_string(),
                scheduled_for: format!("{} {}", date.format("%Y-%m-%d"), slot.time),
                viral_score: post.viral_score(),
                recommendation_score: slot.recommendation_score,
                caption,
                hashtags,
                full_post,
                content_strategy: post.copy.as_ref().map(|c| c.strategy),
                optimization_score: post.optimization_score(),
                quality_score: post.quality_score,
            }
        })
        .collect()
}

pub fn export_document(report: &PlanReport) -> ExportDocument {
    ExportDocument {
        generated_at: report.generated_at,
        focus_niche: report.focus_niche.clone(),
        discovery: report.discovery.clone(),
        posts: export_records(report),
        quality: report.quality.clone(),
    }
}

/// Write `sociaclip_plan_<timestamp>.json` into `dir`, creating it if needed
pub fn export_plan(report: &PlanReport, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let filename = format!(
        "sociaclip_plan_{}.json",
        report.generated_at.format("%Y%m%d_%H%M%S")
    );
    let path = dir.join(filename);

    let json = serde_json::to_string_pretty(&export_document(report))
        .context("Failed to serialize plan")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("[EXPORT] 💾 Saved {} post(s) to {}", report.posts.len(), path.display());
    Ok(path)
}
