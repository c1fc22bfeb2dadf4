// SociaClip Server State
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::agent::pipeline::{ContentPipeline, PlanReport};
use crate::config::SociaConfig;
use crate::engine::candidate::Niche;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;

pub struct ServerState {
    pub pipeline: ContentPipeline,
    pub runs: Mutex<RunLog>,
}

impl ServerState {
    pub fn new(config: SociaConfig) -> Self {
        Self {
            pipeline: ContentPipeline::new(config),
            runs: Mutex::new(RunLog::default()),
        }
    }

    pub fn config(&self) -> &SociaConfig {
        self.pipeline.config()
    }
}

#[derive(Debug, Default)]
pub struct RunLog {
    pub total: u64,
    pub last: Option<RunSummary>,
}

impl RunLog {
    pub fn record(&mut self, report: &PlanReport) {
        self.total += 1;
        self.last = Some(RunSummary::from(report));
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub focus_niche: Niche,
    pub candidates: usize,
    pub posts: usize,
    pub overall_quality_score: Option<f64>,
}

impl From<&PlanReport> for RunSummary {
    fn from(report: &PlanReport) -> Self {
        Self {
            generated_at: report.generated_at,
            focus_niche: report.focus_niche.clone(),
            candidates: report.discovery.total_discovered,
            posts: report.posts.len(),
            overall_quality_score: report.quality.as_ref().map(|q| q.overall_quality_score),
        }
    }
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub runs: u64,
    pub last_run: Option<RunSummary>,
}
