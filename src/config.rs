// SociaClip Config - Run Configuration
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Everything a run reads: quota, niches, platforms, scoring and scheduling
// tables, platform profiles, quality floors, stage flags and the search
// endpoint. Loaded from JSON, then patched from the environment.

use crate::agent::content_writer::WriterTables;
use crate::engine::candidate::{Niche, Platform};
use crate::engine::scorer::ScoringTables;
use crate::engine::selector::{DiversityKey, SelectionRequest};
use crate::engine::slots::SchedulingTables;
use crate::engine::template::TemplateBook;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "sociaclip.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagRange {
    pub min: usize,
    pub max: usize,
}

impl HashtagRange {
    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformProfile {
    pub max_caption_length: usize,
    pub optimal_hashtags: HashtagRange,
}

impl PlatformProfile {
    fn new(max_caption_length: usize, min: usize, max: usize) -> Self {
        Self {
            max_caption_length,
            optimal_hashtags: HashtagRange { min, max },
        }
    }
}

/// Profile for `platform`, falling back to instagram's, then to instagram's defaults
pub fn profile_for(profiles: &BTreeMap<Platform, PlatformProfile>, platform: Platform) -> PlatformProfile {
    profiles
        .get(&platform)
        .or_else(|| profiles.get(&Platform::Instagram))
        .cloned()
        .unwrap_or_else(|| PlatformProfile::new(2200, 5, 10))
}

fn default_profiles() -> BTreeMap<Platform, PlatformProfile> {
    BTreeMap::from([
        (Platform::Instagram, PlatformProfile::new(2200, 5, 10)),
        (Platform::TikTok, PlatformProfile::new(150, 3, 5)),
        (Platform::YoutubeShorts, PlatformProfile::new(1000, 5, 8)),
        (Platform::Twitter, PlatformProfile::new(280, 1, 2)),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    pub min_gap_minutes: u32,
    pub diversity: Option<DiversityKey>,
    pub per_platform_limit: Option<usize>,
    pub tables: SchedulingTables,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            min_gap_minutes: 30,
            diversity: Some(DiversityKey::Niche),
            per_platform_limit: None,
            tables: SchedulingTables::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityFilters {
    pub min_viral_score: u8,
    pub min_optimization_score: u8,
}

impl Default for QualityFilters {
    fn default() -> Self {
        Self {
            min_viral_score: 30,
            min_optimization_score: 60,
        }
    }
}

/// Optional pipeline stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageFlags {
    pub captions: bool,
    pub quality_review: bool,
}

impl Default for StageFlags {
    fn default() -> Self {
        Self {
            captions: true,
            quality_review: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub base_url: String,
    pub results_per_query: u32,
    pub freshness: String,
    pub request_timeout_secs: u64,
    /// Never written back out
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.search.brave.com/res/v1/web/search".to_string(),
            results_per_query: 10,
            freshness: "pw".to_string(),
            request_timeout_secs: 30,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SociaConfig {
    pub posts_per_day: usize,
    pub target_niches: Vec<Niche>,
    pub platforms: Vec<Platform>,
    pub scoring: ScoringTables,
    pub scheduling: SchedulingConfig,
    pub platform_profiles: BTreeMap<Platform, PlatformProfile>,
    pub quality_filters: QualityFilters,
    pub stages: StageFlags,
    pub search: SearchConfig,
    pub templates: TemplateBook,
    pub writer: WriterTables,
    pub export_dir: String,
}

impl Default for SociaConfig {
    fn default() -> Self {
        Self {
            posts_per_day: 5,
            target_niches: vec![
                Niche::Fitness,
                Niche::Business,
                Niche::Technology,
                Niche::Comedy,
            ],
            platforms: Platform::ALL.to_vec(),
            scoring: ScoringTables::default(),
            scheduling: SchedulingConfig::default(),
            platform_profiles: default_profiles(),
            quality_filters: QualityFilters::default(),
            stages: StageFlags::default(),
            search: SearchConfig::default(),
            templates: TemplateBook::default(),
            writer: WriterTables::default(),
            export_dir: "exports".to_string(),
        }
    }
}

impl SociaConfig {
    /// Read `path`; a missing file means defaults, a broken one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let parsed: SociaConfig = serde_json::from_str(&content)
                .with_context(|| format!("Malformed config {}", path.display()))?;
            info!("[CONFIG] Loaded configuration from {}", path.display());
            parsed
        } else {
            info!("[CONFIG] {} not found, using defaults", path.display());
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Environment overrides: `BRAVE_API_KEY`, `SOCIACLIP_POSTS_PER_DAY`, `SOCIACLIP_SEARCH_URL`
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("BRAVE_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.search.api_key = Some(key);
        }
        if let Some(raw) = lookup("SOCIACLIP_POSTS_PER_DAY") {
            match raw.trim().parse::<usize>() {
                Ok(n) => self.posts_per_day = n,
                Err(_) => warn!("[CONFIG] ⚠️ Ignoring SOCIACLIP_POSTS_PER_DAY='{}'", raw),
            }
        }
        if let Some(url) = lookup("SOCIACLIP_SEARCH_URL").filter(|u| !u.trim().is_empty()) {
            self.search.base_url = url;
        }
    }

    pub fn profile(&self, platform: Platform) -> PlatformProfile {
        profile_for(&self.platform_profiles, platform)
    }

    pub fn selection_request(&self) -> SelectionRequest {
        SelectionRequest {
            quota: self.posts_per_day,
            diversity: self.scheduling.diversity,
            min_gap_minutes: self.scheduling.min_gap_minutes,
            per_platform_limit: self.scheduling.per_platform_limit,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_documented_values() {
        let c = SociaConfig::default();
        assert_eq!(c.posts_per_day, 5);
        assert_eq!(c.quality_filters.min_viral_score, 30);
        assert_eq!(c.quality_filters.min_optimization_score, 60);
        assert_eq!(c.scheduling.min_gap_minutes, 30);
        assert_eq!(c.platforms.len(), 4);
        assert_eq!(c.profile(Platform::Twitter).max_caption_length, 280);
        assert!(c.search.api_key.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let c: SociaConfig = serde_json::from_str(r#"{"posts_per_day": 2, "platforms": ["tiktok"]}"#).unwrap();
        assert_eq!(c.posts_per_day, 2);
        assert_eq!(c.platforms, vec![Platform::TikTok]);
        assert_eq!(c.quality_filters.min_viral_score, 30);
        assert_eq!(c.scheduling.tables.max_slot_options, 10);
    }

    #[test]
    fn test_missing_file_is_default_and_broken_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let c = SociaConfig::load(&missing).unwrap();
        assert_eq!(c.target_niches.len(), 4);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(SociaConfig::load(&broken).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BRAVE_API_KEY", "secret"),
            ("SOCIACLIP_POSTS_PER_DAY", "7"),
            ("SOCIACLIP_SEARCH_URL", "http://localhost:9999/search"),
        ]);
        let mut c = SociaConfig::default();
        c.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(c.search.api_key.as_deref(), Some("secret"));
        assert_eq!(c.posts_per_day, 7);
        assert_eq!(c.search.base_url, "http://localhost:9999/search");
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut c = SociaConfig::default();
        c.search.api_key = Some("key-never-written".to_string());
        let json = serde_json::to_value(&c).unwrap();
        assert!(json["search"].get("api_key").is_none());
        assert!(!json.to_string().contains("key-never-written"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sociaclip.json");
        let mut c = SociaConfig::default();
        c.posts_per_day = 3;
        c.save(&path).unwrap();
        let back = SociaConfig::load(&path).unwrap();
        assert_eq!(back.posts_per_day, 3);
    }
}
