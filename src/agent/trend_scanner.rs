// SociaClip Trend Scanner
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Discovery collector. Runs a handful of templated web-search queries per
// niche against a Brave-compatible search endpoint and turns the web results
// into candidates tagged with that niche.

use crate::config::{SearchConfig, SociaConfig};
use crate::engine::candidate::{Candidate, Niche};
use crate::engine::template::{FormatError, TemplateBook};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

/// Query templates run for every niche, in order
pub const QUERY_TEMPLATES: [&str; 5] = [
    "query.trending",
    "query.viral",
    "query.popular",
    "query.moments",
    "query.best",
];

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    web: Option<WebSection>,
}

#[derive(Debug, Default, Deserialize)]
struct WebSection {
    #[serde(default)]
    results: Vec<WebResult>,
}

#[derive(Debug, Default, Deserialize)]
struct WebResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    age: Option<String>,
}

pub struct TrendScanner {
    client: Client,
    search: SearchConfig,
    templates: TemplateBook,
}

impl TrendScanner {
    pub fn new(search: SearchConfig, templates: TemplateBook) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(search.request_timeout_secs.max(1)))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            search,
            templates,
        })
    }

    pub fn from_config(config: &SociaConfig) -> Result<Self> {
        Self::new(config.search.clone(), config.templates.clone())
    }

    /// The five discovery queries for `niche`, dated from `now`
    pub fn queries(&self, niche: &Niche, now: DateTime<Local>) -> Result<Vec<String>, FormatError> {
        let vars = HashMap::from([
            ("niche", niche.to_string()),
            ("year", now.format("%Y").to_string()),
            ("month", now.format("%B").to_string()),
        ]);
        QUERY_TEMPLATES
            .iter()
            .map(|id| self.templates.format(id, &vars))
            .collect()
    }

    /// One search request; results come back tagged with `niche`
    pub async fn search(&self, query: &str, niche: &Niche) -> Result<Vec<Candidate>> {
        let Some(api_key) = self.search.api_key.as_deref() else {
            bail!("No search API key configured (set BRAVE_API_KEY)");
        };

        let count = self.search.results_per_query.to_string();
        let resp = self
            .client
            .get(&self.search.base_url)
            .header("X-Subscription-Token", api_key)
            .header("Accept", "application/json")
            .query(&[
                ("q", query),
                ("count", count.as_str()),
                ("freshness", self.search.freshness.as_str()),
                ("text_decorations", "false"),
                ("search_lang", "en"),
            ])
            .send()
            .await
            .with_context(|| format!("Search request failed for '{}'", query))?;

        if !resp.status().is_success() {
            bail!("Search API error {} for '{}'", resp.status(), query);
        }

        let body: SearchResponse = resp
            .json()
            .await
            .with_context(|| format!("Malformed search response for '{}'", query))?;

        let results = body.web.map(|w| w.results).unwrap_or_default();
        Ok(results
            .into_iter()
            .map(|r| Candidate {
                identifier: r.url,
                title: r.title,
                description: r.description,
                category: niche.clone(),
                published: r.age.filter(|a| !a.is_empty()),
                search_query: Some(query.to_string()),
                ..Default::default()
            })
            .collect())
    }

    /// Run every query for `niche`; a failing query is logged and skipped
    pub async fn scan_niche(&self, niche: &Niche) -> Result<Vec<Candidate>> {
        if self.search.api_key.is_none() {
            bail!("No search API key configured (set BRAVE_API_KEY)");
        }

        let queries = self
            .queries(niche, Local::now())
            .context("Failed to build search queries")?;

        info!("[SCANNER] 🔍 Scanning '{}' ({} queries)", niche, queries.len());
        let mut found = Vec::new();
        for query in &queries {
            match self.search(query, niche).await {
                Ok(mut hits) => {
                    info!("[SCANNER] '{}' -> {} results", query, hits.len());
                    found.append(&mut hits);
                }
                Err(e) => warn!("[SCANNER] ⚠️ Skipping query '{}': {:#}", query, e),
            }
        }
        Ok(found)
    }

    /// Scan several niches, keeping discovery order
    pub async fn scan(&self, niches: &[Niche]) -> Result<Vec<Candidate>> {
        let mut all = Vec::new();
        for niche in niches {
            all.extend(self.scan_niche(niche).await?);
        }
        info!("[SCANNER] ✅ Discovered {} raw candidates across {} niches", all.len(), niches.len());
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_queries_use_niche_and_date() {
        let scanner = TrendScanner::new(SearchConfig::default(), TemplateBook::default()).unwrap();
        let now = Local.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let queries = scanner.queries(&Niche::Fitness, now).unwrap();
        assert_eq!(
            queries,
            vec![
                "trending fitness YouTube videos 2026",
                "viral fitness content TikTok recent",
                "popular fitness videos this week",
                "fitness viral moments March",
                "best fitness clips going viral",
            ]
        );
    }

    #[test]
    fn test_queries_fail_on_missing_template() {
        let scanner = TrendScanner::new(SearchConfig::default(), TemplateBook::empty()).unwrap();
        let err = scanner.queries(&Niche::Food, Local::now()).unwrap_err();
        assert_eq!(err, FormatError::UnknownTemplate("query.trending".to_string()));
    }

    #[tokio::test]
    async fn test_scan_without_key_errors() {
        let scanner = TrendScanner::new(SearchConfig::default(), TemplateBook::default()).unwrap();
        assert!(scanner.scan_niche(&Niche::Gaming).await.is_err());
    }

    #[test]
    fn test_response_without_web_section() {
        let body: SearchResponse = serde_json::from_str(r#"{"query": {"original": "x"}}"#).unwrap();
        assert!(body.web.is_none());
    }
}
