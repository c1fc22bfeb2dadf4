// SociaClip Candidate Model
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Discovered content items, their niche/platform tags, and the scored form
// the selector consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Attribute key holding the keyword-derived viral score
pub const VIRAL_SCORE: &str = "viral_score";
/// Attribute key holding the caption/hashtag optimization score
pub const OPTIMIZATION_SCORE: &str = "optimization_score";

/// Topical tag used to pick keyword, hook and hashtag tables
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Niche {
    Fitness,
    Business,
    Comedy,
    Gaming,
    Technology,
    Food,
    Travel,
    Fashion,
    Music,
    Education,
    Motivation,
    Lifestyle,
    Sports,
    News,
    Entertainment,
    Custom(String),
}

impl Niche {
    /// Popular niches worth scanning, in the order the scanner walks them
    pub const TOP: [Niche; 15] = [
        Niche::Fitness,
        Niche::Business,
        Niche::Comedy,
        Niche::Gaming,
        Niche::Technology,
        Niche::Food,
        Niche::Travel,
        Niche::Fashion,
        Niche::Music,
        Niche::Education,
        Niche::Motivation,
        Niche::Lifestyle,
        Niche::Sports,
        Niche::News,
        Niche::Entertainment,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Niche::Fitness => "fitness",
            Niche::Business => "business",
            Niche::Comedy => "comedy",
            Niche::Gaming => "gaming",
            Niche::Technology => "technology",
            Niche::Food => "food",
            Niche::Travel => "travel",
            Niche::Fashion => "fashion",
            Niche::Music => "music",
            Niche::Education => "education",
            Niche::Motivation => "motivation",
            Niche::Lifestyle => "lifestyle",
            Niche::Sports => "sports",
            Niche::News => "news",
            Niche::Entertainment => "entertainment",
            Niche::Custom(name) => name,
        }
    }
}

impl From<String> for Niche {
    fn from(raw: String) -> Self {
        let lower = raw.trim().to_lowercase();
        Niche::TOP
            .iter()
            .find(|n| n.as_str() == lower)
            .cloned()
            .unwrap_or(Niche::Custom(lower))
    }
}

impl From<&str> for Niche {
    fn from(raw: &str) -> Self {
        Niche::from(raw.to_string())
    }
}

impl From<Niche> for String {
    fn from(niche: Niche) -> Self {
        niche.as_str().to_string()
    }
}

impl Default for Niche {
    fn default() -> Self {
        Niche::Custom("general".to_string())
    }
}

impl fmt::Display for Niche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Posting destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    #[serde(rename = "tiktok")]
    TikTok,
    YoutubeShorts,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::TikTok,
        Platform::YoutubeShorts,
        Platform::Twitter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::YoutubeShorts => "youtube_shorts",
            Platform::Twitter => "twitter",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace('-', "_");
        match lower.as_str() {
            "instagram" | "ig" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::TikTok),
            "youtube_shorts" | "youtube" | "shorts" => Ok(Platform::YoutubeShorts),
            "twitter" | "x" => Ok(Platform::Twitter),
            other => Err(format!(
                "unknown platform '{}' (expected instagram, tiktok, youtube_shorts, twitter)",
                other
            )),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered content item being evaluated for posting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Niche,
    #[serde(default)]
    pub attributes: BTreeMap<String, u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl Candidate {
    pub fn new(identifier: &str, title: &str, description: &str, category: Niche) -> Self {
        Self {
            identifier: identifier.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category,
            ..Default::default()
        }
    }

    /// Lowercased `title + description`, the text every keyword rule runs against
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }

    pub fn attribute(&self, metric: &str) -> Option<u8> {
        self.attributes.get(metric).copied()
    }
}

/// Anything carrying an identity key for deduplication
pub trait Identified {
    /// `None` when the identity key is missing or blank
    fn identifier(&self) -> Option<&str>;
}

impl Identified for Candidate {
    fn identifier(&self) -> Option<&str> {
        let id = self.identifier.trim();
        if id.is_empty() {
            None
        } else {
            Some(self.identifier.as_str())
        }
    }
}

/// One rule's share of a candidate's score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: String,
    pub keyword: Option<String>,
    pub points: u32,
}

/// Candidate plus the score the scorer assigned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: u8,
    pub contributions: Vec<RuleContribution>,
    /// Position in the raw discovery list; breaks ranking ties
    pub discovery_index: usize,
}

impl ScoredCandidate {
    /// Build directly from a known score (used when scores come from upstream)
    pub fn with_score(candidate: Candidate, score: u8, discovery_index: usize) -> Self {
        Self {
            candidate,
            score: score.min(100),
            contributions: Vec::new(),
            discovery_index,
        }
    }

    /// Sum of all contributions before clamping
    pub fn raw_total(&self) -> u32 {
        self.contributions.iter().map(|c| c.points).sum()
    }
}

impl Identified for ScoredCandidate {
    fn identifier(&self) -> Option<&str> {
        self.candidate.identifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_niche_parsing_is_case_insensitive() {
        assert_eq!(Niche::from("Fitness"), Niche::Fitness);
        assert_eq!(Niche::from(" GAMING "), Niche::Gaming);
        assert_eq!(Niche::from("Pets"), Niche::Custom("pets".to_string()));
    }

    #[test]
    fn test_niche_serializes_as_name() {
        let json = serde_json::to_string(&Niche::Technology).unwrap();
        assert_eq!(json, "\"technology\"");
        let back: Niche = serde_json::from_str("\"woodworking\"").unwrap();
        assert_eq!(back, Niche::Custom("woodworking".to_string()));
    }

    #[test]
    fn test_platform_wire_names() {
        assert_eq!(serde_json::to_string(&Platform::TikTok).unwrap(), "\"tiktok\"");
        assert_eq!(
            serde_json::to_string(&Platform::YoutubeShorts).unwrap(),
            "\"youtube_shorts\""
        );
    }

    #[test]
    fn test_platform_from_str_aliases() {
        assert_eq!("youtube-shorts".parse::<Platform>(), Ok(Platform::YoutubeShorts));
        assert_eq!("TikTok".parse::<Platform>(), Ok(Platform::TikTok));
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn test_blank_identifier_is_missing() {
        let c = Candidate::new("   ", "t", "d", Niche::Comedy);
        assert!(c.identifier().is_none());
        let c = Candidate::new("https://a", "t", "d", Niche::Comedy);
        assert_eq!(c.identifier(), Some("https://a"));
    }

    #[test]
    fn test_candidate_missing_fields_deserialize_empty() {
        let c: Candidate = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert!(c.identifier.is_empty());
        assert!(c.description.is_empty());
        assert!(c.attributes.is_empty());
    }
}
