// SociaClip Content Writer
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Caption and hashtag generation from static tables. The viral score picks a
// hook tier and a content strategy; the body is built around concepts found
// in the video's own title and description. Hashtag sets are sized to the
// platform's sweet spot and the finished copy gets an optimization score.

use crate::config::{profile_for, PlatformProfile, SociaConfig};
use crate::engine::candidate::{Candidate, Niche, Platform};
use crate::engine::random::{choose, RandomSource};
use crate::engine::scorer::KeywordGroup;
use crate::engine::template::{render, truncate, FormatError, TemplateBook};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Hashtags keyed by viral tier (>70, >50, otherwise)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralTierTags {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl ViralTierTags {
    pub fn for_score(&self, viral_score: u8) -> &[String] {
        match viral_score {
            71..=u8::MAX => &self.high,
            51..=70 => &self.medium,
            _ => &self.low,
        }
    }
}

/// Hooks keyed by intensity; the tier follows the viral score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookTiers {
    pub low: Vec<String>,
    pub medium: Vec<String>,
    pub high: Vec<String>,
}

impl HookTiers {
    fn new(low: &[&str], medium: &[&str], high: &[&str]) -> Self {
        Self {
            low: strings(low),
            medium: strings(medium),
            high: strings(high),
        }
    }

    /// >60 high, >30 medium, otherwise low; an empty tier falls back to medium
    pub fn for_score(&self, viral_score: u8) -> &[String] {
        let tier = match viral_score {
            61..=u8::MAX => &self.high,
            31..=60 => &self.medium,
            _ => &self.low,
        };
        if tier.is_empty() {
            &self.medium
        } else {
            tier
        }
    }
}

/// How the body of a caption is pitched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStrategy {
    ViralFocused,
    Educational,
    Storytelling,
}

impl ContentStrategy {
    /// Viral above 70; teaching for business and fitness on the long-form
    /// feeds; a story for everything else
    pub fn select(viral_score: u8, platform: Platform, niche: &Niche) -> Self {
        if viral_score > 70 {
            ContentStrategy::ViralFocused
        } else if matches!(platform, Platform::YoutubeShorts | Platform::Instagram)
            && matches!(niche, Niche::Business | Niche::Fitness)
        {
            ContentStrategy::Educational
        } else {
            ContentStrategy::Storytelling
        }
    }

    /// Template ids in the template book, one picked per post
    pub fn template_ids(&self) -> [&'static str; 3] {
        match self {
            ContentStrategy::ViralFocused => ["strategy.viral.1", "strategy.viral.2", "strategy.viral.3"],
            ContentStrategy::Educational => [
                "strategy.educational.1",
                "strategy.educational.2",
                "strategy.educational.3",
            ],
            ContentStrategy::Storytelling => [
                "strategy.story.1",
                "strategy.story.2",
                "strategy.story.3",
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStrategy::ViralFocused => "viral_focused",
            ContentStrategy::Educational => "educational",
            ContentStrategy::Storytelling => "storytelling",
        }
    }
}

impl std::fmt::Display for ContentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phrase tables the writer draws from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterTables {
    pub hooks: BTreeMap<Niche, HookTiers>,
    pub default_hooks: HookTiers,
    /// Niche concepts looked for in a video's title and description
    pub key_concepts: BTreeMap<Niche, Vec<String>>,
    pub ctas: BTreeMap<Platform, Vec<String>>,
    pub niche_hashtags: BTreeMap<Niche, Vec<String>>,
    pub default_hashtags: Vec<String>,
    pub trending_hashtags: Vec<String>,
    pub platform_hashtags: BTreeMap<Platform, Vec<String>>,
    pub viral_tier_hashtags: ViralTierTags,
    /// Word groups feeding the hook-effectiveness score
    pub hook_triggers: Vec<KeywordGroup>,
    pub engaging_emojis: Vec<String>,
    pub viral_trigger_words: Vec<String>,
}

impl Default for WriterTables {
    fn default() -> Self {
        let hooks = BTreeMap::from([
            (
                Niche::Fitness,
                HookTiers::new(
                    &[
                        "Here's a simple fitness tip:",
                        "Small change, big results:",
                        "This workout tip helped me:",
                    ],
                    &[
                        "🔥 This fitness hack changed my routine:",
                        "💪 The workout secret that actually works:",
                        "⚡ This one move targets everything:",
                    ],
                    &[
                        "🚨 FITNESS TRAINERS HATE THIS TRICK:",
                        "💀 This workout DESTROYED me (in the best way):",
                        "🔥 GOING VIRAL: The 30-second move that changed everything:",
                        "⚡ MILLION VIEWS: This technique is INSANE:",
                    ],
                ),
            ),
            (
                Niche::Business,
                HookTiers::new(
                    &["Business insight for today:", "Here's what I learned:", "Quick business tip:"],
                    &[
                        "💰 The business strategy that's working:",
                        "📈 How I 10x'd my productivity:",
                        "🧠 The mindset shift that changed everything:",
                    ],
                    &[
                        "🚨 MILLIONAIRES DON'T WANT YOU TO KNOW THIS:",
                        "💸 I made $100k with this ONE strategy:",
                        "🔥 VIRAL BUSINESS HACK: How I automated everything:",
                        "⚡ THE SECRET: Why 99% of entrepreneurs fail:",
                    ],
                ),
            ),
            (
                Niche::Technology,
                HookTiers::new(
                    &["Cool tech discovery:", "This app changed my workflow:", "Tech tip of the day:"],
                    &[
                        "🤖 This AI tool is incredible:",
                        "📱 The app that saves me 5 hours/week:",
                        "⚡ Technology hack that's a game-changer:",
                    ],
                    &[
                        "🚨 AI JUST BROKE THE INTERNET:",
                        "🤯 THIS TECHNOLOGY WILL CHANGE EVERYTHING:",
                        "🔥 VIRAL TECH: The future is happening NOW:",
                        "⚡ MILLIONS WATCHING: This AI can do WHAT?!",
                    ],
                ),
            ),
            (
                Niche::Comedy,
                HookTiers::new(
                    &["This made me chuckle:", "Relatable moment:", "Daily dose of humor:"],
                    &[
                        "😂 This is too accurate:",
                        "💀 Why is this so true?",
                        "🤣 The relatability is unreal:",
                    ],
                    &[
                        "😭 I'M SCREAMING - this is TOO REAL:",
                        "💀 DEATH BY LAUGHTER - I can't breathe:",
                        "🤣 VIRAL COMEDY GOLD - 10M views and counting:",
                        "😂 EVERYONE'S SHARING THIS - you'll die laughing:",
                    ],
                ),
            ),
        ]);

        let key_concepts = BTreeMap::from([
            (
                Niche::Fitness,
                strings(&["form", "progressive overload", "recovery", "nutrition", "consistency"]),
            ),
            (
                Niche::Business,
                strings(&["scaling", "automation", "revenue", "productivity", "systems"]),
            ),
            (
                Niche::Technology,
                strings(&["innovation", "disruption", "efficiency", "automation", "integration"]),
            ),
        ]);

        let ctas = BTreeMap::from([
            (
                Platform::Instagram,
                strings(&[
                    "Double tap if you agree! 💫\nWhat's your take? Drop it in the comments! 👇",
                    "Save this for later! 📌\nTag someone who needs to see this! 👀",
                    "Hit that follow for more {niche} content! ✨",
                ]),
            ),
            (
                Platform::TikTok,
                strings(&["Follow for more! ✨", "What's your take? 👇", "Share if this helped! 🔥"]),
            ),
            (
                Platform::YoutubeShorts,
                strings(&[
                    "Subscribe for more {niche} content! 🔔",
                    "Like if this was helpful! 👍\nWhat should I cover next?",
                    "Turn on notifications for more! ⚡",
                ]),
            ),
            (
                Platform::Twitter,
                strings(&["Thoughts? 🤔", "RT if you agree! 🔄", "What's your experience? 👇"]),
            ),
        ]);

        let niche_hashtags = BTreeMap::from([
            (
                Niche::Fitness,
                strings(&["#fitness", "#workout", "#gym", "#health", "#fitnessmotivation", "#exercise"]),
            ),
            (
                Niche::Business,
                strings(&["#business", "#entrepreneur", "#success", "#mindset", "#hustle", "#startup"]),
            ),
            (
                Niche::Comedy,
                strings(&["#comedy", "#funny", "#humor", "#memes", "#lol", "#jokes"]),
            ),
            (
                Niche::Technology,
                strings(&["#tech", "#technology", "#innovation", "#ai", "#future", "#digital"]),
            ),
        ]);

        let platform_hashtags = BTreeMap::from([
            (Platform::Instagram, strings(&["#reels", "#instagram", "#insta"])),
            (Platform::TikTok, strings(&["#fyp", "#foryou", "#tiktok"])),
            (Platform::YoutubeShorts, strings(&["#shorts", "#youtube"])),
            (Platform::Twitter, strings(&["#twitter", "#thread"])),
        ]);

        Self {
            hooks,
            default_hooks: HookTiers::new(
                &["Worth a look:", "Here's something interesting:", "Quick one for today:"],
                &["⚡ You need to see this:", "💯 This hits different:", "🎯 Pay attention to this:"],
                &[
                    "🔥 This is going viral for a reason!",
                    "🚀 Game changer alert:",
                    "🚨 EVERYONE'S WATCHING THIS:",
                ],
            ),
            key_concepts,
            ctas,
            niche_hashtags,
            default_hashtags: strings(&["#viral", "#trending", "#content"]),
            trending_hashtags: strings(&["#viral", "#trending", "#fyp", "#explore", "#reels", "#shorts"]),
            platform_hashtags,
            viral_tier_hashtags: ViralTierTags {
                high: strings(&["#viral", "#trending", "#exploding"]),
                medium: strings(&["#trending", "#popular", "#hot"]),
                low: strings(&["#discover", "#new", "#fresh"]),
            },
            hook_triggers: vec![
                KeywordGroup::per_keyword("urgency", 5, &["now", "today", "immediately", "urgent", "breaking", "alert"]),
                KeywordGroup::per_keyword("curiosity", 8, &["secret", "hack", "trick", "revealed", "nobody knows", "hidden"]),
                KeywordGroup::per_keyword("social_proof", 6, &["everyone", "viral", "trending", "millions", "thousands"]),
                KeywordGroup::per_keyword("emotion", 4, &["amazing", "incredible", "shocking", "unbelievable", "insane"]),
            ],
            engaging_emojis: strings(&["🔥", "💪", "⚡", "🚀", "💎"]),
            viral_trigger_words: strings(&["secret", "hack", "viral", "amazing"]),
        }
    }
}

/// Finished copy for one post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostCopy {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub optimization_score: u8,
    pub strategy: ContentStrategy,
}

impl PostCopy {
    /// Caption followed by the hashtag line
    pub fn full_post(&self) -> String {
        if self.hashtags.is_empty() {
            self.caption.clone()
        } else {
            format!("{}\n\n{}", self.caption, self.hashtags.join(" "))
        }
    }
}

/// Emoji in the pictograph, emoticon, transport and flag blocks
fn is_scored_emoji(c: char) -> bool {
    matches!(c as u32,
        0x1F600..=0x1F64F | 0x1F300..=0x1F5FF | 0x1F680..=0x1F6FF | 0x1F1E0..=0x1F1FF)
}

/// Keep the first `limit` chars and append `marker` when the text is longer
fn clip(text: String, limit: usize, marker: &str) -> String {
    if text.chars().count() <= limit {
        return text;
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push_str(marker);
    cut
}

#[derive(Debug, Clone)]
pub struct ContentWriter {
    tables: WriterTables,
    templates: TemplateBook,
    profiles: BTreeMap<Platform, PlatformProfile>,
}

impl ContentWriter {
    pub fn new(
        tables: WriterTables,
        templates: TemplateBook,
        profiles: BTreeMap<Platform, PlatformProfile>,
    ) -> Self {
        Self {
            tables,
            templates,
            profiles,
        }
    }

    pub fn from_config(config: &SociaConfig) -> Self {
        Self::new(
            config.writer.clone(),
            config.templates.clone(),
            config.platform_profiles.clone(),
        )
    }

    fn hooks_for(&self, niche: &Niche, viral_score: u8) -> &[String] {
        self.tables
            .hooks
            .get(niche)
            .unwrap_or(&self.tables.default_hooks)
            .for_score(viral_score)
    }

    /// Random hook from the niche's intensity tier, tuned for the platform
    pub fn hook(
        &self,
        niche: &Niche,
        platform: Platform,
        viral_score: u8,
        rng: &mut dyn RandomSource,
    ) -> String {
        let mut hook = choose(rng, self.hooks_for(niche, viral_score))
            .cloned()
            .unwrap_or_default();
        match platform {
            Platform::TikTok if !hook.starts_with('🚨') => hook = format!("⚡ {}", hook),
            Platform::Instagram if hook.chars().count() < 50 => hook.push_str(" Let me explain..."),
            _ => {}
        }
        hook
    }

    /// Generate `count` hooks and keep the most effective; first wins ties
    pub fn best_hook(
        &self,
        niche: &Niche,
        platform: Platform,
        viral_score: u8,
        count: usize,
        rng: &mut dyn RandomSource,
    ) -> String {
        let mut best: Option<(u32, String)> = None;
        for _ in 0..count.max(1) {
            let hook = self.hook(niche, platform, viral_score, rng);
            let score = self.score_hook(&hook);
            match &best {
                Some((top, _)) if *top >= score => {}
                _ => best = Some((score, hook)),
            }
        }
        best.map(|(_, h)| h).unwrap_or_default()
    }

    /// Trigger words, emoji count and length sweet spot
    pub fn score_hook(&self, hook: &str) -> u32 {
        let lower = hook.to_lowercase();
        let mut score: u32 = self
            .tables
            .hook_triggers
            .iter()
            .map(|group| {
                let hits = group
                    .keywords
                    .iter()
                    .filter(|w| !w.is_empty() && lower.contains(w.as_str()))
                    .count() as u32;
                if group.once {
                    group.points * hits.min(1)
                } else {
                    group.points * hits
                }
            })
            .sum();

        score += hook.chars().filter(|c| is_scored_emoji(*c)).count() as u32 * 3;

        let len = hook.chars().count();
        if len > 30 && len < 80 {
            score += 5;
        }
        score
    }

    /// Niche concepts mentioned in the candidate's title or description, in table order
    pub fn key_concepts(&self, candidate: &Candidate) -> Vec<String> {
        let text = format!("{} {}", candidate.title, candidate.description).to_lowercase();
        self.tables
            .key_concepts
            .get(&candidate.category)
            .map(|concepts| {
                concepts
                    .iter()
                    .filter(|c| !c.is_empty() && text.contains(&c.to_lowercase()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Caption body pitched by `strategy` around one of the candidate's concepts
    pub fn main_content(
        &self,
        candidate: &Candidate,
        platform: Platform,
        strategy: ContentStrategy,
        rng: &mut dyn RandomSource,
    ) -> Result<String, FormatError> {
        let niche = candidate.category.to_string();
        let concepts = self.key_concepts(candidate);
        let fallback = match strategy {
            ContentStrategy::ViralFocused => "technique".to_string(),
            _ => niche.clone(),
        };
        let concept = choose(rng, &concepts).cloned().unwrap_or(fallback);

        let mut vars = HashMap::from([("niche", niche.clone()), ("concept", concept.clone())]);
        match strategy {
            ContentStrategy::Educational => {
                vars.insert("insight", format!("the key insight from this {} content", niche));
                vars.insert("solution", format!("applying this {} strategy correctly", concept));
                vars.insert("reason", format!("it addresses the core {} challenge", niche));
            }
            ContentStrategy::Storytelling => {
                vars.insert("insight", format!("the real {} secret", concept));
                vars.insert("solution", format!("this {} method", concept));
                vars.insert("challenge", format!("{} challenges", niche));
                vars.insert("outcome", "incredible transformation".to_string());
            }
            ContentStrategy::ViralFocused => {
                vars.insert("insight", format!("the game-changing {}", concept));
            }
        }

        let ids = strategy.template_ids();
        let id = choose(rng, &ids).copied().unwrap_or(ids[0]);
        let content = self.templates.format(id, &vars)?;

        Ok(match platform {
            Platform::Twitter => clip(content, 180, "... (thread below) 🧵"),
            Platform::TikTok => clip(content, 100, "..."),
            _ => content,
        })
    }

    pub fn cta(
        &self,
        platform: Platform,
        niche: &Niche,
        rng: &mut dyn RandomSource,
    ) -> Result<String, FormatError> {
        let options = self
            .tables
            .ctas
            .get(&platform)
            .or_else(|| self.tables.ctas.get(&Platform::Instagram))
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        match choose(rng, options) {
            Some(cta) => render(cta, &HashMap::from([("niche", niche.to_string())])),
            None => Ok(String::new()),
        }
    }

    /// `hook\n\ncontent\n\ncta`, truncated to the platform's limit
    pub fn caption(
        &self,
        candidate: &Candidate,
        platform: Platform,
        viral_score: u8,
        strategy: ContentStrategy,
        rng: &mut dyn RandomSource,
    ) -> Result<String, FormatError> {
        let niche = &candidate.category;
        let hook = self.best_hook(niche, platform, viral_score, 3, rng);
        let content = self.main_content(candidate, platform, strategy, rng)?;
        let cta = self.cta(platform, niche, rng)?;
        let caption = format!("{}\n\n{}\n\n{}", hook, content, cta);
        Ok(truncate(&caption, profile_for(&self.profiles, platform).max_caption_length))
    }

    pub fn hashtags(
        &self,
        niche: &Niche,
        platform: Platform,
        viral_score: u8,
        rng: &mut dyn RandomSource,
    ) -> Vec<String> {
        let niche_tags = self
            .tables
            .niche_hashtags
            .get(niche)
            .unwrap_or(&self.tables.default_hashtags);
        let platform_tags = self
            .tables
            .platform_hashtags
            .get(&platform)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        let mut seen = HashSet::new();
        let unique: Vec<String> = niche_tags
            .iter()
            .chain(self.tables.trending_hashtags.iter())
            .chain(platform_tags.iter())
            .chain(self.tables.viral_tier_hashtags.for_score(viral_score).iter())
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect();

        let range = profile_for(&self.profiles, platform).optimal_hashtags;
        let count = rng.range_inclusive(range.min, range.max);
        unique.into_iter().take(count).collect()
    }

    /// 0-100 score for finished copy
    pub fn optimization_score(
        &self,
        caption: &str,
        hashtags: &[String],
        platform: Platform,
        viral_score: u8,
    ) -> u8 {
        let mut score: u32 = 0;
        let lower = caption.to_lowercase();

        if caption.chars().count() > 50 {
            score += 10;
        }
        if self.tables.engaging_emojis.iter().any(|e| caption.contains(e.as_str())) {
            score += 5;
        }
        if caption.contains('?') {
            score += 5;
        }
        if self.tables.viral_trigger_words.iter().any(|w| lower.contains(w.as_str())) {
            score += 10;
        }
        if caption.matches('\n').count() >= 2 {
            score += 5;
        }
        if caption.split_whitespace().count() >= 15 {
            score += 5;
        }

        if profile_for(&self.profiles, platform)
            .optimal_hashtags
            .contains(hashtags.len())
        {
            score += 15;
        }
        if hashtags.iter().any(|t| t.contains("#viral") || t.contains("#trending")) {
            score += 10;
        }
        if hashtags.iter().any(|t| t.contains("#fyp") || t.contains("#explore")) {
            score += 5;
        }

        score += match viral_score {
            71..=u8::MAX => 30,
            51..=70 => 20,
            31..=50 => 10,
            _ => 0,
        };

        score.min(100) as u8
    }

    /// Strategy, caption, hashtags and optimization score for one candidate
    pub fn write_post(
        &self,
        candidate: &Candidate,
        platform: Platform,
        viral_score: u8,
        rng: &mut dyn RandomSource,
    ) -> Result<PostCopy, FormatError> {
        let niche = &candidate.category;
        let strategy = ContentStrategy::select(viral_score, platform, niche);
        let caption = self.caption(candidate, platform, viral_score, strategy, rng)?;
        let hashtags = self.hashtags(niche, platform, viral_score, rng);
        let optimization_score = self.optimization_score(&caption, &hashtags, platform, viral_score);
        debug!(
            "[WRITER] {} / {} ({}): {} chars, {} tags, optimization {}",
            niche,
            platform,
            strategy,
            caption.chars().count(),
            hashtags.len(),
            optimization_score
        );
        Ok(PostCopy {
            caption,
            hashtags,
            optimization_score,
            strategy,
        })
    }
}

impl Default for ContentWriter {
    fn default() -> Self {
        Self::from_config(&SociaConfig::default())
    }
}
