// SociaClip Slot Planner - Posting-Time Catalogs
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Builds the finite catalog of (time, platform) slots a selection run may
// use. Every number here comes from lookup tables: platform algorithm peaks,
// low-competition windows, niche audience habits and weekday/weekend viral
// windows. Nothing is learned or measured.

use crate::engine::candidate::{Niche, Platform};
use crate::engine::truncate_score;
use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Minutes after midnight, written as `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn hm(hour: u32, minute: u32) -> Self {
        Self(((hour % 24) * 60 + minute % 60) as u16)
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.0) / 60
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.0) % 60
    }

    pub fn minutes(&self) -> u32 {
        u32::from(self.0)
    }

    /// Distance within the same day; no wrap-around at midnight
    pub fn minutes_between(&self, other: &TimeOfDay) -> u32 {
        self.minutes().abs_diff(other.minutes())
    }

}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|e| format!("invalid time '{}' (expected HH:MM): {}", s, e))?;
        Ok(Self::hm(t.hour(), t.minute()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competition {
    Low,
    Medium,
    High,
}

impl Competition {
    fn points(&self) -> f64 {
        match self {
            Competition::Low => 10.0,
            Competition::Medium => 5.0,
            Competition::High => 0.0,
        }
    }
}

/// Which table proposed the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSource {
    Algorithm,
    LowCompetition,
    Audience,
    ViralWindow,
    Manual,
}

impl SlotSource {
    fn bonus(&self) -> f64 {
        match self {
            SlotSource::ViralWindow => 5.0,
            SlotSource::Audience => 4.0,
            SlotSource::Algorithm => 3.0,
            SlotSource::LowCompetition => 2.0,
            SlotSource::Manual => 0.0,
        }
    }
}

/// A (time, platform) pair available for a selected candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub time: TimeOfDay,
    pub platform: Platform,
    pub recommendation_score: u8,
    pub expected_engagement: f64,
    pub viral_multiplier: f64,
    pub audience_overlap: f64,
    pub competition: Competition,
    pub source: SlotSource,
}

impl Slot {
    /// Hand-made slot with neutral explainability fields
    pub fn new(time: TimeOfDay, platform: Platform, recommendation_score: u8) -> Self {
        Self {
            time,
            platform,
            recommendation_score: recommendation_score.min(100),
            expected_engagement: 0.5,
            viral_multiplier: 1.0,
            audience_overlap: 0.5,
            competition: Competition::Medium,
            source: SlotSource::Manual,
        }
    }
}

/// Finite slot list handed to the selector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotCatalog {
    slots: Vec<Slot>,
}

impl SlotCatalog {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn extend(&mut self, slots: impl IntoIterator<Item = Slot>) {
        self.slots.extend(slots);
    }

    pub fn for_platform(&self, platform: Platform) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(move |s| s.platform == platform)
    }
}

/// Per-platform algorithm timing tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformTiming {
    pub peak_times: Vec<TimeOfDay>,
    pub low_competition_times: Vec<TimeOfDay>,
    pub peak_hours: Vec<u32>,
    pub good_hours: Vec<u32>,
    pub viral_hours: Vec<u32>,
    /// Hours everyone posts at (audience overlap)
    pub crowded_hours: Vec<u32>,
    /// Hours with the most competing posts
    pub competitive_hours: Vec<u32>,
    /// Minutes of early engagement the algorithm rewards
    pub golden_window_minutes: u32,
}

fn times(list: &[u32]) -> Vec<TimeOfDay> {
    list.iter().map(|h| TimeOfDay::hm(*h, 0)).collect()
}

impl PlatformTiming {
    fn instagram() -> Self {
        Self {
            peak_times: times(&[11, 14, 17, 20]),
            low_competition_times: times(&[8, 10, 13, 16, 19]),
            peak_hours: vec![11, 14, 17, 20],
            good_hours: vec![8, 10, 13, 16, 19, 21],
            viral_hours: vec![11, 14, 17, 20],
            crowded_hours: vec![12, 18, 20],
            competitive_hours: vec![12, 17, 18, 20],
            golden_window_minutes: 60,
        }
    }

    fn tiktok() -> Self {
        Self {
            peak_times: times(&[18, 19, 20, 21, 22]),
            low_competition_times: times(&[15, 17, 23]),
            peak_hours: vec![18, 19, 20, 21, 22],
            good_hours: vec![15, 16, 17, 23],
            viral_hours: vec![18, 19, 20, 21],
            crowded_hours: vec![19, 20, 21],
            competitive_hours: vec![19, 20, 21],
            golden_window_minutes: 120,
        }
    }

    fn youtube_shorts() -> Self {
        Self {
            peak_times: times(&[14, 16, 18, 20]),
            low_competition_times: times(&[10, 12, 15, 17]),
            peak_hours: vec![14, 16, 18, 20],
            good_hours: vec![10, 12, 15, 17, 19, 21],
            viral_hours: vec![16, 18, 20],
            crowded_hours: vec![18, 20],
            competitive_hours: vec![18, 20],
            golden_window_minutes: 180,
        }
    }

    fn twitter() -> Self {
        Self {
            peak_times: times(&[9, 12, 15, 18]),
            low_competition_times: times(&[10, 11, 14, 16]),
            peak_hours: vec![9, 12, 15, 18],
            good_hours: vec![8, 10, 11, 13, 14, 16, 17, 19],
            viral_hours: vec![12, 15, 18],
            crowded_hours: vec![12, 18],
            competitive_hours: vec![12, 15, 18],
            golden_window_minutes: 30,
        }
    }
}

/// When a niche's audience is scrolling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceWindow {
    pub label: String,
    pub times: Vec<TimeOfDay>,
    pub engagement_multiplier: f64,
}

impl AudienceWindow {
    fn new(label: &str, hours: &[u32], engagement_multiplier: f64) -> Self {
        Self {
            label: label.to_string(),
            times: times(hours),
            engagement_multiplier,
        }
    }
}

/// Hour range (inclusive) with an elevated viral multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub multiplier: f64,
    pub reason: String,
}

impl ViralWindow {
    fn new(start_hour: u32, end_hour: u32, multiplier: f64, reason: &str) -> Self {
        Self {
            start_hour,
            end_hour,
            multiplier,
            reason: reason.to_string(),
        }
    }

    /// `HH:00` for every hour and `HH:30` for every hour but the last
    pub fn times(&self) -> Vec<TimeOfDay> {
        let mut out = Vec::new();
        for hour in self.start_hour..=self.end_hour {
            out.push(TimeOfDay::hm(hour, 0));
            if hour < self.end_hour {
                out.push(TimeOfDay::hm(hour, 30));
            }
        }
        out
    }
}

/// Niche engagement boost per part of the day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodBoost {
    pub morning: f64,
    pub midday: f64,
    pub evening: f64,
    pub night: f64,
}

impl Default for PeriodBoost {
    fn default() -> Self {
        Self {
            morning: 1.0,
            midday: 1.0,
            evening: 1.0,
            night: 1.0,
        }
    }
}

impl PeriodBoost {
    fn for_hour(&self, hour: u32) -> f64 {
        match hour {
            6..=11 => self.morning,
            12..=16 => self.midday,
            17..=20 => self.evening,
            _ => self.night,
        }
    }
}

fn fitness_audience() -> Vec<AudienceWindow> {
    vec![
        AudienceWindow::new("morning_motivation", &[6, 7, 8], 1.4),
        AudienceWindow::new("lunch_break", &[12, 13], 1.2),
        AudienceWindow::new("evening_workout", &[17, 18, 19], 1.6),
        AudienceWindow::new("night_inspiration", &[21, 22], 1.3),
    ]
}

/// Every table the slot planner reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingTables {
    pub platforms: BTreeMap<Platform, PlatformTiming>,
    pub audience: BTreeMap<Niche, Vec<AudienceWindow>>,
    /// Windows for niches missing from `audience`
    #[serde(default = "fitness_audience")]
    pub default_audience: Vec<AudienceWindow>,
    pub weekday_viral_windows: Vec<ViralWindow>,
    pub weekend_viral_windows: Vec<ViralWindow>,
    pub period_boost: BTreeMap<Niche, PeriodBoost>,
    pub max_slot_options: usize,
}

impl Default for SchedulingTables {
    fn default() -> Self {
        let platforms = BTreeMap::from([
            (Platform::Instagram, PlatformTiming::instagram()),
            (Platform::TikTok, PlatformTiming::tiktok()),
            (Platform::YoutubeShorts, PlatformTiming::youtube_shorts()),
            (Platform::Twitter, PlatformTiming::twitter()),
        ]);

        let audience = BTreeMap::from([
            (Niche::Fitness, fitness_audience()),
            (
                Niche::Business,
                vec![
                    AudienceWindow::new("morning_productivity", &[7, 8, 9], 1.5),
                    AudienceWindow::new("midday_break", &[12, 13, 14], 1.3),
                    AudienceWindow::new("evening_learning", &[19, 20, 21], 1.4),
                ],
            ),
            (
                Niche::Technology,
                vec![
                    AudienceWindow::new("morning_news", &[8, 9], 1.3),
                    AudienceWindow::new("afternoon_reviews", &[15, 16, 17], 1.4),
                    AudienceWindow::new("evening_tutorials", &[20, 21, 22], 1.2),
                ],
            ),
        ]);

        let period_boost = BTreeMap::from([
            (
                Niche::Fitness,
                PeriodBoost { morning: 1.2, midday: 1.0, evening: 1.3, night: 1.1 },
            ),
            (
                Niche::Business,
                PeriodBoost { morning: 1.4, midday: 1.2, evening: 1.1, night: 1.0 },
            ),
            (
                Niche::Technology,
                PeriodBoost { morning: 1.1, midday: 1.3, evening: 1.2, night: 1.0 },
            ),
        ]);

        Self {
            platforms,
            audience,
            default_audience: fitness_audience(),
            weekday_viral_windows: vec![
                ViralWindow::new(11, 13, 1.4, "Lunch scroll sessions"),
                ViralWindow::new(17, 19, 1.6, "Post-work entertainment"),
                ViralWindow::new(20, 22, 1.8, "Prime entertainment hours"),
            ],
            weekend_viral_windows: vec![
                ViralWindow::new(10, 12, 1.3, "Weekend morning leisure"),
                ViralWindow::new(14, 16, 1.5, "Afternoon browsing"),
                ViralWindow::new(19, 23, 2.0, "Weekend entertainment peak"),
            ],
            period_boost,
            max_slot_options: 10,
        }
    }
}

/// Turns the scheduling tables into ranked slot options
#[derive(Debug, Clone, Default)]
pub struct SlotPlanner {
    tables: SchedulingTables,
}

impl SlotPlanner {
    pub fn new(tables: SchedulingTables) -> Self {
        Self { tables }
    }

    fn timing(&self, platform: Platform) -> Option<&PlatformTiming> {
        self.tables
            .platforms
            .get(&platform)
            .or_else(|| self.tables.platforms.get(&Platform::Instagram))
    }

    pub fn golden_window_minutes(&self, platform: Platform) -> u32 {
        self.timing(platform)
            .map(|t| t.golden_window_minutes)
            .unwrap_or(60)
    }

    pub fn viral_windows(&self, weekday: Weekday) -> &[ViralWindow] {
        match weekday {
            Weekday::Sat | Weekday::Sun => &self.tables.weekend_viral_windows,
            _ => &self.tables.weekday_viral_windows,
        }
    }

    /// Best slot options for one platform, highest recommendation first
    pub fn options(
        &self,
        platform: Platform,
        niche: &Niche,
        viral_score: u8,
        weekday: Weekday,
    ) -> Vec<Slot> {
        let Some(timing) = self.timing(platform) else {
            return Vec::new();
        };

        let mut proposals: Vec<Slot> = Vec::new();

        for t in &timing.peak_times {
            proposals.push(self.build_slot(*t, platform, niche, viral_score, SlotSource::Algorithm, 1.0, 1.0));
        }
        for t in &timing.low_competition_times {
            proposals.push(self.build_slot(*t, platform, niche, viral_score, SlotSource::LowCompetition, 1.0, 1.0));
        }
        let windows = self
            .tables
            .audience
            .get(niche)
            .unwrap_or(&self.tables.default_audience);
        for window in windows {
            for t in &window.times {
                proposals.push(self.build_slot(
                    *t,
                    platform,
                    niche,
                    viral_score,
                    SlotSource::Audience,
                    window.engagement_multiplier,
                    1.0,
                ));
            }
        }
        for window in self.viral_windows(weekday) {
            for t in window.times() {
                proposals.push(self.build_slot(
                    t,
                    platform,
                    niche,
                    viral_score,
                    SlotSource::ViralWindow,
                    1.0,
                    window.multiplier,
                ));
            }
        }

        // Same time proposed twice: keep the better one (first wins ties)
        let mut best: BTreeMap<TimeOfDay, Slot> = BTreeMap::new();
        for slot in proposals {
            match best.get(&slot.time) {
                Some(existing) if existing.recommendation_score >= slot.recommendation_score => {}
                _ => {
                    best.insert(slot.time, slot);
                }
            }
        }

        // BTreeMap yields ascending time, so the stable sort breaks ties by time
        let mut slots: Vec<Slot> = best.into_values().collect();
        slots.sort_by(|a, b| b.recommendation_score.cmp(&a.recommendation_score));
        slots.truncate(self.tables.max_slot_options);

        debug!(
            "[SLOTS] {} options for {} / {} (viral {})",
            slots.len(),
            platform,
            niche,
            viral_score
        );
        slots
    }

    /// Union of the options of every platform
    pub fn catalog(
        &self,
        platforms: &[Platform],
        niche: &Niche,
        viral_score: u8,
        weekday: Weekday,
    ) -> SlotCatalog {
        let mut catalog = SlotCatalog::default();
        for platform in platforms {
            catalog.extend(self.options(*platform, niche, viral_score, weekday));
        }
        catalog
    }

    #[allow(clippy::too_many_arguments)]
    fn build_slot(
        &self,
        time: TimeOfDay,
        platform: Platform,
        niche: &Niche,
        viral_score: u8,
        source: SlotSource,
        engagement_multiplier: f64,
        window_multiplier: f64,
    ) -> Slot {
        let hour = time.hour();
        let base_engagement = self.base_engagement(hour, platform, niche);
        let base_viral = self.viral_multiplier(viral_score, hour, platform);
        let audience_overlap = self.audience_overlap(hour, platform);
        let competition = self.competition(hour, platform);

        // Window multipliers only annotate the slot; the score uses the base values
        let raw = base_engagement * 40.0
            + (base_viral - 1.0) * 30.0
            + (1.0 - audience_overlap) * 20.0
            + competition.points()
            + source.bonus();

        Slot {
            time,
            platform,
            recommendation_score: truncate_score(raw),
            expected_engagement: base_engagement * engagement_multiplier,
            viral_multiplier: base_viral * window_multiplier,
            audience_overlap,
            competition,
            source,
        }
    }

    fn base_engagement(&self, hour: u32, platform: Platform, niche: &Niche) -> f64 {
        let base = match self.timing(platform) {
            Some(t) if t.peak_hours.contains(&hour) => 0.9,
            Some(t) if t.good_hours.contains(&hour) => 0.7,
            _ => 0.4,
        };
        let boost = self
            .tables
            .period_boost
            .get(niche)
            .copied()
            .unwrap_or_default()
            .for_hour(hour);
        base * boost
    }

    fn viral_multiplier(&self, viral_score: u8, hour: u32, platform: Platform) -> f64 {
        let base = match viral_score {
            71..=u8::MAX => 1.8,
            51..=70 => 1.4,
            31..=50 => 1.2,
            _ => 1.0,
        };
        let time_boost = match self.timing(platform) {
            Some(t) if t.viral_hours.contains(&hour) => 1.3,
            _ => 1.0,
        };
        base * time_boost
    }

    fn audience_overlap(&self, hour: u32, platform: Platform) -> f64 {
        let crowded = self.timing(platform).map(|t| t.crowded_hours.as_slice()).unwrap_or(&[]);
        if crowded.contains(&hour) {
            0.8
        } else if crowded.iter().any(|h| h.abs_diff(hour) == 1) {
            0.6
        } else {
            0.3
        }
    }

    fn competition(&self, hour: u32, platform: Platform) -> Competition {
        let busy = self
            .timing(platform)
            .map(|t| t.competitive_hours.as_slice())
            .unwrap_or(&[]);
        if busy.contains(&hour) {
            Competition::High
        } else if busy.iter().any(|h| h.abs_diff(hour) <= 1) {
            Competition::Medium
        } else {
            Competition::Low
        }
    }
}
