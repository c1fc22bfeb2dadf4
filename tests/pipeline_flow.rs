use chrono::Weekday;
use sociaclip_core::agent::exporter::{export_plan, ExportDocument};
use sociaclip_core::agent::pipeline::ContentPipeline;
use sociaclip_core::engine::candidate::{Candidate, Niche, Platform};
use sociaclip_core::engine::random::SeededRandom;
use sociaclip_core::engine::selector::DiversityKey;
use sociaclip_core::SociaConfig;
use std::collections::HashSet;
use std::fs;

fn discovered() -> Vec<Candidate> {
    vec![
        Candidate::new("https://youtube.com/watch?v=f1", "Viral fitness transformation on YouTube", "millions of views", Niche::Fitness),
        Candidate::new("https://youtube.com/watch?v=f2", "Insane gym workout trending", "", Niche::Fitness),
        Candidate::new("https://tiktok.com/@b/1", "Startup founder goes viral", "business lessons today", Niche::Business),
        Candidate::new("https://tiktok.com/@t/2", "Epic tech gadget breaking news", "technology on tiktok", Niche::Technology),
        Candidate::new("https://youtube.com/watch?v=c1", "Funny prank compilation", "comedy gone viral", Niche::Comedy),
        Candidate::new("https://youtube.com/watch?v=f1", "Duplicate upload", "", Niche::Fitness),
        Candidate::new("", "No url at all viral trending", "", Niche::Fitness),
        Candidate::new("https://example.com/quiet", "A calm afternoon", "", Niche::Food),
    ]
}

#[test]
fn test_plan_respects_quota_gap_and_diversity() {
    let mut config = SociaConfig::default();
    config.posts_per_day = 4;
    config.scheduling.diversity = Some(DiversityKey::Niche);
    let gap = config.scheduling.min_gap_minutes;

    let pipeline = ContentPipeline::new(config);
    let report = pipeline
        .plan(discovered(), Weekday::Thu, &mut SeededRandom::new(1))
        .unwrap();

    assert_eq!(report.discovery.total_discovered, 8);
    assert_eq!(report.discovery.unique, 6);
    assert!(report.posts.len() <= 4);
    assert!(!report.posts.is_empty());

    // First pass covers every qualified niche before repeating one
    let niches: HashSet<_> = report
        .posts
        .iter()
        .map(|p| p.candidate().category.clone())
        .collect();
    assert_eq!(niches.len(), report.posts.len());

    for (i, a) in report.posts.iter().enumerate() {
        for b in report.posts.iter().skip(i + 1) {
            if a.platform() == b.platform() {
                assert!(a.slot().time.minutes_between(&b.slot().time) >= gap);
            }
        }
    }

    for post in &report.posts {
        let copy = post.copy.as_ref().unwrap();
        let limit = pipeline.config().profile(post.platform()).max_caption_length;
        assert!(copy.caption.chars().count() <= limit);
        assert!(post.viral_score() >= 30);
    }
}

#[test]
fn test_same_seed_same_plan() {
    let pipeline = ContentPipeline::new(SociaConfig::default());
    let a = pipeline.plan(discovered(), Weekday::Sun, &mut SeededRandom::new(77)).unwrap();
    let b = pipeline.plan(discovered(), Weekday::Sun, &mut SeededRandom::new(77)).unwrap();
    assert_eq!(a.posts, b.posts);
}

#[test]
fn test_single_platform_plan() {
    let mut config = SociaConfig::default();
    config.platforms = vec![Platform::Twitter];
    let pipeline = ContentPipeline::new(config);
    let report = pipeline.plan(discovered(), Weekday::Mon, &mut SeededRandom::new(5)).unwrap();
    assert!(report.posts.iter().all(|p| p.platform() == Platform::Twitter));
    for post in &report.posts {
        assert!(post.copy.as_ref().unwrap().caption.chars().count() <= 280);
    }
}

#[test]
fn test_export_round_trip_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = ContentPipeline::new(SociaConfig::default());
    let report = pipeline.plan(discovered(), Weekday::Fri, &mut SeededRandom::new(3)).unwrap();

    let path = export_plan(&report, dir.path()).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("sociaclip_plan_"));
    assert!(name.ends_with(".json"));

    let doc: ExportDocument = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc.posts.len(), report.posts.len());
    for record in &doc.posts {
        assert_eq!(record.scheduled_time.len(), 5);
        assert!(!record.caption.is_empty());
    }
}
