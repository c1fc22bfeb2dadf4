// SociaClip Main Entry Point
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use sociaclip_core::agent::exporter::export_plan;
use sociaclip_core::agent::pipeline::{ContentPipeline, PlanReport};
use sociaclip_core::agent::trend_scanner::TrendScanner;
use sociaclip_core::config::{SociaConfig, DEFAULT_CONFIG_FILE};
use sociaclip_core::engine::candidate::{Candidate, Niche, Platform};
use sociaclip_core::engine::random::{RandomSource, SeededRandom, ThreadRandom};
use sociaclip_core::engine::slots::SlotPlanner;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Weekday};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sociaclip-core")]
#[command(about = "SociaClip content scorer and posting planner", long_about = None)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover trending videos for one or more niches
    Scan {
        /// Niches to scan (defaults to the configured target niches)
        #[arg(short, long)]
        niche: Vec<Niche>,

        /// Write the raw candidates to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a posting plan from candidates (file or live scan)
    Plan {
        /// Candidate list (JSON array); scans live when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Seed for reproducible captions
        #[arg(long)]
        seed: Option<u64>,

        /// Day to plan for (mon..sun), defaults to today
        #[arg(long)]
        weekday: Option<Weekday>,

        /// Export directory (defaults to the configured one)
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Print the plan without writing an export file
        #[arg(long)]
        no_export: bool,
    },

    /// Generate a caption and hashtags
    Caption {
        #[arg(short, long)]
        niche: Niche,

        #[arg(short, long)]
        platform: Platform,

        #[arg(short, long, default_value = "60")]
        viral_score: u8,

        /// Video title the copy is built around
        #[arg(short, long, default_value = "")]
        title: String,

        /// Video description
        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the best posting slots for a platform
    Slots {
        #[arg(short, long)]
        platform: Platform,

        #[arg(short, long)]
        niche: Niche,

        #[arg(short, long, default_value = "50")]
        viral_score: u8,

        #[arg(long)]
        weekday: Option<Weekday>,
    },

    /// List the niches worth scanning
    Niches,

    /// Start the HTTP control plane
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn make_rng(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}

fn load_candidates(path: &PathBuf) -> Result<Vec<Candidate>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read candidates from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Malformed candidate list in {}", path.display()))
}

fn print_plan(report: &PlanReport) {
    println!("\n📅 Posting plan ({} posts, focus: {})", report.posts.len(), report.focus_niche);
    println!("{}", "-".repeat(60));
    let mut posts: Vec<_> = report.posts.iter().collect();
    posts.sort_by_key(|p| (p.slot().time, p.platform()));
    for post in posts {
        println!(
            "{} {:<15} viral {:>3} | slot {:>3} | {}",
            post.slot().time,
            post.platform().as_str(),
            post.viral_score(),
            post.slot().recommendation_score,
            post.candidate().title
        );
        if let Some(copy) = &post.copy {
            println!("      #️⃣  {}", copy.hashtags.join(" "));
        }
    }
    if let Some(quality) = &report.quality {
        println!("\n📊 Quality {:.1}/100", quality.overall_quality_score);
        for suggestion in quality.suggestions.iter().take(3) {
            println!("   • {}", suggestion);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("--- SOCIACLIP CORE v{} ---", env!("CARGO_PKG_VERSION"));

    let args = Cli::parse();
    let config = SociaConfig::load(&args.config)?;

    match args.command {
        Commands::Scan { niche, output } => {
            let niches = if niche.is_empty() {
                config.target_niches.clone()
            } else {
                niche
            };
            let scanner = TrendScanner::from_config(&config)?;
            let found = scanner.scan(&niches).await?;
            match output {
                Some(path) => {
                    let json = serde_json::to_string_pretty(&found)?;
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("💾 Saved {} candidates to {}", found.len(), path.display());
                }
                None => {
                    for (i, c) in found.iter().enumerate() {
                        println!("{}. [{}] {}\n   {}", i + 1, c.category, c.title, c.identifier);
                    }
                }
            }
        }
        Commands::Plan {
            input,
            seed,
            weekday,
            export_dir,
            no_export,
        } => {
            let candidates = match input {
                Some(path) => load_candidates(&path)?,
                None => {
                    let scanner = TrendScanner::from_config(&config)?;
                    scanner.scan(&config.target_niches).await?
                }
            };
            if candidates.is_empty() {
                warn!("⚠️ No candidates to plan from");
            }

            let weekday = weekday.unwrap_or_else(|| Local::now().weekday());
            let export_dir = export_dir.unwrap_or_else(|| PathBuf::from(&config.export_dir));
            let pipeline = ContentPipeline::new(config);
            let mut rng = make_rng(seed);
            let report = pipeline.plan(candidates, weekday, rng.as_mut())?;

            print_plan(&report);
            if !no_export {
                let path = export_plan(&report, &export_dir)?;
                println!("\n💾 Exported to {}", path.display());
            }
        }
        Commands::Caption {
            niche,
            platform,
            viral_score,
            title,
            description,
            seed,
        } => {
            let pipeline = ContentPipeline::new(config);
            let mut rng = make_rng(seed);
            let video = Candidate::new("", &title, &description, niche);
            let copy = pipeline
                .writer()
                .write_post(&video, platform, viral_score, rng.as_mut())?;
            println!("🧭 Strategy: {}\n", copy.strategy);
            println!("{}", copy.full_post());
            println!("\n⚡ Optimization score: {}/100", copy.optimization_score);
        }
        Commands::Slots {
            platform,
            niche,
            viral_score,
            weekday,
        } => {
            let planner = SlotPlanner::new(config.scheduling.tables.clone());
            let weekday = weekday.unwrap_or_else(|| Local::now().weekday());
            println!(
                "⏰ {} slots for {} on {} (golden window {} min)",
                platform,
                niche,
                weekday,
                planner.golden_window_minutes(platform)
            );
            for slot in planner.options(platform, &niche, viral_score, weekday) {
                println!(
                    "  {}  score {:>3}  engagement {:.2}  viral x{:.2}  {:?} competition  ({:?})",
                    slot.time,
                    slot.recommendation_score,
                    slot.expected_engagement,
                    slot.viral_multiplier,
                    slot.competition,
                    slot.source
                );
            }
        }
        Commands::Niches => {
            for (i, niche) in Niche::TOP.iter().enumerate() {
                println!("{:>2}. {}", i + 1, niche);
            }
        }
        Commands::Serve { port } => {
            use sociaclip_core::server;
            use sociaclip_core::state::ServerState;

            info!("🌐 Starting SociaClip control plane on port {}...", port);
            let state = Arc::new(ServerState::new(config));
            server::start_server(port, state).await?;
        }
    }

    Ok(())
}
