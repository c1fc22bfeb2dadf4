// SociaClip Core Library
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Trend discovery, viral scoring, slot planning and caption generation for
// short-form social video.

pub mod agent;
pub mod config;
pub mod engine;
pub mod server;
pub mod state;

pub use config::SociaConfig;
