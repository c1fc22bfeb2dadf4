// SociaClip Agent Modules
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod content_writer;
pub mod exporter;
pub mod pipeline;
pub mod quality;
pub mod trend_scanner;
