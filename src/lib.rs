#![doc = include_str!("../README.md")]

/// Reference time for future-tweet detection
pub mod clock;
mod config;
/// Parser diagnostics and sinks
pub mod diagnostics;
mod error;
/// Human-readable durations
pub mod humanize;
mod models;
mod parser;
/// Lenient ISO 8601 timestamp parsing
pub mod timestamp;
/// ANSI escape stripping for tweet text
pub mod unstyle;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ParserConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use error::{Result, TwtxtError};
pub use models::{Source, Tweet};
pub use parser::{ParsedFeed, TweetParser, parse_text, parse_tweet, parse_tweets};
pub use timestamp::parse_iso8601;
