//! Voice-of-Customer Product Feedback Analyzer Library
//!
//! This library provides tools to:
//! - Collect a product name and description
//! - Ask Gemini to synthesize a plausible set of user reviews and feature
//!   requests as schema-constrained JSON
//! - Drive a fixed-duration scrape simulation concurrently with the
//!   provider call
//! - Render the finished analysis as a terminal dashboard

pub mod analyzer;
pub mod app;
pub mod config;
pub mod error;
pub mod integrations;
pub mod models;
pub mod prompts;
pub mod render;
pub mod schema;
pub mod simulation;

// Re-export common types
pub use config::AnalyzerConfig;
pub use error::{Error, Result, ANALYSIS_FAILED_MESSAGE};
pub use integrations::GeminiClient;
pub use models::{
    Category, FeatureSuggestion, Priority, ProductAnalysis, Review, Sentiment, SentimentStats,
    Source,
};
