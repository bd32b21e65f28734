//! Analyzer configuration with environment overrides.

use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Duration of one scrape-simulation step. Six steps make the fixed
/// 4800 ms animation that gates the report transition.
pub const DEFAULT_SIM_STEP_MS: u64 = 800;

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub model: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub sim_step_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: env::var("GEMINI_MODEL").ok(),
            temperature: env_parsed("VOC_TEMPERATURE", DEFAULT_TEMPERATURE),
            max_output_tokens: env_parsed("VOC_MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS),
            sim_step_ms: env_parsed("SCRAPE_SIM_STEP_MS", DEFAULT_SIM_STEP_MS),
        }
    }
}

impl AnalyzerConfig {
    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, fallback: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(fallback)
}
