//! Fixed-duration "scraping" animation.
//!
//! Purely presentational: the analysis result never depends on it. Its
//! total duration is what gates the transition to the report, so a fast
//! provider response never truncates the animation.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::Result;

/// The six stages shown while the provider call is in flight.
pub const SCRAPE_STEPS: &[&str] = &[
    "Connecting to Reddit API...",
    "Scanning Twitter threads...",
    "Parsing Product Hunt comments...",
    "Aggregating raw data...",
    "Running sentiment analysis...",
    "Categorizing insights...",
];

// Steps that report a fake "posts collected" counter.
const SOURCE_SCAN_STEPS: usize = 3;

#[derive(Debug, Clone)]
pub struct ScrapeSimulation {
    step_duration: Duration,
    quiet: bool,
}

impl ScrapeSimulation {
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_duration: Duration::from_millis(step_ms),
            quiet: false,
        }
    }

    /// Suppress terminal output; timing is unchanged.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn total_duration(&self) -> Duration {
        self.step_duration * SCRAPE_STEPS.len() as u32
    }

    /// Play the full animation. Returns `Ok(())` so it composes with
    /// `tokio::try_join!` against the analysis future.
    pub async fn play(&self) -> Result<()> {
        if !self.quiet {
            println!("\n🛰️  Gathering intelligence...");
        }

        for (index, step) in SCRAPE_STEPS.iter().enumerate() {
            if !self.quiet {
                println!("  [{}/{}] {}", index + 1, SCRAPE_STEPS.len(), step);
            }

            sleep(self.step_duration).await;

            if !self.quiet && index < SOURCE_SCAN_STEPS {
                let collected = rand::thread_rng().gen_range(5..=14);
                println!("        {} posts collected", collected);
            }
        }

        if !self.quiet {
            println!("  ✅ Scrape simulation complete");
        }
        Ok(())
    }
}
