//! Finite-state controller: input collection, concurrent scrape simulation
//! + provider call, then dashboard or error presentation.
//!
//! Transitions are a pure function of (state, event). The driver joins the
//! analysis future with the fixed-duration simulation: success waits for
//! both (the animation is never truncated), a failed analysis resolves
//! immediately regardless of the timer.

use std::future::Future;
use std::io::{self, Write};

use tracing::info;

use crate::config::AnalyzerConfig;
use crate::integrations::GeminiClient;
use crate::models::ProductAnalysis;
use crate::simulation::ScrapeSimulation;
use crate::{analyzer, render, Error, Result};

/// UI states. `Report` and `Failed` carry what their view needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AppState {
    #[default]
    Input,
    Analyzing {
        product_name: String,
        product_description: String,
    },
    Report(ProductAnalysis),
    Failed(String),
}

/// Events that drive transitions.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Submit { name: String, description: String },
    AnalysisCompleted(ProductAnalysis),
    AnalysisFailed(String),
    Reset,
}

/// Pure transition function. Pairs not listed leave the state unchanged,
/// which is what guarantees at most one analysis in flight: `Submit` is
/// only honored in `Input`.
pub fn transition(state: AppState, event: AppEvent) -> AppState {
    match (state, event) {
        (AppState::Input, AppEvent::Submit { name, description }) => {
            if name.trim().is_empty() || description.trim().is_empty() {
                AppState::Input
            } else {
                AppState::Analyzing {
                    product_name: name.trim().to_string(),
                    product_description: description.trim().to_string(),
                }
            }
        }
        (AppState::Analyzing { .. }, AppEvent::AnalysisCompleted(analysis)) => {
            AppState::Report(analysis)
        }
        (AppState::Analyzing { .. }, AppEvent::AnalysisFailed(message)) => {
            AppState::Failed(message)
        }
        (AppState::Report(_), AppEvent::Reset) | (AppState::Failed(_), AppEvent::Reset) => {
            AppState::Input
        }
        (state, _) => state,
    }
}

/// Join the analysis with the fixed-duration simulation and map the outcome
/// to the event that resolves `Analyzing`.
///
/// `try_join!` gives exactly the needed semantics: both futures must finish
/// before a success is reported, while an analysis error short-circuits.
/// Taking the analysis as a generic future keeps a seam for cancellation.
pub async fn run_analysis<F>(analysis: F, simulation: &ScrapeSimulation) -> AppEvent
where
    F: Future<Output = Result<ProductAnalysis>>,
{
    match tokio::try_join!(analysis, simulation.play()) {
        Ok((report, ())) => AppEvent::AnalysisCompleted(report),
        Err(err) => AppEvent::AnalysisFailed(err.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Dashboard,
    Json,
    Both,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "dashboard" | "text" => OutputFormat::Dashboard,
            _ => OutputFormat::Both,
        }
    }
}

/// Interactive/one-shot application driver around the state machine.
pub struct App {
    state: AppState,
    client: GeminiClient,
    config: AnalyzerConfig,
    format: OutputFormat,
    quiet: bool,
}

impl App {
    pub fn new(
        client: GeminiClient,
        config: AnalyzerConfig,
        format: OutputFormat,
        quiet: bool,
    ) -> Self {
        Self {
            state: AppState::Input,
            client,
            config,
            format,
            quiet,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn apply(&mut self, event: AppEvent) {
        self.state = transition(std::mem::take(&mut self.state), event);
    }

    /// Run the analysis for the current `Analyzing` state and apply the
    /// resulting event. No-op in any other state.
    async fn run_analysis_step(&mut self) {
        let (name, description) = match &self.state {
            AppState::Analyzing {
                product_name,
                product_description,
            } => (product_name.clone(), product_description.clone()),
            _ => return,
        };

        let simulation = ScrapeSimulation::new(self.config.sim_step_ms).quiet(self.quiet);
        let event = run_analysis(
            analyzer::analyze(&self.client, &self.config, &name, &description),
            &simulation,
        )
        .await;
        self.apply(event);
    }

    /// One-shot mode: a single Input -> Analyzing -> Report/Failed cycle.
    pub async fn run_once(&mut self, name: &str, description: &str) -> Result<()> {
        self.apply(AppEvent::Submit {
            name: name.to_string(),
            description: description.to_string(),
        });

        if self.state == AppState::Input {
            return Err(Error::Validation(
                "Product name and description must not be empty".to_string(),
            ));
        }

        self.run_analysis_step().await;

        match &self.state {
            AppState::Report(analysis) => {
                let analysis = analysis.clone();
                self.present(&analysis)
            }
            AppState::Failed(message) => Err(Error::Analysis(message.clone())),
            _ => Err(Error::Analysis(
                crate::ANALYSIS_FAILED_MESSAGE.to_string(),
            )),
        }
    }

    /// Interactive mode: prompt, analyze, render, repeat until declined.
    pub async fn run_interactive(&mut self) -> Result<()> {
        println!("📡 VoC Analyzer — simulated review scraping & AI sentiment dashboard");
        println!("Feedback is fabricated by the model; no real sources are contacted.\n");

        loop {
            match self.state.clone() {
                AppState::Input => {
                    let name = read_line("Product name: ")?;
                    let description = read_line("Product description: ")?;
                    self.apply(AppEvent::Submit { name, description });

                    if self.state == AppState::Input {
                        println!("Both fields are required.\n");
                    }
                }
                AppState::Analyzing { product_name, .. } => {
                    info!("Starting analysis cycle for '{}'", product_name);
                    self.run_analysis_step().await;
                }
                AppState::Report(analysis) => {
                    self.present(&analysis)?;
                    if !confirm("Analyze another product?")? {
                        break;
                    }
                    self.apply(AppEvent::Reset);
                }
                AppState::Failed(message) => {
                    println!("\n❌ Generation error: {}", message);
                    if !confirm("Try again?")? {
                        break;
                    }
                    self.apply(AppEvent::Reset);
                }
            }
        }
        Ok(())
    }

    fn present(&self, analysis: &ProductAnalysis) -> Result<()> {
        match self.format {
            OutputFormat::Dashboard => println!("{}", render::dashboard(analysis)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(analysis)?),
            OutputFormat::Both => {
                println!("{}", render::dashboard(analysis));
                println!("{}", serde_json::to_string_pretty(analysis)?);
            }
        }
        Ok(())
    }
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

fn confirm(prompt: &str) -> Result<bool> {
    let answer = read_line(&format!("{} [y/N]: ", prompt))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}
