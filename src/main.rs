//! VoC Analyzer CLI - main entry point
//!
//! Interactive by default; pass a product name and description for a
//! single non-interactive analysis.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voc_analyzer::app::{App, OutputFormat};
use voc_analyzer::{AnalyzerConfig, GeminiClient};

#[derive(Parser)]
#[command(name = "voc_analyzer")]
#[command(about = "Simulated review scraping & AI sentiment dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Product name (omit to run interactively)
    name: Option<String>,

    /// Product description (required with a product name)
    #[arg(short, long)]
    description: Option<String>,

    /// Gemini model to use
    #[arg(long, env = "GEMINI_MODEL")]
    model: Option<String>,

    /// Output format: dashboard | json | both
    #[arg(long, default_value = "dashboard")]
    format: String,

    /// Suppress the scrape animation output (timing is unchanged)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("voc_analyzer=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AnalyzerConfig::default();
    if cli.model.is_some() {
        config.model = cli.model.clone();
    }

    let client = GeminiClient::from_env()?.with_model(&config.resolved_model());
    let format = OutputFormat::parse(&cli.format);
    let mut app = App::new(client, config, format, cli.quiet);

    match (cli.name.as_deref(), cli.description.as_deref()) {
        (Some(name), Some(description)) => app.run_once(name, description).await?,
        (Some(_), None) | (None, Some(_)) => {
            anyhow::bail!("One-shot mode needs both a product name and --description")
        }
        (None, None) => app.run_interactive().await?,
    }

    Ok(())
}
