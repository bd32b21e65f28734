//! AI-powered product feedback analyzer.
//!
//! One invocation makes exactly one provider call: build the instruction
//! from the caller's inputs, request schema-constrained JSON, validate and
//! deserialize the payload, then assemble the immutable analysis result.
//! Every provider-side failure collapses into a single user-safe error.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::AnalyzerConfig;
use crate::integrations::GeminiClient;
use crate::models::{FeatureSuggestion, ProductAnalysis, Review, SentimentStats};
use crate::{prompts, schema, Error, Result};

/// Wire payload returned by the provider, before assembly.
#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    summary: String,
    reviews: Vec<Review>,
    features: Vec<FeatureSuggestion>,
}

/// Analyze a product: fabricate reviews and feature suggestions via the
/// provider and return the assembled [`ProductAnalysis`].
///
/// Fails with [`Error::Validation`] on empty inputs (the orchestrator
/// enforces the same precondition and never issues the call) and with an
/// opaque [`Error::Analysis`] on any provider, network or parse failure.
pub async fn analyze(
    client: &GeminiClient,
    config: &AnalyzerConfig,
    product_name: &str,
    product_description: &str,
) -> Result<ProductAnalysis> {
    let name = product_name.trim();
    let description = product_description.trim();
    if name.is_empty() || description.is_empty() {
        return Err(Error::Validation(
            "Product name and description must not be empty".to_string(),
        ));
    }

    info!(
        "Analyzing product '{}' (model: {})",
        name,
        config.resolved_model()
    );

    let prompt = prompts::build_analysis_prompt(name, description);
    let contract = schema::analysis_response_schema();

    let raw = client
        .generate_structured(
            &prompt,
            Some(prompts::SYSTEM_MESSAGE),
            contract.clone(),
            config.temperature,
            config.max_output_tokens,
        )
        .await
        .map_err(|e| {
            error!("Provider call failed: {}", e);
            Error::analysis_failed()
        })?;

    let payload = parse_payload(&contract, &raw).map_err(|e| {
        error!("Provider returned an unusable payload: {}", e);
        Error::analysis_failed()
    })?;

    debug!(
        "Parsed {} reviews, {} features",
        payload.reviews.len(),
        payload.features.len()
    );

    Ok(assemble(name, payload))
}

/// Parse the raw text as JSON, check it against the schema contract, then
/// deserialize into the typed payload. All-or-nothing.
fn parse_payload(contract: &Value, raw: &str) -> Result<AnalysisPayload> {
    let value: Value = serde_json::from_str(raw)?;
    schema::validate(contract, &value)?;
    serde_json::from_value(value).map_err(Error::from)
}

fn assemble(product_name: &str, payload: AnalysisPayload) -> ProductAnalysis {
    let AnalysisPayload {
        summary,
        reviews,
        mut features,
    } = payload;

    for feature in &mut features {
        feature.clamp_scores();
    }

    // Stats come from the review list, not from the provider.
    let sentiment_stats = SentimentStats::from_reviews(&reviews);

    ProductAnalysis {
        product_name: product_name.to_string(),
        analyzed_at: Utc::now(),
        summary,
        reviews,
        features,
        sentiment_stats,
    }
}
