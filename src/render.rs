//! Terminal dashboard rendering.
//!
//! Pure string building over a finished analysis; nothing here mutates the
//! result. Dangling feature-to-review references render as zero linked
//! reviews instead of failing.

use std::collections::HashSet;

use crate::models::{Category, FeatureSuggestion, ProductAnalysis, Sentiment};

const BAR_WIDTH: usize = 24;
const TOP_FEATURES: usize = 4;

/// Render the full dashboard for one analysis.
pub fn dashboard(analysis: &ProductAnalysis) -> String {
    let mut lines = Vec::new();
    let rule = "━".repeat(64);

    let total = analysis.reviews.len();
    let bug_count = count_category(analysis, Category::BugReport);
    let feature_count = count_category(analysis, Category::FeatureRequest);
    let positive_share = percentage(analysis.sentiment_stats.positive, total);

    lines.push(String::new());
    lines.push(format!("📡 {} — Public Sentiment Report", analysis.product_name));
    lines.push(format!(
        "Analyzed: {} · Simulated data from Reddit, Twitter, Product Hunt",
        analysis.analyzed_at.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(rule.clone());

    lines.push(format!(
        "Reviews: {}   Positive: {}%   🐞 Bugs: {}   ⚡ Feature requests: {}",
        total, positive_share, bug_count, feature_count
    ));
    lines.push(String::new());

    lines.push("🧠 AI Executive Summary".to_string());
    lines.push(format!("   {}", analysis.summary));
    lines.push(String::new());

    lines.push("📊 Sentiment Distribution".to_string());
    lines.push(sentiment_line("Positive", analysis.sentiment_stats.positive, total));
    lines.push(sentiment_line("Neutral", analysis.sentiment_stats.neutral, total));
    lines.push(sentiment_line("Negative", analysis.sentiment_stats.negative, total));
    lines.push(String::new());

    lines.push("🎯 Prioritization Matrix (impact vs effort)".to_string());
    let known_ids: HashSet<&str> = analysis.reviews.iter().map(|r| r.id.as_str()).collect();
    for feature in &analysis.features {
        let linked = feature
            .related_review_ids
            .iter()
            .filter(|id| known_ids.contains(id.as_str()))
            .count();
        lines.push(format!(
            "   [{:<6}] {} — impact {}/10, effort {}/10 · {} · {} linked review(s)",
            feature.priority.to_string(),
            feature.title,
            feature.impact_score,
            feature.effort_score,
            quadrant(feature),
            linked
        ));
    }
    if analysis.features.is_empty() {
        lines.push("   (no feature suggestions)".to_string());
    }
    lines.push(String::new());

    lines.push("⚡ Top Features to Build".to_string());
    for feature in analysis.features.iter().take(TOP_FEATURES) {
        lines.push(format!(
            "   {} priority — {}",
            feature.priority, feature.title
        ));
        lines.push(format!("      {}", feature.description));
    }
    lines.push(String::new());

    lines.push(format!("💬 Review Feed ({} posts)", total));
    for review in &analysis.reviews {
        lines.push(format!(
            "   {} @{} · {} · 👍 {}",
            review.source, review.author, review.date, review.likes
        ));
        lines.push(format!("      \"{}\"", review.content));
        lines.push(format!(
            "      {} {} · {}",
            sentiment_icon(review.sentiment),
            review.sentiment,
            review.category
        ));
    }
    lines.push(rule);

    lines.join("\n")
}

fn count_category(analysis: &ProductAnalysis, category: Category) -> usize {
    analysis
        .reviews
        .iter()
        .filter(|review| review.category == category)
        .count()
}

fn percentage(part: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        part * 100 / total
    }
}

fn sentiment_line(label: &str, count: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (count * BAR_WIDTH).div_ceil(total).min(BAR_WIDTH)
    };
    format!(
        "   {:<8} {:>3}  {}{}",
        label,
        count,
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

fn sentiment_icon(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "✅",
        Sentiment::Neutral => "➖",
        Sentiment::Negative => "⚠️",
    }
}

/// Classic impact/effort quadrant label for a feature.
fn quadrant(feature: &FeatureSuggestion) -> &'static str {
    match (feature.impact_score >= 6, feature.effort_score >= 6) {
        (true, false) => "Quick Win",
        (true, true) => "Big Bet",
        (false, false) => "Fill-in",
        (false, true) => "Money Pit",
    }
}
