//! Data model for one product analysis run.
//!
//! The wire shapes match the provider's structured output exactly; any value
//! outside the declared enumerations fails deserialization, so a result is
//! either complete and well-formed or rejected as a whole.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a simulated review claims to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    Reddit,
    Twitter,
    #[serde(rename = "Product Hunt")]
    ProductHunt,
    #[serde(rename = "Hacker News")]
    HackerNews,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Source::Reddit => "Reddit",
            Source::Twitter => "Twitter",
            Source::ProductHunt => "Product Hunt",
            Source::HackerNews => "Hacker News",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Bug Report")]
    BugReport,
    #[serde(rename = "Feature Request")]
    FeatureRequest,
    Praise,
    #[serde(rename = "General Feedback")]
    GeneralFeedback,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::BugReport => "Bug Report",
            Category::FeatureRequest => "Feature Request",
            Category::Praise => "Praise",
            Category::GeneralFeedback => "General Feedback",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        write!(f, "{}", label)
    }
}

/// One simulated user post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub source: Source,
    pub author: String,
    pub content: String,
    pub sentiment: Sentiment,
    pub category: Category,
    pub likes: u32,
    pub date: String,
}

/// One derived product-improvement candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSuggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact_score: u8,
    pub effort_score: u8,
    pub priority: Priority,
    /// Non-owning cross-references; ids with no matching review are
    /// tolerated everywhere downstream.
    pub related_review_ids: Vec<String>,
}

pub const SCORE_MIN: u8 = 1;
pub const SCORE_MAX: u8 = 10;

impl FeatureSuggestion {
    /// Force impact/effort into the declared 1-10 scale. The provider
    /// promises the range in the prompt but the schema cannot enforce it.
    pub fn clamp_scores(&mut self) {
        self.impact_score = self.impact_score.clamp(SCORE_MIN, SCORE_MAX);
        self.effort_score = self.effort_score.clamp(SCORE_MIN, SCORE_MAX);
    }
}

/// Derived sentiment tallies. Always recomputed from the review list, never
/// provider-supplied, so `positive + neutral + negative == reviews.len()`
/// holds no matter what the provider reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentStats {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentStats {
    /// Tally the three buckets by scanning the parsed reviews.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut stats = SentimentStats::default();
        for review in reviews {
            match review.sentiment {
                Sentiment::Positive => stats.positive += 1,
                Sentiment::Negative => stats.negative += 1,
                Sentiment::Neutral => stats.neutral += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// The complete, immutable result of one successful analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysis {
    /// As entered by the caller, never echoed back from the provider.
    pub product_name: String,
    pub analyzed_at: DateTime<Utc>,
    pub summary: String,
    pub reviews: Vec<Review>,
    pub features: Vec<FeatureSuggestion>,
    pub sentiment_stats: SentimentStats,
}
