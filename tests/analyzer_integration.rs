//! Integration tests for the voc_analyzer library
//!
//! These tests exercise the public API end to end against a mock Gemini
//! endpoint: the analysis client contract, the opaque failure behavior and
//! the orchestrated one-shot cycle.

use httpmock::prelude::*;
use serde_json::json;

use voc_analyzer::app::{App, AppState, OutputFormat};
use voc_analyzer::{analyzer, AnalyzerConfig, Error, GeminiClient, ANALYSIS_FAILED_MESSAGE};

// ============================================================================
// Helpers
// ============================================================================

fn test_config() -> AnalyzerConfig {
    AnalyzerConfig {
        model: Some("gemini-2.5-flash".to_string()),
        temperature: 0.7,
        max_output_tokens: 1024,
        sim_step_ms: 1,
    }
}

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new("test_key", "gemini-2.5-flash")
        .expect("client")
        .with_base_url(&server.base_url())
}

/// Wrap an analysis payload the way Gemini returns it: as the JSON text of
/// the first candidate part.
fn gemini_body(payload: &serde_json::Value) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": payload.to_string() } ] } }
        ]
    })
}

fn two_review_payload() -> serde_json::Value {
    json!({
        "summary": "One fan, one frustrated user.",
        "reviews": [
            {
                "id": "r1",
                "source": "Reddit",
                "author": "task_wrangler",
                "content": "Exactly what my team needed.",
                "sentiment": "Positive",
                "category": "Praise",
                "likes": 27,
                "date": "2026-08-02"
            },
            {
                "id": "r2",
                "source": "Product Hunt",
                "author": "maker_mel",
                "content": "Loses my board state on refresh.",
                "sentiment": "Negative",
                "category": "Bug Report",
                "likes": 4,
                "date": "2026-08-04"
            }
        ],
        "features": [
            {
                "id": "f1",
                "title": "Autosave",
                "description": "Persist board state continuously.",
                "impactScore": 9,
                "effortScore": 4,
                "priority": "High",
                "relatedReviewIds": ["r2"]
            }
        ]
    })
}

// ============================================================================
// Analysis Client
// ============================================================================

#[tokio::test]
async fn analyze_returns_assembled_result_with_recomputed_stats() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-2.5-flash:generateContent");
        then.status(200).json_body(gemini_body(&two_review_payload()));
    });

    let analysis = analyzer::analyze(
        &client(&server),
        &test_config(),
        "Acme Task Manager",
        "A tool for tracking tasks",
    )
    .await
    .unwrap();

    assert_eq!(analysis.product_name, "Acme Task Manager");
    assert_eq!(analysis.reviews.len(), 2);
    assert_eq!(analysis.features.len(), 1);
    assert_eq!(analysis.sentiment_stats.positive, 1);
    assert_eq!(analysis.sentiment_stats.neutral, 0);
    assert_eq!(analysis.sentiment_stats.negative, 1);
    assert_eq!(
        analysis.sentiment_stats.total(),
        analysis.reviews.len()
    );
}

#[tokio::test]
async fn analyze_sends_both_inputs_verbatim() {
    let server = MockServer::start_async().await;
    let generate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-2.5-flash:generateContent")
            .is_true(|req| {
                let body = String::from_utf8_lossy(req.body().as_ref());
                body.contains("Acme Task Manager") && body.contains("A tool for tracking tasks")
            });
        then.status(200).json_body(gemini_body(&two_review_payload()));
    });

    analyzer::analyze(
        &client(&server),
        &test_config(),
        "Acme Task Manager",
        "A tool for tracking tasks",
    )
    .await
    .unwrap();

    generate_mock.assert_calls(1);
}

#[tokio::test]
async fn analyze_fails_opaquely_on_missing_required_field() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-2.5-flash:generateContent");
        then.status(200)
            .json_body(gemini_body(&json!({ "summary": "s", "reviews": [] })));
    });

    let err = analyzer::analyze(&client(&server), &test_config(), "Acme", "desc")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Analysis(_)));
    assert_eq!(err.to_string(), ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn analyze_fails_opaquely_on_unknown_enum_value() {
    let server = MockServer::start_async().await;
    let mut payload = two_review_payload();
    payload["reviews"][0]["sentiment"] = json!("Delighted");
    server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-2.5-flash:generateContent");
        then.status(200).json_body(gemini_body(&payload));
    });

    let err = analyzer::analyze(&client(&server), &test_config(), "Acme", "desc")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn analyze_fails_opaquely_on_provider_error_status() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-2.5-flash:generateContent");
        then.status(500).body("internal error");
    });

    let err = analyzer::analyze(&client(&server), &test_config(), "Acme", "desc")
        .await
        .unwrap_err();

    // Provider detail is logged, never surfaced.
    assert_eq!(err.to_string(), ANALYSIS_FAILED_MESSAGE);
    assert!(!err.to_string().contains("internal error"));
}

#[tokio::test]
async fn analyze_fails_opaquely_on_non_json_candidate_text() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-2.5-flash:generateContent");
        then.status(200).json_body(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "sorry, I cannot do that" } ] } }
            ]
        }));
    });

    let err = analyzer::analyze(&client(&server), &test_config(), "Acme", "desc")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn analyze_validates_inputs_before_any_network_call() {
    let server = MockServer::start_async().await;
    let generate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-2.5-flash:generateContent");
        then.status(200).json_body(gemini_body(&two_review_payload()));
    });

    let err = analyzer::analyze(&client(&server), &test_config(), "Acme", "   ")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    generate_mock.assert_calls(0);
}

// ============================================================================
// Orchestrated one-shot cycle
// ============================================================================

#[tokio::test]
async fn run_once_ends_in_report_on_success() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-2.5-flash:generateContent");
        then.status(200).json_body(gemini_body(&two_review_payload()));
    });

    let mut app = App::new(client(&server), test_config(), OutputFormat::Json, true);
    app.run_once("Acme Task Manager", "A tool for tracking tasks")
        .await
        .unwrap();

    match app.state() {
        AppState::Report(analysis) => {
            assert_eq!(analysis.product_name, "Acme Task Manager");
        }
        other => panic!("expected Report, got {:?}", other),
    }
}

#[tokio::test]
async fn run_once_ends_in_failed_with_displayable_message() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-2.5-flash:generateContent");
        then.status(503).body("overloaded");
    });

    let mut app = App::new(client(&server), test_config(), OutputFormat::Json, true);
    let err = app.run_once("Acme", "desc").await.unwrap_err();

    assert_eq!(err.to_string(), ANALYSIS_FAILED_MESSAGE);
    match app.state() {
        AppState::Failed(message) => {
            assert_eq!(message, ANALYSIS_FAILED_MESSAGE);
            assert!(!message.is_empty());
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn run_once_with_empty_description_stays_out_of_the_network() {
    let server = MockServer::start_async().await;
    let generate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/models/gemini-2.5-flash:generateContent");
        then.status(200).json_body(gemini_body(&two_review_payload()));
    });

    let mut app = App::new(client(&server), test_config(), OutputFormat::Json, true);
    let err = app.run_once("Acme", "   ").await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(app.state(), &AppState::Input);
    generate_mock.assert_calls(0);
}
