use std::sync::Arc;

use services::SampleContentProvider;

use super::test_harness::{FailingProvider, PendingProvider, setup_practice_harness};

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_loading() {
    let mut harness = setup_practice_harness(Arc::new(PendingProvider));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Generating a new passage"), "missing loading text in {html}");
    assert!(html.contains("New exercise"), "missing new exercise button in {html}");
    assert!(!html.contains("Submit"), "submit shown while loading in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_exercise() {
    let mut harness = setup_practice_harness(Arc::new(SampleContentProvider));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    for expected in [
        "The Hidden Architecture of Urban Heat",
        "True/False/Not Given",
        "You have selected 0 paragraphs.",
        "paragraph-label",
        "Submit",
        "Scanning tip",
        "01:30",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_error_with_retry() {
    let mut harness = setup_practice_harness(Arc::new(FailingProvider));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Could not load an exercise"), "missing error heading in {html}");
    assert!(
        html.contains("content generation is not configured"),
        "missing error message in {html}"
    );
    assert!(html.contains("Retry"), "missing retry button in {html}");
}
