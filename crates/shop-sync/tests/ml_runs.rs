//! Forecast and classification runs: supersession, selection, and exclusions.

mod support;

use std::collections::BTreeSet;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use shop_sync::{
    Console, ConsoleEvent, ConsoleOptions, EventEffect, LogicalQuery, QueryOutcome, QueryPhase,
};
use support::{FakeBackend, Route, classification, forecast};

fn console_over(backend: &Arc<FakeBackend>, options: ConsoleOptions) -> Console<FakeBackend> {
    Console::with_shared(Arc::clone(backend), options)
}

fn features(console: &Console<FakeBackend>) -> Vec<String> {
    console
        .feature_view()
        .into_iter()
        .map(|row| row.feature)
        .collect()
}

#[tokio::test]
async fn default_selection_follows_the_classification() {
    let backend = Arc::new(FakeBackend::default());
    let console = console_over(&backend, ConsoleOptions::default());

    backend.push_classification(classification(&["X", "Y"]));
    assert_eq!(console.run_classification().outcome().await, QueryOutcome::Committed);
    assert_eq!(console.snapshot().selected_product.as_deref(), Some("X"));

    backend.push_classification(classification(&["Y", "Z"]));
    assert_eq!(console.run_classification().outcome().await, QueryOutcome::Committed);
    assert_eq!(console.snapshot().selected_product.as_deref(), Some("Y"));
}

#[tokio::test]
async fn operator_selection_survives_a_rerun() {
    let backend = Arc::new(FakeBackend::default());
    let console = console_over(&backend, ConsoleOptions::default());
    backend.push_classification(classification(&["X", "Y", "Z"]));
    console.run_classification().outcome().await;

    let effect = console.handle(ConsoleEvent::SelectProduct("Z".into())).await;
    assert!(matches!(effect, EventEffect::Selected));
    let effect = console.handle(ConsoleEvent::SelectProduct("Nope".into())).await;
    assert!(matches!(effect, EventEffect::Unchanged));

    backend.push_classification(classification(&["Y", "Z"]));
    console.run_classification().outcome().await;
    assert_eq!(console.snapshot().selected_product.as_deref(), Some("Z"));
}

#[tokio::test]
async fn running_flag_tracks_outstanding_runs() {
    let backend = Arc::new(FakeBackend::default());
    let console = console_over(&backend, ConsoleOptions::default());
    backend.push_classification(classification(&["X"]));
    let release = backend.hold(Route::Classify, None);

    let pending = console.run_classification();
    let snapshot = console.snapshot();
    assert!(snapshot.ml_running());
    assert!(!snapshot.loading());
    assert_eq!(snapshot.phase(LogicalQuery::Classification), QueryPhase::Pending);

    release.send(()).unwrap();
    assert_eq!(pending.outcome().await, QueryOutcome::Committed);
    assert!(!console.snapshot().ml_running());
}

#[tokio::test]
async fn rerun_supersedes_the_outstanding_forecast() {
    let backend = Arc::new(FakeBackend::default());
    let console = console_over(&backend, ConsoleOptions::default());
    let expected = forecast(&[("Rice", 12.5), ("Oil", 3.0)]);
    backend.push_forecast(expected.clone());
    backend.push_forecast(expected.clone());

    let first = console.run_forecast();
    let second = console.run_forecast();
    assert_eq!(first.outcome().await, QueryOutcome::Superseded);
    assert_eq!(second.outcome().await, QueryOutcome::Committed);

    let snapshot = console.snapshot();
    assert!(!snapshot.ml_running());
    assert_eq!(snapshot.forecast, expected);
    assert!(snapshot.errors.is_empty());
}

#[tokio::test]
async fn forecast_replaces_previous_result_wholesale() {
    let backend = Arc::new(FakeBackend::default());
    let console = console_over(&backend, ConsoleOptions::default());

    backend.push_forecast(forecast(&[("Rice", 12.5), ("Oil", 3.0)]));
    console.run_forecast().outcome().await;
    backend.push_forecast(forecast(&[("Salt", 1.0)]));
    console.run_forecast().outcome().await;

    assert_eq!(console.snapshot().forecast, forecast(&[("Salt", 1.0)]));
}

#[tokio::test]
async fn issuing_a_run_clears_the_previous_result() {
    let backend = Arc::new(FakeBackend::default());
    let console = console_over(&backend, ConsoleOptions::default());
    backend.push_classification(classification(&["X"]));
    console.run_classification().outcome().await;
    assert!(console.snapshot().classification.is_some());

    let _held = backend.hold(Route::Classify, None);
    let _pending = console.run_classification();
    assert!(console.snapshot().classification.is_none());
}

#[tokio::test]
async fn feature_view_sorts_and_applies_exclusions() {
    let backend = Arc::new(FakeBackend::default());
    backend.push_classification(classification(&["X"]));
    backend.push_classification(classification(&["X"]));

    let plain = console_over(&backend, ConsoleOptions::default());
    plain.run_classification().outcome().await;
    assert_eq!(
        features(&plain),
        vec!["discount_percent", "stock_left", "month"]
    );

    let filtered = console_over(
        &backend,
        ConsoleOptions {
            excluded_features: BTreeSet::from(["stock_left".to_string()]),
            ..ConsoleOptions::default()
        },
    );
    filtered.run_classification().outcome().await;
    assert_eq!(features(&filtered), vec!["discount_percent", "month"]);
}
