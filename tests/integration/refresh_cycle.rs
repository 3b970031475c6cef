// App-level refresh cycles through the event pipeline: trigger, spawned
// fetch, `RefreshResolved` application, coalescing of overlapping
// triggers.

use crate::helpers::test_app;
use pretty_assertions::assert_eq;
use tailview::app::{App, AppStatus, handle_app_event, request_refresh};
use tailview::error::FetchError;

async fn resolve_one(app: &mut App) {
    let event = app.event_rx.recv().await.expect("a resolved fetch event");
    handle_app_event(app, event);
}

#[tokio::test]
async fn successful_cycle_installs_content_and_goes_idle() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let (mut app, gateway) = test_app(vec![Ok("one\ntwo".to_owned())]);
            app.panel.set_viewport(80, 24);

            request_refresh(&mut app);
            assert!(app.refresh_in_flight);
            assert_eq!(app.status, AppStatus::Refreshing);

            resolve_one(&mut app).await;
            assert!(!app.refresh_in_flight);
            assert_eq!(app.status, AppStatus::Idle);
            assert_eq!(app.panel.content(), "one\ntwo");
            assert_eq!(app.panel.entries().len(), 2);
            assert_eq!(gateway.request_count(), 1);
        })
        .await;
}

#[tokio::test]
async fn failed_cycle_reports_and_preserves_position() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let (mut app, _gateway) =
                test_app(vec![Ok("a\nb\nc\nd\ne\nf".to_owned()), Err(FetchError::Status(502))]);
            app.panel.set_viewport(80, 2);

            request_refresh(&mut app);
            resolve_one(&mut app).await;
            // reader scrolls up into history
            app.panel.scroll_up(10);
            let offset_before = app.panel.scroll_offset();

            request_refresh(&mut app);
            resolve_one(&mut app).await;
            assert_eq!(app.status, AppStatus::Failed);
            assert_eq!(app.last_error.as_deref(), Some("HTTP error! status: 502"));
            assert_eq!(app.panel.content(), "Error: HTTP error! status: 502");
            assert_eq!(app.panel.scroll_offset(), offset_before);
        })
        .await;
}

#[tokio::test]
async fn success_after_failure_clears_the_error() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let (mut app, _gateway) = test_app(vec![
                Err(FetchError::Transport("connection refused".to_owned())),
                Ok("recovered".to_owned()),
            ]);
            app.panel.set_viewport(80, 24);

            request_refresh(&mut app);
            resolve_one(&mut app).await;
            assert!(app.last_error.is_some());

            request_refresh(&mut app);
            resolve_one(&mut app).await;
            assert_eq!(app.last_error, None);
            assert_eq!(app.panel.content(), "recovered");
        })
        .await;
}

#[tokio::test]
async fn overlapping_triggers_are_coalesced() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let (mut app, gateway) = test_app(vec![Ok("payload".to_owned())]);
            app.panel.set_viewport(80, 24);

            request_refresh(&mut app);
            // timer tick and manual trigger land while the fetch is in flight
            request_refresh(&mut app);
            request_refresh(&mut app);

            resolve_one(&mut app).await;
            assert_eq!(gateway.request_count(), 1);
            assert_eq!(app.panel.content(), "payload");
            // nothing else queued
            assert!(app.event_rx.try_recv().is_err());
        })
        .await;
}

#[tokio::test]
async fn cycles_follow_a_growing_tail() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let first: String =
                (1..=10).map(|i| format!("line {i}\n")).collect::<String>().trim_end().to_owned();
            let second: String =
                (1..=14).map(|i| format!("line {i}\n")).collect::<String>().trim_end().to_owned();
            let (mut app, _gateway) = test_app(vec![Ok(first), Ok(second)]);
            // 4 visible rows over 10 entries: max_scroll 6, distance under 50
            app.panel.set_viewport(80, 4);

            request_refresh(&mut app);
            resolve_one(&mut app).await;
            assert_eq!(app.panel.scroll_offset(), 10);
            assert_eq!(app.panel.display_offset(), 6);

            request_refresh(&mut app);
            resolve_one(&mut app).await;
            assert_eq!(app.panel.scroll_offset(), 14);
            assert_eq!(app.panel.display_offset(), 10);
        })
        .await;
}
