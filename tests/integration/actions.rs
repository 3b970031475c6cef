// Generic action trigger: POST to the action endpoint, then a full
// reload regardless of the outcome, with the failure observable first.

use crate::helpers::test_app;
use pretty_assertions::assert_eq;
use tailview::app::{App, AppStatus, handle_app_event, trigger_action};
use tailview::error::FetchError;

async fn settle(app: &mut App) {
    let event = app.event_rx.recv().await.expect("an app event");
    handle_app_event(app, event);
}

#[tokio::test]
async fn action_success_reloads_and_refetches() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let (mut app, gateway) =
                test_app(vec![Ok(r#"{"status":"ok"}"#.to_owned()), Ok("fresh logs".to_owned())]);
            app.action_endpoint = Some("http://host/deploy".to_owned());
            app.panel.set_viewport(80, 24);
            app.panel.set_content("stale logs".to_owned());

            trigger_action(&mut app);
            assert!(app.action_in_flight);
            assert_eq!(app.status, AppStatus::Acting);

            // ActionCompleted: reload committed, follow-up refresh spawned
            settle(&mut app).await;
            assert!(!app.action_in_flight);
            assert!(app.refresh_in_flight);

            // RefreshResolved: reloaded page state arrives
            settle(&mut app).await;
            assert_eq!(app.panel.content(), "fresh logs");

            let requests = gateway.requests.borrow();
            assert_eq!(requests.len(), 2);
            assert_eq!(requests[0].0, "http://host/deploy");
            assert_eq!(requests[1].0, app.endpoint);
        })
        .await;
}

#[tokio::test]
async fn action_failure_is_observable_but_still_reloads() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let (mut app, gateway) =
                test_app(vec![Err(FetchError::Status(500)), Ok("post-action logs".to_owned())]);
            app.action_endpoint = Some("http://host/deploy".to_owned());
            app.panel.set_viewport(80, 24);
            app.panel.set_content("stale logs".to_owned());

            trigger_action(&mut app);
            settle(&mut app).await;

            // the reload went ahead, but the failure is on record
            assert_eq!(app.panel.content(), "");
            assert_eq!(app.last_error.as_deref(), Some("HTTP error! status: 500"));
            assert!(app.refresh_in_flight);

            settle(&mut app).await;
            assert_eq!(app.panel.content(), "post-action logs");
            assert_eq!(gateway.request_count(), 2);
        })
        .await;
}

#[tokio::test]
async fn action_reply_that_is_not_json_counts_as_failure() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let (mut app, _gateway) =
                test_app(vec![Ok("<html>proxy error</html>".to_owned()), Ok(String::new())]);
            app.action_endpoint = Some("http://host/deploy".to_owned());

            trigger_action(&mut app);
            settle(&mut app).await;
            let error = app.last_error.as_deref().expect("decode failure recorded");
            assert!(error.starts_with("invalid response body"), "got: {error}");
        })
        .await;
}

#[tokio::test]
async fn action_without_endpoint_is_a_noop() {
    let (mut app, gateway) = test_app(vec![]);
    trigger_action(&mut app);
    assert!(!app.action_in_flight);
    assert_eq!(app.status, AppStatus::Idle);
    assert_eq!(gateway.request_count(), 0);
    assert!(app.event_rx.try_recv().is_err());
}

#[tokio::test]
async fn reload_rehumanizes_date_flagged_fields() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let (mut app, _gateway) =
                test_app(vec![Ok(r#"{"status":"ok"}"#.to_owned()), Ok(String::new())]);
            app.action_endpoint = Some("http://host/deploy".to_owned());
            app.context = serde_json::json!({"deployed_at": "2021-06-01T00:00:00Z"});

            trigger_action(&mut app);
            settle(&mut app).await;

            assert_eq!(app.fields.len(), 1);
            assert_eq!(app.fields[0].label, "deployed_at");
            assert!(
                app.fields[0].value.ends_with("ago"),
                "humanized on reload: {}",
                app.fields[0].value
            );
        })
        .await;
}
