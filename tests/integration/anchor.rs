// Headless scroll-anchor behavior through the composed `refresh`
// operation: capture, fetch, replace, restore — no terminal involved.

use crate::helpers::{MockGateway, height_content, height_panel};
use pretty_assertions::assert_eq;
use serde_json::json;
use tailview::error::FetchError;
use tailview::refresh;

#[tokio::test]
async fn near_bottom_panel_follows_the_new_tail() {
    // total 60, offset 35, visible 30: distance -5, inside the threshold
    let mut panel = height_panel(&[20, 20, 20], 30);
    panel.set_scroll_offset(35);

    let gateway = MockGateway::new(vec![Ok(height_content(&[20, 20, 20, 20]))]);
    refresh::refresh(&mut panel, &*gateway, "http://host/logs", &json!({}))
        .await
        .expect("refresh succeeds");

    // bottom-aligned against the new total height
    assert_eq!(panel.scroll_offset(), 80);
}

#[tokio::test]
async fn reader_in_history_keeps_their_entry_aligned() {
    // offset 25 sits inside entry 1's extent [20, 40); far from the bottom
    let mut panel = height_panel(&[20; 10], 30);
    panel.set_scroll_offset(25);

    let gateway = MockGateway::new(vec![Ok(height_content(&[30; 10]))]);
    refresh::refresh(&mut panel, &*gateway, "http://host/logs", &json!({}))
        .await
        .expect("refresh succeeds");

    // ordinal correspondence: the new entry 1's top edge hits the viewport top
    assert_eq!(panel.scroll_offset(), 30);
}

#[tokio::test]
async fn replaying_identical_content_is_a_noop_on_position() {
    let mut panel = height_panel(&[20; 10], 30);
    panel.set_scroll_offset(40);

    let gateway = MockGateway::new(vec![Ok(height_content(&[20; 10]))]);
    refresh::refresh(&mut panel, &*gateway, "http://host/logs", &json!({}))
        .await
        .expect("refresh succeeds");

    assert_eq!(panel.scroll_offset(), 40);
}

#[tokio::test]
async fn failed_fetch_shows_error_text_and_preserves_offset() {
    let mut panel = height_panel(&[20, 20, 20], 30);
    panel.set_scroll_offset(35);

    let gateway = MockGateway::new(vec![Err(FetchError::Status(500))]);
    let result = refresh::refresh(&mut panel, &*gateway, "http://host/logs", &json!({})).await;

    assert!(result.is_err());
    assert_eq!(panel.content(), "Error: HTTP error! status: 500");
    // near-bottom before the failure, but failure never auto-follows
    assert_eq!(panel.scroll_offset(), 35);
}

#[tokio::test]
async fn refresh_posts_the_caller_context() {
    let mut panel = height_panel(&[], 30);
    let gateway = MockGateway::new(vec![Ok(height_content(&[20]))]);
    let context = json!({"name": "web", "lines": 100});

    refresh::refresh(&mut panel, &*gateway, "http://host/logs", &context)
        .await
        .expect("refresh succeeds");

    let requests = gateway.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "http://host/logs");
    assert_eq!(requests[0].1, context);
}
