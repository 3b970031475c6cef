// tailview — a terminal viewer for remote log panels
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Scroll-anchored refresh.
//!
//! A refresh replaces a panel's content wholesale — the upstream source is
//! an opaque rendered blob, so there is no diffing or merging. The anchor
//! captured before the replacement decides what the reader gets back
//! afterwards: a reader at (or near) the tail keeps following new output,
//! a reader up in the history keeps the entry they were looking at aligned
//! with the viewport top.
//!
//! Entry correspondence across the replacement is ordinal: the new
//! content's Nth entry is treated as the successor of the old Nth entry.
//! That is only correct for order-stable, append-ish content (true for a
//! log tail) and is deliberately not a content-addressed diff.

use crate::error::FetchError;
use crate::gateway::Gateway;
use crate::panel::Panel;
use serde_json::Value;

/// Distance from the true bottom below which the reader is treated as
/// following the tail.
pub const NEAR_BOTTOM_THRESHOLD: u32 = 50;

/// Snapshot taken at the start of a refresh cycle and consumed at its end;
/// never outlives the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollAnchor {
    offset_before: u32,
    kind: AnchorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorKind {
    /// At or near the tail: auto-follow new output.
    Bottom,
    /// Ordinal index of the entry whose vertical extent contained the
    /// offset at capture time. Positional, not content-based — entries are
    /// destroyed and rebuilt across the replacement.
    Entry(usize),
    /// Nothing to anchor to: restore the offset, clamped.
    Offset,
}

impl ScrollAnchor {
    pub fn offset_before(&self) -> u32 {
        self.offset_before
    }
}

/// Read the panel's pre-replacement state. The near-bottom test is signed:
/// a follow-state offset stored past `max_scroll` makes the distance
/// negative.
pub fn capture_anchor(panel: &Panel) -> ScrollAnchor {
    let offset_before = panel.scroll_offset();
    let distance = i64::from(panel.total_height())
        - i64::from(offset_before)
        - i64::from(panel.visible_height());
    if distance < i64::from(NEAR_BOTTOM_THRESHOLD) {
        return ScrollAnchor { offset_before, kind: AnchorKind::Bottom };
    }

    // Top-to-bottom scan for the entry under the viewport's top edge.
    let containing = panel.entries().iter().position(|e| {
        offset_before >= e.offset_top && offset_before < e.offset_top.saturating_add(e.height)
    });
    let kind = match containing {
        Some(index) => AnchorKind::Entry(index),
        None if panel.entries().is_empty() => AnchorKind::Offset,
        None => AnchorKind::Entry(0),
    };
    ScrollAnchor { offset_before, kind }
}

/// Resolve the anchor against freshly installed content.
pub fn restore_after_replace(panel: &mut Panel, anchor: &ScrollAnchor) {
    match anchor.kind {
        AnchorKind::Bottom => {
            // Follow the tail: store the full content height; the draw
            // path clamps to the drawable range.
            panel.set_scroll_offset(panel.total_height());
        }
        AnchorKind::Entry(index) => {
            let entry_top = panel.entry(index).map(|e| e.offset_top);
            match entry_top {
                Some(top) => panel.set_scroll_offset(top),
                // New content has fewer entries than the anchor ordinal;
                // same rule as having no anchor at all.
                None => panel.set_scroll_offset(anchor.offset_before.min(panel.max_scroll())),
            }
        }
        AnchorKind::Offset => {
            panel.set_scroll_offset(anchor.offset_before.min(panel.max_scroll()));
        }
    }
}

/// Install a fetch outcome: new content with anchor resolution on success,
/// inline error text with the exact prior offset on failure. Failure never
/// auto-follows, even from a near-bottom capture.
pub fn apply_outcome(
    panel: &mut Panel,
    anchor: &ScrollAnchor,
    outcome: Result<String, FetchError>,
) -> Result<(), FetchError> {
    match outcome {
        Ok(content) => {
            panel.set_content(content);
            restore_after_replace(panel, anchor);
            Ok(())
        }
        Err(err) => {
            panel.set_content(err.panel_text());
            panel.set_scroll_offset(anchor.offset_before);
            Err(err)
        }
    }
}

/// One full refresh cycle: capture, fetch, replace, restore. The gateway
/// call is the sole suspension point; `panel` is borrowed mutably across
/// it, so two overlapping cycles on one panel are unrepresentable.
pub async fn refresh<G>(
    panel: &mut Panel,
    gateway: &G,
    endpoint: &str,
    context: &Value,
) -> Result<(), FetchError>
where
    G: Gateway + ?Sized,
{
    let anchor = capture_anchor(panel);
    let outcome = gateway.request(endpoint, context).await;
    if let Err(err) = &outcome {
        tracing::warn!(endpoint, error = %err, "log refresh failed");
    }
    apply_outcome(panel, &anchor, outcome)
}
