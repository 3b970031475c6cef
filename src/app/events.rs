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

use super::actions;
use super::{App, AppEvent, AppStatus};
use crate::refresh;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use std::rc::Rc;

const MOUSE_SCROLL_LINES: u32 = 3;

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => app.panel.scroll_up(MOUSE_SCROLL_LINES),
            MouseEventKind::ScrollDown => app.panel.scroll_down(MOUSE_SCROLL_LINES),
            _ => {}
        },
        // Resize is handled by ratatui; the panel viewport syncs on draw
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (KeyCode::Char('q' | 'Q'), _) | (KeyCode::Esc, _) => {
            app.should_quit = true;
        }
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.panel.scroll_up(1),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.panel.scroll_down(1),
        (KeyCode::PageUp, _) => app.panel.scroll_up(app.panel.visible_height()),
        (KeyCode::PageDown, _) => app.panel.scroll_down(app.panel.visible_height()),
        (KeyCode::Home, _) | (KeyCode::Char('g'), _) => app.panel.scroll_to_top(),
        // End re-engages tail following
        (KeyCode::End, _) | (KeyCode::Char('G'), _) => app.panel.scroll_to_bottom(),
        (KeyCode::Char('r'), _) => request_refresh(app),
        (KeyCode::Char('a'), _) => actions::trigger_action(app),
        _ => {}
    }
}

/// Start a refresh cycle: capture the anchor now, fetch in the
/// background, apply when `RefreshResolved` comes back. A trigger landing
/// while a cycle is outstanding is coalesced — the in-flight cycle's
/// anchor resolution stays authoritative.
pub fn request_refresh(app: &mut App) {
    if app.refresh_in_flight {
        tracing::debug!("refresh already in flight; coalescing trigger");
        return;
    }
    app.refresh_in_flight = true;
    app.status = AppStatus::Refreshing;

    let anchor = refresh::capture_anchor(&app.panel);
    let gateway = Rc::clone(&app.gateway);
    let endpoint = app.endpoint.clone();
    let context = app.context.clone();
    let event_tx = app.event_tx.clone();
    tokio::task::spawn_local(async move {
        let outcome = gateway.request(&endpoint, &context).await;
        if let Err(err) = &outcome {
            tracing::warn!(%endpoint, error = %err, "log refresh failed");
        }
        let _ = event_tx.send(AppEvent::RefreshResolved { anchor, outcome });
    });
}

pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::RefreshResolved { anchor, outcome } => {
            app.refresh_in_flight = false;
            match refresh::apply_outcome(&mut app.panel, &anchor, outcome) {
                Ok(()) => {
                    app.status = AppStatus::Idle;
                    app.last_error = None;
                }
                Err(err) => {
                    app.status = AppStatus::Failed;
                    app.last_error = Some(err.to_string());
                }
            }
        }
        AppEvent::ActionCompleted { error } => {
            app.action_in_flight = false;
            // Reload unconditionally; a failure stays visible in the
            // footer while the reloaded state comes in.
            app.reload();
            if let Some(err) = error {
                app.last_error = Some(err.to_string());
            }
            request_refresh(app);
        }
    }
}
