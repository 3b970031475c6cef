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

mod actions;
mod events;
mod state;

pub use actions::trigger_action;
pub use events::{handle_app_event, handle_terminal_event, request_refresh};
pub use state::{App, AppEvent, AppStatus, HeaderField, header_fields};

use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt};

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let mut events = EventStream::new();
    let mut poll = tokio::time::interval(app.interval);
    poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        // Phase 1: wait for a terminal event, a resolved fetch, or the
        // poll tick (the first tick fires immediately — the initial load).
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                events::handle_terminal_event(app, event);
            }
            Some(event) = app.event_rx.recv() => {
                events::handle_app_event(app, event);
            }
            _ = poll.tick() => {
                events::request_refresh(app);
            }
        }

        // Phase 2: drain anything else already queued (non-blocking)
        loop {
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                events::handle_terminal_event(app, event);
                continue;
            }
            match app.event_rx.try_recv() {
                Ok(event) => events::handle_app_event(app, event),
                Err(_) => break,
            }
        }

        if app.should_quit {
            break;
        }

        // Phase 3: render once
        terminal.draw(|f| crate::ui::render(f, app))?;
    }

    ratatui::restore();
    Ok(())
}
