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

use super::{App, AppEvent, AppStatus};
use serde::Deserialize;
use std::rc::Rc;

/// Shape of a generic action reply. Servers answer actions with a small
/// JSON document; only the status line is interesting for diagnostics.
#[derive(Debug, Default, Deserialize)]
struct ActionReply {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Fire the generic action endpoint and, on completion, commit a full
/// reload. Fire-and-forget from the UI's perspective: the action's true
/// outcome is only observable via the reloaded page state, but its
/// failure is logged and surfaced in the footer before the reload lands.
pub fn trigger_action(app: &mut App) {
    let Some(endpoint) = app.action_endpoint.clone() else {
        return;
    };
    if app.action_in_flight {
        tracing::debug!("action already in flight; ignoring trigger");
        return;
    }
    app.action_in_flight = true;
    app.status = AppStatus::Acting;

    let gateway = Rc::clone(&app.gateway);
    let context = app.context.clone();
    let event_tx = app.event_tx.clone();
    tokio::task::spawn_local(async move {
        let error = match gateway.request_json(&endpoint, &context).await {
            Ok(body) => {
                let reply: ActionReply = serde_json::from_value(body).unwrap_or_default();
                tracing::info!(
                    %endpoint,
                    status = reply.status.as_deref().unwrap_or("-"),
                    message = reply.message.as_deref().unwrap_or("-"),
                    "action completed"
                );
                None
            }
            Err(err) => {
                tracing::warn!(%endpoint, error = %err, "action failed; reloading anyway");
                Some(err)
            }
        };
        let _ = event_tx.send(AppEvent::ActionCompleted { error });
    });
}
