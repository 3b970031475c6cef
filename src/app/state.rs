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

use crate::Cli;
use crate::error::FetchError;
use crate::gateway::{Gateway, HttpGateway};
use crate::panel::Panel;
use crate::refresh::ScrollAnchor;
use crate::timefmt::{self, DateMarked};
use crate::ui::WrapLayout;
use anyhow::Context as _;
use serde_json::{Map, Value};
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Events delivered back into the main loop by spawned fetches.
pub enum AppEvent {
    /// A refresh cycle's fetch resolved; apply it against the anchor
    /// captured when the cycle started.
    RefreshResolved { anchor: ScrollAnchor, outcome: Result<String, FetchError> },
    /// The generic action completed; commit the full reload. The failure,
    /// if any, was already logged by the spawned task.
    ActionCompleted { error: Option<FetchError> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Idle,
    Refreshing,
    Acting,
    Failed,
}

/// One line of page metadata shown in the header. A field carrying a
/// `date` attribute has its value rendered as a relative phrase, once per
/// page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub label: String,
    pub value: String,
    pub date: Option<String>,
}

impl DateMarked for HeaderField {
    fn date_attr(&self) -> Option<&str> {
        self.date.as_deref()
    }
    fn set_display(&mut self, text: String) {
        self.value = text;
    }
}

pub struct App {
    pub panel: Panel,
    pub endpoint: String,
    pub context: Value,
    pub action_endpoint: Option<String>,
    pub interval: Duration,
    pub fields: Vec<HeaderField>,
    pub status: AppStatus,
    /// Set while a refresh fetch is outstanding. Triggers arriving in the
    /// meantime are coalesced (dropped) — see DESIGN.md.
    pub refresh_in_flight: bool,
    pub action_in_flight: bool,
    pub should_quit: bool,
    /// Most recent failure message, shown in the footer until a refresh
    /// succeeds again.
    pub last_error: Option<String>,
    pub gateway: Rc<dyn Gateway>,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
    pub event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let context = build_context(cli)?;
        let gateway = HttpGateway::new()?;
        Ok(Self::with_gateway(cli, context, Rc::new(gateway)))
    }

    fn with_gateway(cli: &Cli, context: Value, gateway: Rc<dyn Gateway>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut fields = header_fields(&context);
        timefmt::apply_relative_dates(&mut fields);
        Self {
            // Viewport dimensions arrive with the first rendered frame.
            panel: Panel::new(Box::new(WrapLayout), 0, 0),
            endpoint: cli.endpoint.clone(),
            context,
            action_endpoint: cli.action.clone(),
            interval: Duration::from_secs(cli.interval.max(1)),
            fields,
            status: AppStatus::Idle,
            refresh_in_flight: false,
            action_in_flight: false,
            should_quit: false,
            last_error: None,
            gateway,
            event_tx,
            event_rx,
        }
    }

    /// The full-page-reload equivalent: drop all panel content and rebuild
    /// the header fields from the context, re-running the relative-date
    /// pass. The caller kicks off the follow-up refresh.
    pub fn reload(&mut self) {
        self.panel.reset();
        self.fields = header_fields(&self.context);
        timefmt::apply_relative_dates(&mut self.fields);
        self.status = AppStatus::Idle;
    }

    /// Build a minimal `App` for tests: no real gateway, no terminal —
    /// just state. Tests swap in their own `gateway` as needed.
    pub fn test_default() -> Self {
        struct NoGateway;

        #[async_trait::async_trait(?Send)]
        impl Gateway for NoGateway {
            async fn request(&self, _: &str, _: &Value) -> Result<String, FetchError> {
                Err(FetchError::Transport("no gateway configured".to_owned()))
            }
        }

        let cli = Cli {
            endpoint: "http://localhost/logs".to_owned(),
            context: None,
            lines: None,
            interval: 5,
            action: None,
            log_file: None,
            log_filter: None,
            log_append: false,
        };
        Self::with_gateway(&cli, Value::Object(Map::new()), Rc::new(NoGateway))
    }
}

fn build_context(cli: &Cli) -> anyhow::Result<Value> {
    let mut context = match cli.context.as_deref() {
        Some(raw) => serde_json::from_str(raw).context("--context is not valid JSON")?,
        None => Value::Object(Map::new()),
    };
    if let Some(lines) = cli.lines {
        match context.as_object_mut() {
            Some(map) => {
                map.insert("lines".to_owned(), Value::from(lines));
            }
            None => anyhow::bail!("--lines requires the context to be a JSON object"),
        }
    }
    Ok(context)
}

/// Project the request context into header fields. String values under
/// date-ish keys get the date attribute, marking them for relative-time
/// rendering.
pub fn header_fields(context: &Value) -> Vec<HeaderField> {
    let Some(map) = context.as_object() else {
        return Vec::new();
    };
    map.iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let date = (value.is_string() && is_date_key(key)).then(|| text.clone());
            HeaderField { label: key.clone(), value: text, date }
        })
        .collect()
}

fn is_date_key(key: &str) -> bool {
    key.ends_with("_at")
        || key.ends_with("_date")
        || matches!(key, "date" | "timestamp" | "updated" | "created")
}
