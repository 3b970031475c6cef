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

pub mod app;
pub mod error;
pub mod gateway;
pub mod panel;
pub mod refresh;
pub mod timefmt;
pub mod ui;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tailview", about = "Terminal viewer for remote log panels")]
pub struct Cli {
    /// Log endpoint URL (receives a POST with the JSON context)
    pub endpoint: String,

    /// Request context as a JSON object, e.g. '{"name":"web"}'
    #[arg(long, short)]
    pub context: Option<String>,

    /// Shorthand merged into the context as {"lines": N}
    #[arg(long, short = 'n')]
    pub lines: Option<u64>,

    /// Seconds between automatic refreshes
    #[arg(long, short, default_value_t = 5)]
    pub interval: u64,

    /// Action endpoint triggered by the `a` key (POST + full reload)
    #[arg(long)]
    pub action: Option<String>,

    /// Write tracing output to this file (TUI cannot log to stdout)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives, e.g. "tailview=debug"
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}
