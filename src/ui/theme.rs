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

use crate::app::AppStatus;
use ratatui::style::Color;

// Accent
pub const ACCENT: Color = Color::Rgb(244, 118, 0);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const SEPARATOR_CHAR: &str = "─";

// Status colors
pub const STATUS_BUSY: Color = Color::Cyan;
pub const STATUS_ERROR: Color = Color::Red;
pub const STATUS_OK: Color = Color::Green;

/// Label + color pair for the header status indicator.
pub fn status_badge(status: AppStatus) -> (&'static str, Color) {
    match status {
        AppStatus::Idle => ("idle", STATUS_OK),
        AppStatus::Refreshing => ("refreshing…", STATUS_BUSY),
        AppStatus::Acting => ("action…", STATUS_BUSY),
        AppStatus::Failed => ("failed", STATUS_ERROR),
    }
}
