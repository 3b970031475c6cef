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

/// Uniform fetch-failure value. Transport errors, non-2xx statuses and
/// body-decode errors all collapse into this one type — callers never
/// branch on the variant, they only render the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// Message rendered inside a panel when a refresh cycle fails.
    #[must_use]
    pub fn panel_text(&self) -> String {
        format!("Error: {self}")
    }
}
