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

mod header;
mod log_panel;
pub mod theme;

pub use log_panel::WrapLayout;

use crate::app::App;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const FOOTER_PAD: u16 = 2;
const FOOTER_COLUMN_GAP: u16 = 1;

pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = frame.area();

    if frame_area.height < 6 {
        // Ultra-compact: the log panel gets everything
        log_panel::render(frame, frame_area, app);
        return;
    }

    let header_height: u16 = if app.fields.is_empty() { 1 } else { 2 };
    let [header, header_sep, body, footer_sep, footer] = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame_area);

    header::render(frame, header, app);
    render_separator(frame, header_sep);
    log_panel::render(frame, body, app);
    render_separator(frame, footer_sep);
    render_footer(frame, footer, app);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };

    let hints = if app.action_endpoint.is_some() {
        "r: refresh  a: action  ↑/↓ PgUp/PgDn: scroll  End: follow  q: quit"
    } else {
        "r: refresh  ↑/↓ PgUp/PgDn: scroll  End: follow  q: quit"
    };

    // Most recent failure on the right, until a refresh succeeds again
    match &app.last_error {
        Some(error) => {
            let (left_area, right_area) = split_footer_columns(padded);
            let line = Line::from(Span::styled(hints, Style::default().fg(theme::DIM)));
            frame.render_widget(Paragraph::new(line), left_area);
            if let Some(fitted) = fit_footer_text(error, usize::from(right_area.width)) {
                let line = Line::from(Span::styled(fitted, Style::default().fg(Color::Red)));
                frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), right_area);
            }
        }
        None => {
            let line = Line::from(Span::styled(hints, Style::default().fg(theme::DIM)));
            frame.render_widget(Paragraph::new(line), padded);
        }
    }
}

fn split_footer_columns(area: Rect) -> (Rect, Rect) {
    if area.width == 0 {
        return (area, Rect { width: 0, ..area });
    }

    let gap = if area.width > 2 { FOOTER_COLUMN_GAP } else { 0 };
    let usable_width = area.width.saturating_sub(gap);
    let left_width = usable_width.saturating_add(1) / 2;
    let right_width = usable_width.saturating_sub(left_width);

    let left = Rect { width: left_width, ..area };
    let right = Rect {
        x: area.x.saturating_add(left_width).saturating_add(gap),
        width: right_width,
        ..area
    };
    (left, right)
}

fn fit_footer_text(text: &str, max_width: usize) -> Option<String> {
    if max_width == 0 || text.trim().is_empty() {
        return None;
    }

    if UnicodeWidthStr::width(text) <= max_width {
        return Some(text.to_owned());
    }

    if max_width <= 3 {
        return Some(".".repeat(max_width));
    }

    let mut fitted = String::new();
    let mut width: usize = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width.saturating_add(ch_width).saturating_add(3) > max_width {
            break;
        }
        fitted.push(ch);
        width = width.saturating_add(ch_width);
    }

    if fitted.is_empty() {
        return Some("...".to_owned());
    }
    fitted.push_str("...");
    Some(fitted)
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(area.width as usize);
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}
