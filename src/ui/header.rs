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

use crate::app::App;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_PAD: u16 = 2;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + HEADER_PAD,
        y: area.y,
        width: area.width.saturating_sub(HEADER_PAD * 2),
        height: area.height,
    };

    let sep = || Span::styled("  \u{2502}  ", Style::default().fg(theme::DIM));
    let (status_label, status_color) = theme::status_badge(app.status);

    let mut lines = vec![Line::from(vec![
        Span::styled("tailview", Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)),
        sep(),
        Span::styled("Endpoint: ", Style::default().fg(theme::DIM)),
        Span::styled(&app.endpoint, Style::default().fg(Color::White)),
        sep(),
        Span::styled(status_label, Style::default().fg(status_color)),
    ])];

    // Second line: context-derived fields, date-flagged values already
    // humanized by the page-load pass.
    if !app.fields.is_empty() && area.height > 1 {
        let mut spans = Vec::new();
        for (i, field) in app.fields.iter().enumerate() {
            if i > 0 {
                spans.push(sep());
            }
            spans.push(Span::styled(
                format!("{}: ", field.label),
                Style::default().fg(theme::DIM),
            ));
            spans.push(Span::styled(field.value.clone(), Style::default().fg(Color::White)));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), padded);
}
