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
use crate::panel::Layout;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Wrap};

/// One entry per content line, measured with the same word-wrap the
/// paragraph renders with, so entry heights always match what is on
/// screen.
pub struct WrapLayout;

impl Layout for WrapLayout {
    fn measure(&self, content: &str, width: u32) -> Vec<u32> {
        content
            .lines()
            .map(|line| {
                if width == 0 {
                    return 1;
                }
                let paragraph =
                    Paragraph::new(line.to_owned()).wrap(Wrap { trim: false });
                let rows = paragraph.line_count(u16::try_from(width).unwrap_or(u16::MAX));
                u32::try_from(rows).unwrap_or(u32::MAX).max(1)
            })
            .collect()
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    // Sync the panel's viewport with the drawn area; a width change
    // re-measures entry heights so anchors line up with what is on screen.
    app.panel.set_viewport(u32::from(area.width), u32::from(area.height));

    let failed = app.panel.content().starts_with("Error: ");
    let style =
        if failed { Style::default().fg(theme::STATUS_ERROR) } else { Style::default() };
    let lines: Vec<Line> = app
        .panel
        .content()
        .lines()
        .map(|line| Line::styled(line.to_owned(), style))
        .collect();

    // The stored offset may sit past max_scroll while following the tail;
    // the drawn offset is the clamped one.
    let offset = u16::try_from(app.panel.display_offset()).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).scroll((offset, 0));
    frame.render_widget(paragraph, area);
}
