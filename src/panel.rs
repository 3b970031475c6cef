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

/// Measurement seam owned by the rendering layer: splits raw content into
/// entry heights, top to bottom. Entries exist only as a side effect of
/// this measurement and are rebuilt on every content install.
pub trait Layout {
    fn measure(&self, content: &str, width: u32) -> Vec<u32>;
}

/// One discrete rendered unit inside a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Distance from the top of the panel content to this entry's top edge.
    pub offset_top: u32,
    pub height: u32,
}

/// A scrollable viewport over an ordered sequence of entries.
///
/// Owned and passed by reference — never looked up ambiently — so the
/// refresh algorithm is testable without a rendering environment. Content
/// is replaced wholesale; entries are discarded and rebuilt each time.
pub struct Panel {
    content: String,
    entries: Vec<Entry>,
    scroll_offset: u32,
    visible_height: u32,
    width: u32,
    layout: Box<dyn Layout>,
}

impl Panel {
    pub fn new(layout: Box<dyn Layout>, width: u32, visible_height: u32) -> Self {
        Self {
            content: String::new(),
            entries: Vec::new(),
            scroll_offset: 0,
            visible_height,
            width,
            layout,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn visible_height(&self) -> u32 {
        self.visible_height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn total_height(&self) -> u32 {
        self.entries.last().map_or(0, |e| e.offset_top.saturating_add(e.height))
    }

    pub fn max_scroll(&self) -> u32 {
        self.total_height().saturating_sub(self.visible_height)
    }

    /// Raw stored offset. May exceed `max_scroll` when the panel is
    /// following the tail (the follow convention stores `total_height`).
    pub fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    /// Offset actually drawn: the stored offset clamped to the scrollable
    /// range, satisfying `0 <= offset <= max(0, total - visible)`.
    pub fn display_offset(&self) -> u32 {
        self.scroll_offset.min(self.max_scroll())
    }

    /// Store an exact offset. Anchor restoration needs verbatim writes, so
    /// no clamping happens here — user scrolling goes through the clamped
    /// `scroll_*` methods instead.
    pub fn set_scroll_offset(&mut self, offset: u32) {
        self.scroll_offset = offset;
    }

    pub fn scroll_up(&mut self, amount: u32) {
        self.scroll_offset = self.display_offset().saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u32) {
        self.scroll_offset = self.display_offset().saturating_add(amount).min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Jump to the very bottom. Stores `total_height`, which keeps the
    /// near-bottom test true so subsequent refreshes follow the tail.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.total_height();
    }

    /// Full destructive replace: install new content and rebuild every
    /// entry from the layout. Scroll offset is left untouched — the
    /// refresh cycle resolves it against the new entries afterwards.
    pub fn set_content(&mut self, content: String) {
        self.entries = build_entries(self.layout.measure(&content, self.width));
        self.content = content;
    }

    /// Update the viewport dimensions; a width change re-measures the
    /// current content since wrapped heights depend on it.
    pub fn set_viewport(&mut self, width: u32, visible_height: u32) {
        self.visible_height = visible_height;
        if width != self.width {
            self.width = width;
            self.entries = build_entries(self.layout.measure(&self.content, width));
        }
    }

    /// Back to the initial page state: no content, no entries, offset 0.
    pub fn reset(&mut self) {
        self.content.clear();
        self.entries.clear();
        self.scroll_offset = 0;
    }
}

fn build_entries(heights: Vec<u32>) -> Vec<Entry> {
    let mut offset_top: u32 = 0;
    heights
        .into_iter()
        .map(|height| {
            let entry = Entry { offset_top, height };
            offset_top = offset_top.saturating_add(height);
            entry
        })
        .collect()
}
