//! Editing pane for the selected record.
//!
//! The buffer is a snapshot of the store taken on selection change. Local
//! edits stay in the buffer until the debounce elapses (or the selection
//! moves), then leave as a single `UpdateContent` action.

use crate::kernel::services::ports::EditorSettings;
use crate::kernel::{Action, FilesState};
use crate::models::RecordId;
use ropey::{Rope, RopeSlice};
use std::time::{Duration, Instant};

#[cfg(feature = "tui")]
mod render;

pub struct EditorView {
    viewing: Option<RecordId>,
    editable: bool,
    rope: Rope,
    cursor: (usize, usize),
    scroll_row: usize,
    dirty_since: Option<Instant>,
    synced_version: Option<u64>,
    debounce: Duration,
    tab_size: u8,
    show_line_numbers: bool,
    #[cfg(feature = "tui")]
    area: Option<ratatui::layout::Rect>,
}

impl EditorView {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            viewing: None,
            editable: false,
            rope: Rope::new(),
            cursor: (0, 0),
            scroll_row: 0,
            dirty_since: None,
            synced_version: None,
            debounce: Duration::from_millis(settings.content_debounce_ms),
            tab_size: settings.tab_size.max(1),
            show_line_numbers: settings.show_line_numbers,
            #[cfg(feature = "tui")]
            area: None,
        }
    }

    pub fn viewing(&self) -> Option<&RecordId> {
        self.viewing.as_ref()
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    /// Follows the store's selection. When the selection moved away from a
    /// buffer with pending edits, the returned action carries them.
    pub fn sync(&mut self, files: &FilesState) -> Option<Action> {
        let selected = files.selected_file_id.clone();
        if selected != self.viewing {
            let flushed = self.flush();
            self.load(files, selected);
            self.synced_version = Some(files.version);
            return flushed;
        }

        if self.synced_version == Some(files.version) {
            return None;
        }
        self.synced_version = Some(files.version);
        if self.is_dirty() {
            return None;
        }

        let record = self.viewing.as_ref().and_then(|id| files.record(id));
        match record.and_then(|r| r.content()) {
            Some(content) => {
                if self.rope != content {
                    self.rope = Rope::from_str(content);
                    self.clamp_cursor();
                }
                self.editable = true;
            }
            None => {
                self.rope = Rope::new();
                self.editable = false;
                self.cursor = (0, 0);
            }
        }
        None
    }

    fn load(&mut self, files: &FilesState, selected: Option<RecordId>) {
        let content = selected
            .as_ref()
            .and_then(|id| files.record(id))
            .and_then(|r| r.content());
        self.editable = content.is_some();
        self.rope = Rope::from_str(content.unwrap_or(""));
        self.viewing = selected;
        self.cursor = (0, 0);
        self.scroll_row = 0;
        self.dirty_since = None;
    }

    /// Emits the pending edit once the buffer has been quiet for the debounce
    /// interval.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<Action> {
        let since = self.dirty_since?;
        if now.saturating_duration_since(since) < self.debounce {
            return None;
        }
        self.flush()
    }

    /// Emits any pending edit immediately.
    pub fn flush(&mut self) -> Option<Action> {
        self.dirty_since.take()?;
        let id = self.viewing.clone()?;
        Some(Action::UpdateContent {
            id,
            content: self.rope.to_string(),
        })
    }

    fn char_index(&self) -> usize {
        let (row, col) = self.cursor;
        self.rope.line_to_char(row) + col
    }

    fn mark_edited(&mut self, now: Instant) {
        self.dirty_since = Some(now);
    }

    pub fn insert_char(&mut self, ch: char, now: Instant) -> bool {
        if !self.editable {
            return false;
        }
        let idx = self.char_index();
        self.rope.insert_char(idx, ch);
        if ch == '\n' {
            self.cursor = (self.cursor.0 + 1, 0);
        } else {
            self.cursor.1 += 1;
        }
        self.mark_edited(now);
        true
    }

    pub fn insert_newline(&mut self, now: Instant) -> bool {
        self.insert_char('\n', now)
    }

    pub fn insert_tab(&mut self, now: Instant) -> bool {
        if !self.editable {
            return false;
        }
        let idx = self.char_index();
        let spaces = " ".repeat(self.tab_size as usize);
        self.rope.insert(idx, &spaces);
        self.cursor.1 += self.tab_size as usize;
        self.mark_edited(now);
        true
    }

    pub fn backspace(&mut self, now: Instant) -> bool {
        if !self.editable {
            return false;
        }
        let idx = self.char_index();
        if idx == 0 {
            return false;
        }
        let (row, col) = self.cursor;
        let new_cursor = if col > 0 {
            (row, col - 1)
        } else {
            (row - 1, line_len_chars(self.rope.line(row - 1)))
        };
        let start = self.rope.line_to_char(new_cursor.0) + new_cursor.1;
        self.rope.remove(start..idx);
        self.cursor = new_cursor;
        self.mark_edited(now);
        true
    }

    pub fn delete(&mut self, now: Instant) -> bool {
        if !self.editable {
            return false;
        }
        let idx = self.char_index();
        if idx >= self.rope.len_chars() {
            return false;
        }
        let (row, col) = self.cursor;
        // a line break (CRLF included) goes in one step
        let end = if col == line_len_chars(self.rope.line(row)) {
            self.rope.line_to_char(row + 1)
        } else {
            idx + 1
        };
        self.rope.remove(idx..end);
        self.mark_edited(now);
        true
    }

    pub fn move_left(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col > 0 {
            self.cursor.1 -= 1;
        } else if row > 0 {
            self.cursor = (row - 1, line_len_chars(self.rope.line(row - 1)));
        } else {
            return false;
        }
        true
    }

    pub fn move_right(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col < line_len_chars(self.rope.line(row)) {
            self.cursor.1 += 1;
        } else if row + 1 < self.line_count() {
            self.cursor = (row + 1, 0);
        } else {
            return false;
        }
        true
    }

    pub fn move_up(&mut self) -> bool {
        if self.cursor.0 == 0 {
            return false;
        }
        self.cursor.0 -= 1;
        self.clamp_cursor();
        true
    }

    pub fn move_down(&mut self) -> bool {
        if self.cursor.0 + 1 >= self.line_count() {
            return false;
        }
        self.cursor.0 += 1;
        self.clamp_cursor();
        true
    }

    pub fn move_home(&mut self) -> bool {
        let changed = self.cursor.1 != 0;
        self.cursor.1 = 0;
        changed
    }

    pub fn move_end(&mut self) -> bool {
        let end = line_len_chars(self.rope.line(self.cursor.0));
        let changed = self.cursor.1 != end;
        self.cursor.1 = end;
        changed
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    /// Keeps the cursor row inside `[scroll_row, scroll_row + height)`.
    pub fn scroll_to_cursor(&mut self, height: usize) {
        let height = height.max(1);
        let row = self.cursor.0;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + height {
            self.scroll_row = row + 1 - height;
        }
    }

    fn clamp_cursor(&mut self) {
        let last_row = self.line_count() - 1;
        self.cursor.0 = self.cursor.0.min(last_row);
        let len = line_len_chars(self.rope.line(self.cursor.0));
        self.cursor.1 = self.cursor.1.min(len);
    }
}

/// Line length in chars without the trailing line break. Matches ropey's
/// line breaks: LF, CRLF, lone CR, VT, FF, NEL, LS and PS.
fn line_len_chars(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }
    match line.char(len - 1) {
        '\n' if len >= 2 && line.char(len - 2) == '\r' => len - 2,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => len - 1,
        _ => len,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/editor.rs"]
mod tests;
