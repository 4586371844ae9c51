//! Record tree panel: cursor, expansion, and the single-line name prompt.
//!
//! The view never touches store state; every intent comes back as an
//! [`Action`] for the caller to dispatch.

use crate::kernel::{Action, FilesState};
use crate::models::{RecordId, RecordTree, TreeRow};

#[cfg(feature = "tui")]
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    NewFile,
    NewFolder,
    Rename,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
    /// Parent folder for creations, the renamed record for renames.
    pub target: Option<RecordId>,
}

pub struct TreeView {
    tree: RecordTree,
    synced_version: Option<u64>,
    rows: Vec<TreeRow>,
    cursor: usize,
    scroll_offset: usize,
    view_height: usize,
    prompt: Option<Prompt>,
    #[cfg(feature = "tui")]
    area: Option<ratatui::layout::Rect>,
}

impl Default for TreeView {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeView {
    pub fn new() -> Self {
        Self {
            tree: RecordTree::new(),
            synced_version: None,
            rows: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            view_height: 20,
            prompt: None,
            #[cfg(feature = "tui")]
            area: None,
        }
    }

    /// Rebuilds the hierarchy when the record list changed since the last
    /// sync. The cursor stays on the same record when it still exists.
    pub fn sync(&mut self, files: &FilesState) -> bool {
        if self.synced_version == Some(files.version) {
            return false;
        }
        self.synced_version = Some(files.version);

        let current = self.cursor_row().map(|r| r.record_id.clone());
        self.tree.rebuild(&files.file_items);
        self.refresh_rows();
        if let Some(id) = current {
            self.move_cursor_to(&id);
        }
        true
    }

    pub fn tree(&self) -> &RecordTree {
        &self.tree
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn cursor_row(&self) -> Option<&TreeRow> {
        self.rows.get(self.cursor)
    }

    pub fn set_view_height(&mut self, height: usize) -> bool {
        let height = height.max(1);
        if self.view_height == height {
            return false;
        }
        self.view_height = height;
        self.clamp_scroll();
        true
    }

    pub fn move_cursor(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let max = self.rows.len() as isize - 1;
        let next = (self.cursor as isize + delta).clamp(0, max) as usize;
        if next == self.cursor {
            return false;
        }
        self.cursor = next;
        self.clamp_scroll();
        true
    }

    pub fn select_row(&mut self, row: usize) -> bool {
        if row >= self.rows.len() || row == self.cursor {
            return false;
        }
        self.cursor = row;
        self.clamp_scroll();
        true
    }

    /// Puts the cursor on `id`, expanding its ancestors if needed.
    pub fn move_cursor_to(&mut self, id: &RecordId) -> bool {
        if self.tree.reveal(id) {
            self.refresh_rows();
        }
        match self.rows.iter().position(|r| &r.record_id == id) {
            Some(row) => {
                let changed = row != self.cursor;
                self.cursor = row;
                self.clamp_scroll();
                changed
            }
            None => {
                self.clamp_cursor();
                false
            }
        }
    }

    /// Selects the record under the cursor; folders also toggle expansion.
    pub fn activate(&mut self) -> Option<Action> {
        let row = self.cursor_row()?.clone();
        if row.is_folder {
            self.tree.toggle_expand(&row.record_id);
            self.refresh_rows();
        }
        Some(Action::Select(row.record_id))
    }

    pub fn expand_selected(&mut self) -> bool {
        let Some(row) = self.cursor_row().cloned() else {
            return false;
        };
        if !row.is_folder || !self.tree.expand(&row.record_id) {
            return false;
        }
        self.refresh_rows();
        true
    }

    /// Collapses the folder under the cursor, or jumps to the parent row.
    pub fn collapse_selected(&mut self) -> bool {
        let Some(row) = self.cursor_row().cloned() else {
            return false;
        };
        if row.is_folder && self.tree.collapse(&row.record_id) {
            self.refresh_rows();
            return true;
        }
        match self.tree.parent(&row.record_id).cloned() {
            Some(parent) => self.move_cursor_to(&parent),
            None => false,
        }
    }

    /// Folder new records go into: the folder under the cursor, else the
    /// cursor row's parent, else top level.
    pub fn creation_parent(&self) -> Option<RecordId> {
        let row = self.cursor_row()?;
        if row.is_folder {
            return Some(row.record_id.clone());
        }
        self.tree.parent(&row.record_id).cloned()
    }

    pub fn begin_new_file(&mut self) -> bool {
        self.open_prompt(PromptKind::NewFile, String::new(), self.creation_parent())
    }

    pub fn begin_new_folder(&mut self) -> bool {
        self.open_prompt(PromptKind::NewFolder, String::new(), self.creation_parent())
    }

    pub fn begin_rename(&mut self) -> bool {
        let Some(row) = self.cursor_row() else {
            return false;
        };
        let (name, id) = (row.name.clone(), row.record_id.clone());
        self.open_prompt(PromptKind::Rename, name, Some(id))
    }

    fn open_prompt(&mut self, kind: PromptKind, input: String, target: Option<RecordId>) -> bool {
        let prompt = Prompt {
            kind,
            input,
            target,
        };
        if self.prompt.as_ref() == Some(&prompt) {
            return false;
        }
        self.prompt = Some(prompt);
        true
    }

    pub fn prompt_insert(&mut self, ch: char) -> bool {
        match self.prompt.as_mut() {
            Some(prompt) if !ch.is_control() => {
                prompt.input.push(ch);
                true
            }
            _ => false,
        }
    }

    pub fn prompt_backspace(&mut self) -> bool {
        self.prompt
            .as_mut()
            .map(|p| p.input.pop().is_some())
            .unwrap_or(false)
    }

    pub fn cancel_prompt(&mut self) -> bool {
        self.prompt.take().is_some()
    }

    /// Closes the prompt and turns its input into an action. Blank input
    /// closes the prompt without one.
    pub fn commit_prompt(&mut self) -> Option<Action> {
        let prompt = self.prompt.take()?;
        let name = prompt.input.trim().to_string();
        if name.is_empty() {
            return None;
        }

        match prompt.kind {
            PromptKind::NewFile | PromptKind::NewFolder => {
                if let Some(parent) = prompt.target.as_ref() {
                    if self.tree.expand(parent) {
                        self.refresh_rows();
                    }
                }
                Some(if prompt.kind == PromptKind::NewFile {
                    Action::CreateFile {
                        name,
                        parent: prompt.target,
                    }
                } else {
                    Action::CreateFolder {
                        name,
                        parent: prompt.target,
                    }
                })
            }
            PromptKind::Rename => prompt.target.map(|id| Action::Rename { id, name }),
        }
    }

    fn refresh_rows(&mut self) {
        self.rows = self.tree.flatten_for_view();
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        if self.rows.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len() - 1;
        }
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.view_height {
            self.scroll_offset = self.cursor + 1 - self.view_height;
        }
        let max_offset = self.rows.len().saturating_sub(self.view_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/explorer.rs"]
mod tests;
