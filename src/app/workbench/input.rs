use super::{EventResult, Workbench};
use crate::kernel::{Action, FocusTarget};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::Instant;

const PAGE_ROWS: isize = 10;

impl Workbench {
    pub fn focus(&self) -> FocusTarget {
        self.store.state().ui.focus
    }

    pub fn handle_key(&mut self, event: KeyEvent, now: Instant) -> EventResult {
        if event.kind == KeyEventKind::Release {
            return EventResult::Ignored;
        }
        if let Some(result) = self.handle_global_key(&event) {
            return result;
        }
        let changed = match self.focus() {
            FocusTarget::Explorer => self.handle_explorer_key(&event),
            FocusTarget::Editor => self.handle_editor_key(&event, now),
        };
        if changed {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    fn handle_global_key(&mut self, event: &KeyEvent) -> Option<EventResult> {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Char('q') if ctrl => Some(EventResult::Quit),
            KeyCode::Char('b') if ctrl => {
                self.toggle_sidebar();
                Some(EventResult::Consumed)
            }
            KeyCode::Char('s') if ctrl => {
                self.save_viewing();
                Some(EventResult::Consumed)
            }
            KeyCode::Char('w') if ctrl => {
                if let Some(id) = self.store.state().files.selected_file_id.clone() {
                    self.dispatch(Action::CloseTab(id));
                }
                Some(EventResult::Consumed)
            }
            KeyCode::Char('r') if ctrl => {
                self.dispatch(Action::FetchAll);
                Some(EventResult::Consumed)
            }
            KeyCode::F(5) => {
                self.dispatch(Action::FetchAll);
                Some(EventResult::Consumed)
            }
            KeyCode::PageDown if ctrl => {
                self.cycle_tab(1);
                Some(EventResult::Consumed)
            }
            KeyCode::PageUp if ctrl => {
                self.cycle_tab(-1);
                Some(EventResult::Consumed)
            }
            _ => None,
        }
    }

    fn handle_explorer_key(&mut self, event: &KeyEvent) -> bool {
        if self.tree.prompt().is_some() {
            return match event.code {
                KeyCode::Enter => {
                    let action = self.tree.commit_prompt();
                    if let Some(action) = action {
                        self.dispatch(action);
                    }
                    true
                }
                KeyCode::Esc => self.tree.cancel_prompt(),
                KeyCode::Backspace => self.tree.prompt_backspace(),
                KeyCode::Char(ch) => self.tree.prompt_insert(ch),
                _ => false,
            };
        }

        match event.code {
            KeyCode::Up | KeyCode::Char('k') => self.tree.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.tree.move_cursor(1),
            KeyCode::PageUp => self.tree.move_cursor(-PAGE_ROWS),
            KeyCode::PageDown => self.tree.move_cursor(PAGE_ROWS),
            KeyCode::Right | KeyCode::Char('l') => self.tree.expand_selected(),
            KeyCode::Left | KeyCode::Char('h') => self.tree.collapse_selected(),
            KeyCode::Enter => self.activate_tree_row(),
            KeyCode::Char('n') => self.tree.begin_new_file(),
            KeyCode::Char('N') | KeyCode::Char('f') => self.tree.begin_new_folder(),
            KeyCode::Char('r') | KeyCode::F(2) => self.tree.begin_rename(),
            KeyCode::Tab => self.dispatch(Action::SetFocus(FocusTarget::Editor)),
            KeyCode::Esc => self.dispatch(Action::DismissNotification),
            _ => false,
        }
    }

    fn handle_editor_key(&mut self, event: &KeyEvent, now: Instant) -> bool {
        if event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match event.code {
            KeyCode::Esc => self.dispatch(Action::SetFocus(FocusTarget::Explorer)),
            KeyCode::Char(ch) => self.editor.insert_char(ch, now),
            KeyCode::Enter => self.editor.insert_newline(now),
            KeyCode::Tab => self.editor.insert_tab(now),
            KeyCode::Backspace => self.editor.backspace(now),
            KeyCode::Delete => self.editor.delete(now),
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Up => self.editor.move_up(),
            KeyCode::Down => self.editor.move_down(),
            KeyCode::Home => self.editor.move_home(),
            KeyCode::End => self.editor.move_end(),
            _ => false,
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        let MouseEventKind::Down(MouseButton::Left) = event.kind else {
            return false;
        };
        if let Some(row) = self.tree.hit_test_row(event.column, event.row) {
            let mut changed = self.dispatch(Action::SetFocus(FocusTarget::Explorer));
            changed |= self.tree.select_row(row);
            changed |= self.activate_tree_row();
            return changed;
        }
        if self.editor.contains(event.column, event.row) {
            return self.dispatch(Action::SetFocus(FocusTarget::Editor));
        }
        false
    }

    fn activate_tree_row(&mut self) -> bool {
        let Some(action) = self.tree.activate() else {
            return false;
        };
        let opens_file = match &action {
            Action::Select(id) => self
                .store
                .state()
                .files
                .record(id)
                .is_some_and(|r| !r.is_folder()),
            _ => false,
        };
        self.dispatch(action);
        if opens_file {
            self.dispatch(Action::SetFocus(FocusTarget::Editor));
        }
        true
    }

    /// Flushes pending edits into the store, then persists the content.
    fn save_viewing(&mut self) {
        if let Some(update) = self.editor.flush() {
            self.dispatch(update);
        }
        if let Some(id) = self.editor.viewing().cloned() {
            self.dispatch(Action::SaveContent { id });
        }
    }

    fn cycle_tab(&mut self, delta: isize) -> bool {
        let files = &self.store.state().files;
        let len = files.open_tabs.len();
        if len == 0 {
            return false;
        }
        // a closed selection counts as sitting just outside the tab list
        let current = files
            .selected_file_id
            .as_ref()
            .and_then(|id| files.open_tabs.iter().position(|t| t == id))
            .map(|pos| pos as isize)
            .unwrap_or(if delta > 0 { -1 } else { len as isize });
        let next = (current + delta).rem_euclid(len as isize) as usize;
        let id = files.open_tabs[next].clone();
        self.dispatch(Action::Select(id))
    }
}
