use super::{Action, AppState, Effect};

mod files;
mod remote;

#[derive(Debug, Default)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn with_effect(effect: Effect, state_changed: bool) -> Self {
        Self {
            effects: vec![effect],
            state_changed,
        }
    }
}

/// Single owner of the application state. Views read through [`Store::state`]
/// and mutate only by dispatching actions.
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        tracing::trace!(?action, "dispatch");
        match action {
            Action::FetchAll
            | Action::FetchSucceeded(_)
            | Action::FetchFailed { .. }
            | Action::CreateFile { .. }
            | Action::CreateFolder { .. }
            | Action::RecordCreated(_)
            | Action::CreateFailed { .. }
            | Action::RenameConfirmed { .. }
            | Action::RenameFailed { .. }
            | Action::SaveContent { .. }
            | Action::ContentSaved(_)
            | Action::SaveFailed { .. } => self.reduce_remote_action(action),
            Action::AddFileLocal { .. }
            | Action::AddFolderLocal { .. }
            | Action::Select(_)
            | Action::CloseTab(_)
            | Action::UpdateContent { .. }
            | Action::Rename { .. } => self.reduce_files_action(action),
            Action::DismissNotification => {
                DispatchResult::changed(self.state.files.notifications.pop_front().is_some())
            }
            Action::SetFocus(focus) => {
                let prev = self.state.ui.focus;
                self.state.ui.focus = focus;
                DispatchResult::changed(prev != focus)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
