//! Workbench: page composition of the tree panel and the editing pane.
//!
//! Owns the [`Store`] and hands views read-only state; views answer with
//! actions, which go through [`Workbench::dispatch`]. Effects run on the
//! [`AsyncRuntime`] and come back through the message channel on `tick`.

use crate::app::theme::UiTheme;
use crate::kernel::services::adapters::{AppMessage, AsyncRuntime};
use crate::kernel::services::ports::{RemoteFileService, Settings};
use crate::kernel::{Action, AppState, FilesState, Store};
use crate::views::{EditorView, TreeView};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

mod input;
mod render;

const MAX_COMPLETION_DRAIN_PER_TICK: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
}

pub struct Workbench {
    store: Store,
    tree: TreeView,
    editor: EditorView,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    theme: UiTheme,
    remote_label: String,
    show_sidebar: bool,
}

impl Workbench {
    /// Builds the workbench and requests the initial record list.
    pub fn new(remote: Arc<dyn RemoteFileService>, settings: &Settings) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let remote_label = remote.describe();
        let runtime = AsyncRuntime::new(remote, tx)?;

        let mut workbench = Self {
            store: Store::new(AppState::new(FilesState::default())),
            tree: TreeView::new(),
            editor: EditorView::new(&settings.editor),
            runtime,
            rx,
            theme: UiTheme::default(),
            remote_label,
            show_sidebar: true,
        };
        workbench.dispatch(Action::FetchAll);
        Ok(workbench)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn tree_view(&self) -> &TreeView {
        &self.tree
    }

    pub fn editor_view(&self) -> &EditorView {
        &self.editor
    }

    pub fn toggle_sidebar(&mut self) {
        self.show_sidebar = !self.show_sidebar;
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            tracing::debug!(?effect, "running effect");
            self.runtime.run_effect(effect);
        }
        let views_changed = self.sync_views();
        result.state_changed || views_changed
    }

    fn sync_views(&mut self) -> bool {
        let files = &self.store.state().files;
        let mut changed = self.tree.sync(files);
        if let Some(flush) = self.editor.sync(files) {
            changed |= self.dispatch(flush);
        }
        changed
    }

    /// Drains finished remote work and flushes debounced edits. Called by the
    /// main loop between input events.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for _ in 0..MAX_COMPLETION_DRAIN_PER_TICK {
            match self.rx.try_recv() {
                Ok(AppMessage::Completed(action)) => {
                    changed |= self.dispatch(action);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("effect channel disconnected");
                    break;
                }
            }
        }
        if let Some(update) = self.editor.poll_debounce(now) {
            changed |= self.dispatch(update);
        }
        changed
    }

    /// Moves unflushed edits into the store before exit.
    pub fn shutdown(&mut self) {
        if let Some(update) = self.editor.flush() {
            self.dispatch(update);
        }
        tracing::info!("workbench shutdown");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/workbench.rs"]
mod tests;
