//! Awaitable front over [`Store`] for callers that want results inline.
//!
//! The workbench runs effects in the background through
//! [`AsyncRuntime`](crate::kernel::services::adapters::AsyncRuntime); a
//! `Session` awaits them on the caller's task instead and reports failures as
//! [`StoreError`] values. Both paths reduce the same actions.

use super::services::adapters::resolve_effect;
use super::services::ports::RemoteFileService;
use super::{Action, AppState, Store, StoreError};
use crate::models::RecordId;
use std::sync::Arc;

pub struct Session {
    store: Store,
    remote: Arc<dyn RemoteFileService>,
}

impl Session {
    pub fn new(state: AppState, remote: Arc<dyn RemoteFileService>) -> Self {
        Self {
            store: Store::new(state),
            remote,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Dispatches `action`, awaits every effect it emits and reduces the
    /// completions. Returns the completion actions in order.
    pub async fn run(&mut self, action: Action) -> Vec<Action> {
        let result = self.store.dispatch(action);
        let mut completions = Vec::with_capacity(result.effects.len());
        for effect in result.effects {
            let completion = resolve_effect(self.remote.as_ref(), effect).await;
            let follow_up = self.store.dispatch(completion.clone());
            debug_assert!(follow_up.effects.is_empty());
            completions.push(completion);
        }
        completions
    }

    /// Replaces the record list with the remote one. Returns the record count.
    pub async fn fetch_all(&mut self) -> Result<usize, StoreError> {
        for completion in self.run(Action::FetchAll).await {
            match completion {
                Action::FetchSucceeded(records) => return Ok(records.len()),
                Action::FetchFailed { error } => return Err(StoreError::RemoteRead(error)),
                _ => {}
            }
        }
        Ok(self.state().files.file_items.len())
    }

    pub async fn create_file(
        &mut self,
        name: &str,
        parent: Option<RecordId>,
    ) -> Result<RecordId, StoreError> {
        self.create(Action::CreateFile {
            name: name.to_string(),
            parent,
        })
        .await
    }

    pub async fn create_folder(
        &mut self,
        name: &str,
        parent: Option<RecordId>,
    ) -> Result<RecordId, StoreError> {
        self.create(Action::CreateFolder {
            name: name.to_string(),
            parent,
        })
        .await
    }

    async fn create(&mut self, action: Action) -> Result<RecordId, StoreError> {
        let completions = self.run(action).await;
        match completions.into_iter().next() {
            Some(Action::RecordCreated(record)) => Ok(record.id),
            Some(Action::CreateFailed { error, .. }) => Err(StoreError::RemoteWrite(error)),
            _ => Err(StoreError::InvalidName),
        }
    }

    /// Renames locally, persists, and rolls back when the remote rejects it.
    pub async fn rename(&mut self, id: &RecordId, name: &str) -> Result<(), StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidName);
        }
        if self.state().files.record(id).is_none() {
            return Err(StoreError::NotFoundLocal(id.clone()));
        }
        let completions = self
            .run(Action::Rename {
                id: id.clone(),
                name: name.to_string(),
            })
            .await;
        match completions.into_iter().next() {
            Some(Action::RenameFailed { error, .. }) => Err(StoreError::RemoteWrite(error)),
            _ => Ok(()),
        }
    }

    /// Persists the current local content of `id`.
    pub async fn save_content(&mut self, id: &RecordId) -> Result<(), StoreError> {
        if self.state().files.record(id).and_then(|r| r.content()).is_none() {
            return Err(StoreError::NotFoundLocal(id.clone()));
        }
        let completions = self.run(Action::SaveContent { id: id.clone() }).await;
        match completions.into_iter().next() {
            Some(Action::SaveFailed { error, .. }) => Err(StoreError::RemoteWrite(error)),
            _ => Ok(()),
        }
    }

    pub fn add_file_local(&mut self, name: &str, parent: Option<RecordId>) -> bool {
        self.store
            .dispatch(Action::AddFileLocal {
                name: name.to_string(),
                parent,
            })
            .state_changed
    }

    pub fn add_folder_local(&mut self, name: &str, parent: Option<RecordId>) -> bool {
        self.store
            .dispatch(Action::AddFolderLocal {
                name: name.to_string(),
                parent,
            })
            .state_changed
    }

    pub fn select(&mut self, id: &RecordId) -> bool {
        self.store.dispatch(Action::Select(id.clone())).state_changed
    }

    pub fn close_tab(&mut self, id: &RecordId) -> bool {
        self.store.dispatch(Action::CloseTab(id.clone())).state_changed
    }

    pub fn update_content(&mut self, id: &RecordId, content: &str) -> bool {
        self.store
            .dispatch(Action::UpdateContent {
                id: id.clone(),
                content: content.to_string(),
            })
            .state_changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
