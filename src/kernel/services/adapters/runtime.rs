use crate::kernel::effect::UpdateKind;
use crate::kernel::services::ports::RemoteFileService;
use crate::kernel::{Action, Effect};
use std::future::Future;
use std::io;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Debug)]
pub enum AppMessage {
    Completed(Action),
}

/// Runs `effect` against `remote` and returns the action that completes it.
pub async fn resolve_effect(remote: &dyn RemoteFileService, effect: Effect) -> Action {
    match effect {
        Effect::FetchAll => match remote.list().await {
            Ok(records) => Action::FetchSucceeded(records),
            Err(e) => Action::FetchFailed {
                error: e.to_string(),
            },
        },
        Effect::CreateRecord(record) => {
            let name = record.name.clone();
            match remote.create(record).await {
                Ok(created) => Action::RecordCreated(created),
                Err(e) => Action::CreateFailed {
                    name,
                    error: e.to_string(),
                },
            }
        }
        Effect::UpdateRecord { id, patch, kind } => {
            match (remote.update(id.clone(), patch).await, kind) {
                (Ok(record), UpdateKind::Rename { generation }) => {
                    Action::RenameConfirmed { record, generation }
                }
                (Ok(record), UpdateKind::SaveContent) => Action::ContentSaved(record),
                (Err(e), UpdateKind::Rename { generation }) => Action::RenameFailed {
                    id,
                    generation,
                    error: e.to_string(),
                },
                (Err(e), UpdateKind::SaveContent) => Action::SaveFailed {
                    id,
                    error: e.to_string(),
                },
            }
        }
    }
}

/// Executes effects on a background tokio runtime and posts completions back
/// to the UI thread.
pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    remote: Arc<dyn RemoteFileService>,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(remote: Arc<dyn RemoteFileService>, tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self {
            runtime,
            remote,
            tx,
        })
    }

    pub fn remote(&self) -> &Arc<dyn RemoteFileService> {
        &self.remote
    }

    pub fn run_effect(&self, effect: Effect) {
        let tx = self.tx.clone();
        let remote = Arc::clone(&self.remote);
        self.runtime.spawn(async move {
            let action = resolve_effect(remote.as_ref(), effect).await;
            if tx.send(AppMessage::Completed(action)).is_err() {
                tracing::debug!("completion dropped, receiver gone");
            }
        });
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/runtime.rs"]
mod tests;
