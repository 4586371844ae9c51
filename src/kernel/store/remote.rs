use super::DispatchResult;
use crate::kernel::effect::UpdateKind;
use crate::kernel::state::NotificationLevel;
use crate::kernel::{Action, Effect, StoreError};
use crate::models::{FileRecord, RecordPatch};

impl super::Store {
    pub(super) fn reduce_remote_action(&mut self, action: Action) -> DispatchResult {
        let files = &mut self.state.files;
        match action {
            Action::FetchAll => {
                let changed = !files.loading;
                files.loading = true;
                DispatchResult::with_effect(Effect::FetchAll, changed)
            }
            Action::FetchSucceeded(records) => {
                tracing::debug!(count = records.len(), "records fetched");
                files.loading = false;
                files.file_items = records;
                files.pending_renames.clear();
                files.bump_version();
                DispatchResult::changed(true)
            }
            Action::FetchFailed { error } => {
                files.loading = false;
                let err = StoreError::RemoteRead(error);
                tracing::warn!(error = %err, "fetch failed");
                files.notify(NotificationLevel::Error, err.to_string());
                DispatchResult::changed(true)
            }
            Action::CreateFile { name, parent } => {
                let name = name.trim();
                if name.is_empty() {
                    return DispatchResult::changed(false);
                }
                let record = FileRecord::new_file(name).with_parent(parent);
                DispatchResult::with_effect(Effect::CreateRecord(record), false)
            }
            Action::CreateFolder { name, parent } => {
                let name = name.trim();
                if name.is_empty() {
                    return DispatchResult::changed(false);
                }
                let record = FileRecord::new_folder(name).with_parent(parent);
                DispatchResult::with_effect(Effect::CreateRecord(record), false)
            }
            Action::RecordCreated(record) => {
                tracing::debug!(id = %record.id, name = %record.name, "record created");
                DispatchResult::changed(files.insert_record(record))
            }
            Action::CreateFailed { name, error } => {
                let err = StoreError::RemoteWrite(error);
                tracing::warn!(name = %name, error = %err, "create failed");
                files.notify(
                    NotificationLevel::Error,
                    format!("could not create {name}: {err}"),
                );
                DispatchResult::changed(true)
            }
            Action::RenameConfirmed { record, generation } => {
                tracing::debug!(
                    id = %record.id,
                    name = %record.name,
                    generation,
                    "rename confirmed"
                );
                let changed = files.settle_rename(&record.id, generation, Some(record.name));
                DispatchResult::changed(changed)
            }
            Action::RenameFailed {
                id,
                generation,
                error,
            } => {
                let err = StoreError::RemoteWrite(error);
                tracing::warn!(id = %id, generation, error = %err, "rename failed, rolling back");
                files.settle_rename(&id, generation, None);
                files.notify(NotificationLevel::Error, format!("rename failed: {err}"));
                DispatchResult::changed(true)
            }
            Action::SaveContent { id } => {
                let content = match files.record(&id).and_then(|r| r.content()) {
                    Some(content) => content.to_string(),
                    None => {
                        tracing::debug!(id = %id, "save ignored, no such file");
                        return DispatchResult::changed(false);
                    }
                };
                DispatchResult::with_effect(
                    Effect::UpdateRecord {
                        id,
                        patch: RecordPatch::content(content),
                        kind: UpdateKind::SaveContent,
                    },
                    false,
                )
            }
            Action::ContentSaved(record) => {
                tracing::debug!(id = %record.id, "content saved");
                files.notify(NotificationLevel::Info, format!("saved {}", record.name));
                DispatchResult::changed(true)
            }
            Action::SaveFailed { id, error } => {
                let err = StoreError::RemoteWrite(error);
                tracing::warn!(id = %id, error = %err, "save failed");
                let name = files
                    .record(&id)
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| id.to_string());
                files.notify(
                    NotificationLevel::Error,
                    format!("could not save {name}: {err}"),
                );
                DispatchResult::changed(true)
            }
            _ => unreachable!("non-remote action passed to reduce_remote_action"),
        }
    }
}
