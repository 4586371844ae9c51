use super::DispatchResult;
use crate::kernel::effect::UpdateKind;
use crate::kernel::{Action, Effect};
use crate::models::{FileRecord, RecordPatch};

impl super::Store {
    pub(super) fn reduce_files_action(&mut self, action: Action) -> DispatchResult {
        let files = &mut self.state.files;
        match action {
            Action::AddFileLocal { name, parent } => {
                let name = name.trim();
                if name.is_empty() {
                    return DispatchResult::changed(false);
                }
                let record = FileRecord::new_file(name).with_parent(parent);
                tracing::debug!(id = %record.id, name = %record.name, "file added locally");
                DispatchResult::changed(files.insert_record(record))
            }
            Action::AddFolderLocal { name, parent } => {
                let name = name.trim();
                if name.is_empty() {
                    return DispatchResult::changed(false);
                }
                let record = FileRecord::new_folder(name).with_parent(parent);
                tracing::debug!(id = %record.id, name = %record.name, "folder added locally");
                DispatchResult::changed(files.insert_record(record))
            }
            Action::Select(id) => {
                if files.record(&id).is_none() {
                    tracing::debug!(id = %id, "select ignored, no such record");
                    return DispatchResult::changed(false);
                }
                let mut changed = files.selected_file_id.as_ref() != Some(&id);
                if !files.open_tabs.contains(&id) {
                    files.open_tabs.push(id.clone());
                    changed = true;
                }
                files.selected_file_id = Some(id);
                DispatchResult::changed(changed)
            }
            Action::CloseTab(id) => {
                let before = files.open_tabs.len();
                files.open_tabs.retain(|tab| tab != &id);
                let changed = files.open_tabs.len() != before;
                if changed {
                    tracing::debug!(id = %id, "tab closed");
                }
                DispatchResult::changed(changed)
            }
            Action::UpdateContent { id, content } => {
                let record = match files.record_mut(&id) {
                    Ok(record) => record,
                    Err(err) => {
                        tracing::debug!(error = %err, "content update ignored");
                        return DispatchResult::changed(false);
                    }
                };
                if record.content() == Some(content.as_str()) {
                    return DispatchResult::changed(false);
                }
                if !record.set_content(content) {
                    tracing::debug!(id = %id, "content update ignored for folder");
                    return DispatchResult::changed(false);
                }
                files.bump_version();
                DispatchResult::changed(true)
            }
            Action::Rename { id, name } => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return DispatchResult::changed(false);
                }
                let record = match files.record_mut(&id) {
                    Ok(record) => record,
                    Err(err) => {
                        tracing::debug!(error = %err, "rename ignored");
                        return DispatchResult::changed(false);
                    }
                };
                if record.name == name {
                    return DispatchResult::changed(false);
                }

                let previous = std::mem::replace(&mut record.name, name.clone());
                let generation = files.begin_rename(&id, previous, name.clone());
                files.bump_version();
                tracing::debug!(
                    id = %id,
                    name = %name,
                    generation,
                    "rename applied, awaiting remote"
                );

                DispatchResult::with_effect(
                    Effect::UpdateRecord {
                        id,
                        patch: RecordPatch::name(name),
                        kind: UpdateKind::Rename { generation },
                    },
                    true,
                )
            }
            _ => unreachable!("non-files action passed to reduce_files_action"),
        }
    }
}
