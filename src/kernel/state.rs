use super::StoreError;
use crate::models::{FileRecord, RecordId};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

pub const MAX_NOTIFICATIONS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Renames of one record still awaiting the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRename {
    /// Last name the remote is known to hold.
    pub confirmed: String,
    confirmed_generation: u64,
    /// `(generation, requested name)`, oldest first.
    pub in_flight: Vec<(u64, String)>,
}

impl PendingRename {
    fn new(confirmed: String) -> Self {
        Self {
            confirmed,
            confirmed_generation: 0,
            in_flight: Vec::new(),
        }
    }

    /// Name the record should show: the newest request still in flight, else
    /// the confirmed one.
    pub fn display_name(&self) -> &str {
        self.in_flight
            .last()
            .map(|(_, name)| name.as_str())
            .unwrap_or(&self.confirmed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    Explorer,
    Editor,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: FocusTarget,
}

/// Record list mirrored from the remote service, plus selection and tabs.
#[derive(Debug, Clone, Default)]
pub struct FilesState {
    pub file_items: Vec<FileRecord>,
    pub selected_file_id: Option<RecordId>,
    pub open_tabs: Vec<RecordId>,
    pub loading: bool,
    pub notifications: VecDeque<Notification>,
    /// Optimistic renames not yet settled by the remote.
    pub pending_renames: FxHashMap<RecordId, PendingRename>,
    next_rename_generation: u64,
    /// Bumped on every change to `file_items`.
    pub version: u64,
}

impl FilesState {
    pub fn with_records(file_items: Vec<FileRecord>) -> Self {
        Self {
            file_items,
            ..Self::default()
        }
    }

    pub fn record(&self, id: &RecordId) -> Option<&FileRecord> {
        self.file_items.iter().find(|r| &r.id == id)
    }

    pub(crate) fn record_mut(&mut self, id: &RecordId) -> Result<&mut FileRecord, StoreError> {
        self.file_items
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFoundLocal(id.clone()))
    }

    pub fn selected_record(&self) -> Option<&FileRecord> {
        self.selected_file_id.as_ref().and_then(|id| self.record(id))
    }

    /// Content of the selected file, or an empty placeholder.
    pub fn selected_content(&self) -> &str {
        self.selected_record()
            .and_then(|r| r.content())
            .unwrap_or("")
    }

    pub fn is_open(&self, id: &RecordId) -> bool {
        self.open_tabs.contains(id)
    }

    pub(crate) fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(Notification {
            level,
            message: message.into(),
        });
    }

    /// Records an optimistic rename from `previous` to `requested` and
    /// returns its generation.
    pub(crate) fn begin_rename(
        &mut self,
        id: &RecordId,
        previous: String,
        requested: String,
    ) -> u64 {
        self.next_rename_generation += 1;
        let generation = self.next_rename_generation;
        self.pending_renames
            .entry(id.clone())
            .or_insert_with(|| PendingRename::new(previous))
            .in_flight
            .push((generation, requested));
        generation
    }

    /// Settles rename `generation` of `id`. `confirmed` carries the name the
    /// remote echoed on success. The record takes the newest name still in
    /// flight, or the last confirmed one once nothing is. Returns whether the
    /// record's name changed.
    pub(crate) fn settle_rename(
        &mut self,
        id: &RecordId,
        generation: u64,
        confirmed: Option<String>,
    ) -> bool {
        let Some(pending) = self.pending_renames.get_mut(id) else {
            tracing::debug!(id = %id, generation, "rename completion without pending entry");
            return false;
        };
        pending.in_flight.retain(|(g, _)| *g != generation);
        if let Some(name) = confirmed {
            if generation > pending.confirmed_generation {
                pending.confirmed = name;
                pending.confirmed_generation = generation;
            }
        }

        let target = pending.display_name().to_string();
        if pending.in_flight.is_empty() {
            self.pending_renames.remove(id);
        }
        let Ok(record) = self.record_mut(id) else {
            return false;
        };
        if record.name == target {
            return false;
        }
        record.name = target;
        self.bump_version();
        true
    }

    pub(crate) fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Appends `record` and links it into its parent folder's `children`.
    ///
    /// Returns `false` when a record with the same id already exists.
    pub(crate) fn insert_record(&mut self, record: FileRecord) -> bool {
        if self.record(&record.id).is_some() {
            tracing::debug!(id = %record.id, "record already present, skipping insert");
            return false;
        }

        if let Some(parent_id) = record.parent_id.clone() {
            match self.record_mut(&parent_id) {
                Ok(parent) => {
                    if !parent.push_child(record.id.clone()) {
                        tracing::warn!(parent = %parent_id, "parent is not a folder");
                    }
                }
                Err(err) => tracing::debug!(error = %err, "parent missing, record goes top level"),
            }
        }

        self.file_items.push(record);
        self.bump_version();
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub files: FilesState,
    pub ui: UiState,
}

impl AppState {
    pub fn new(files: FilesState) -> Self {
        Self {
            files,
            ui: UiState::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
