use crate::kernel::state::FocusTarget;
use crate::models::{FileRecord, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchAll,
    FetchSucceeded(Vec<FileRecord>),
    FetchFailed {
        error: String,
    },
    CreateFile {
        name: String,
        parent: Option<RecordId>,
    },
    CreateFolder {
        name: String,
        parent: Option<RecordId>,
    },
    RecordCreated(FileRecord),
    CreateFailed {
        name: String,
        error: String,
    },
    AddFileLocal {
        name: String,
        parent: Option<RecordId>,
    },
    AddFolderLocal {
        name: String,
        parent: Option<RecordId>,
    },
    Select(RecordId),
    CloseTab(RecordId),
    UpdateContent {
        id: RecordId,
        content: String,
    },
    Rename {
        id: RecordId,
        name: String,
    },
    RenameFailed {
        id: RecordId,
        generation: u64,
        error: String,
    },
    SaveContent {
        id: RecordId,
    },
    SaveFailed {
        id: RecordId,
        error: String,
    },
    RenameConfirmed {
        record: FileRecord,
        generation: u64,
    },
    ContentSaved(FileRecord),
    DismissNotification,
    SetFocus(FocusTarget),
}
