use crate::models::{FileRecord, RecordId, RecordPatch};

/// Remote work requested by a reducer. Every effect completes with exactly
/// one follow-up [`Action`](super::Action).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchAll,
    CreateRecord(FileRecord),
    UpdateRecord {
        id: RecordId,
        patch: RecordPatch,
        kind: UpdateKind,
    },
}

/// Which completion an [`Effect::UpdateRecord`] failure maps back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Rename { generation: u64 },
    SaveContent,
}
