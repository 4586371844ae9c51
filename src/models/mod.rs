//! Data models: records and the hierarchy derived from them.

pub mod record;
pub mod record_tree;

pub use record::{FileRecord, RecordId, RecordKind, RecordPatch};
pub use record_tree::{NodeId, RecordTree, TreeIssue, TreeRow};
