//! Record data model: the file/folder entries mirrored from the remote list.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh client-side id (uuid v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    File { content: String },
    Folder { children: Vec<RecordId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireRecord", into = "WireRecord")]
pub struct FileRecord {
    pub id: RecordId,
    pub name: String,
    pub kind: RecordKind,
    pub parent_id: Option<RecordId>,
}

impl FileRecord {
    pub fn new_file(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            kind: RecordKind::File {
                content: String::new(),
            },
            parent_id: None,
        }
    }

    pub fn new_folder(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            kind: RecordKind::Folder {
                children: Vec::new(),
            },
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: Option<RecordId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, RecordKind::Folder { .. })
    }

    /// `None` for folders.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            RecordKind::File { content } => Some(content),
            RecordKind::Folder { .. } => None,
        }
    }

    /// Empty for files.
    pub fn children(&self) -> &[RecordId] {
        match &self.kind {
            RecordKind::Folder { children } => children,
            RecordKind::File { .. } => &[],
        }
    }

    /// Returns `false` (and leaves the record alone) for folders.
    pub fn set_content(&mut self, new_content: String) -> bool {
        match &mut self.kind {
            RecordKind::File { content } => {
                *content = new_content;
                true
            }
            RecordKind::Folder { .. } => false,
        }
    }

    /// Appends `child` unless already listed. Returns `false` for files.
    pub fn push_child(&mut self, child: RecordId) -> bool {
        match &mut self.kind {
            RecordKind::Folder { children } => {
                if !children.contains(&child) {
                    children.push(child);
                }
                true
            }
            RecordKind::File { .. } => false,
        }
    }
}

/// Partial update sent with `PATCH /files/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl RecordPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            name: None,
            content: Some(content.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none()
    }

    pub fn apply_to(&self, record: &mut FileRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(content) = &self.content {
            record.set_content(content.clone());
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    id: RecordId,
    name: String,
    is_folder: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RecordId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<RecordId>,
}

impl From<WireRecord> for FileRecord {
    fn from(wire: WireRecord) -> Self {
        let kind = if wire.is_folder {
            RecordKind::Folder {
                children: wire.children.unwrap_or_default(),
            }
        } else {
            RecordKind::File {
                content: wire.content.unwrap_or_default(),
            }
        };
        Self {
            id: wire.id,
            name: wire.name,
            kind,
            parent_id: wire.parent_id,
        }
    }
}

impl From<FileRecord> for WireRecord {
    fn from(record: FileRecord) -> Self {
        let (is_folder, children, content) = match record.kind {
            RecordKind::File { content } => (false, None, Some(content)),
            RecordKind::Folder { children } => (true, Some(children), None),
        };
        Self {
            id: record.id,
            name: record.name,
            is_folder,
            children,
            content,
            parent_id: record.parent_id,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/record.rs"]
mod tests;
