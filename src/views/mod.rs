//! View layer: tree panel and editing pane.

pub mod editor;
pub mod explorer;

pub use editor::EditorView;
pub use explorer::{Prompt, PromptKind, TreeView};
