//! codeshell - terminal shell over a remote file record store
//!
//! Layout:
//! - models: records and the derived hierarchy (FileRecord, RecordTree)
//! - kernel: state, actions, reducers, effects and the remote service port
//! - views: tree panel and editing pane
//! - app: workbench composing the views (terminal builds only)
//! - tui: terminal setup and restore

pub mod kernel;
pub mod models;
pub mod views;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod tui;
