//! Headless application core (state/action/effect).

pub mod action;
pub mod effect;
pub mod error;
pub mod services;
pub mod session;
pub mod state;
pub mod store;

pub use action::Action;
pub use effect::{Effect, UpdateKind};
pub use error::StoreError;
pub use session::Session;
pub use state::{
    AppState, FilesState, FocusTarget, Notification, NotificationLevel, PendingRename, UiState,
};
pub use store::{DispatchResult, Store};
