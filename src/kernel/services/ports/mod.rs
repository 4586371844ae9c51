//! Service ports: traits + data contracts.

pub mod remote;
pub mod settings;

pub use remote::{RemoteError, RemoteFileService, RemoteFuture, Result as RemoteResult};
pub use settings::{EditorSettings, RemoteSettings, Settings};
