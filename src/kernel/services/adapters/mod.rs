//! Service adapters: runtime and network implementations (IO/async).

pub mod dirs;
pub mod http;
pub mod memory;
pub mod runtime;
pub mod settings;

pub use dirs::{ensure_log_dir, get_log_dir};
pub use http::HttpFileService;
pub use memory::MemoryFileService;
pub use runtime::{resolve_effect, AppMessage, AsyncRuntime};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
