mod runtime;
pub use runtime::Runtime;

mod session_config;
pub use session_config::{SessionConfig, DEFAULT_SYNC_INTERVAL};
