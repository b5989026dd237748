pub mod config;
pub mod inject;
pub mod keyboard;
mod lock;
mod logging;
pub mod predict;
pub mod scan;
pub mod screens;
pub mod settings;
mod telemetry;
pub mod terminal_restore;
pub mod text_policy;

pub(crate) use lock::lock_or_recover;
pub use logging::{
    crash_log_path, init_logging, log_debug, log_debug_content, log_file_path, log_panic,
};
pub use telemetry::{init_tracing, tracing_log_path};
