//! Logging utilities.
//!
//! Centralizes `env_logger` initialization behind the `log` facade used
//! throughout the workspace.

mod init;

pub use init::{init_logging, LoggingConfig};
