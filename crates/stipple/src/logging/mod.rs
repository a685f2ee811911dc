//! Logging setup.
//!
//! The library only ever talks to the `log` facade; binaries call
//! [`init_logging`] once to install `env_logger` as the backend.

mod init;

pub use init::{init_logging, LoggingConfig};
