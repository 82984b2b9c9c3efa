//! Process-level plumbing shared by the server binary and modules:
//! layered configuration, logging bootstrap, home directory resolution
//! and shutdown signal handling.

pub mod config;
pub mod logging;
pub mod paths;
pub mod shutdown;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section,
    ServerConfig,
};
pub use shutdown::wait_for_shutdown;
