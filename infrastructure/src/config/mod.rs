//! Configuration file loading for wavefront
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `WAVEFRONT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./wavefront.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/wavefront/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileEventsConfig, FileExecutionConfig, FileToolsConfig,
};
pub use loader::ConfigLoader;
