//! Configuration loading: TOML file structure and multi-source merging.

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileLogConfig, FileProviderConfig,
    FileReplConfig,
};
pub use loader::ConfigLoader;
