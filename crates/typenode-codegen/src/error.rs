//! Error types for code generation

use thiserror::Error;
use typenode_core::CoreError;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Invalid module: {0}")]
    Core(#[from] CoreError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
