use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}
