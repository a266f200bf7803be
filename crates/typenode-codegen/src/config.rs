//! Configuration for TypeScript emission.

use serde::{Deserialize, Serialize};

use crate::CodegenError;

/// Printer and module generation settings
///
/// Every key is optional when loading from TOML:
///
/// ```toml
/// indent_size = 2
/// emit_imports = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Spaces per nesting level inside object types
    pub indent_size: usize,
    /// Whether to emit the import block at the top of a module
    pub emit_imports: bool,
    /// Whether to reorder declarations so dependencies come first
    pub sort_declarations: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            indent_size: 4,
            emit_imports: true,
            sort_declarations: true,
        }
    }
}

impl CodegenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CodegenError> {
        Ok(toml::from_str(content)?)
    }

    pub fn indent_size(mut self, value: usize) -> Self {
        self.indent_size = value;
        self
    }

    pub fn emit_imports(mut self, value: bool) -> Self {
        self.emit_imports = value;
        self
    }

    pub fn sort_declarations(mut self, value: bool) -> Self {
        self.sort_declarations = value;
        self
    }
}
