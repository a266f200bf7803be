//! Code generation for typenode syntax trees

pub mod config;
pub mod error;
pub mod printer;
pub mod typescript;

use typenode_core::Module;

pub use config::CodegenConfig;
pub use error::CodegenError;
pub use printer::{print, Printer};
pub use typescript::TypeScriptCodegen;

/// Common trait for all code generators
pub trait Codegen {
    fn generate(&mut self, module: &Module) -> Result<String, CodegenError>;
}
