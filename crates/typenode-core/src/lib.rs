//! Core syntax tree, combinators and import collection for typenode

pub mod error;
pub mod imports;
pub mod ir;
pub mod naming;
pub mod type_node;
pub mod types;

pub use error::CoreError;
pub use imports::{get_nodes_imports, NodeImports};
pub use ir::{sort_declarations, Module, TypeDeclaration};
pub use type_node::TypeNode;
pub use types::{Identifier, Literal, Property, SyntaxNode};
