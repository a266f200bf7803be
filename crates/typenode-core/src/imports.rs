//! Import collection over lowered syntax trees
//!
//! Walks a forest of [`SyntaxNode`]s and groups every identifier that carries
//! module provenance by the module it comes from. The same identifier reached
//! through several paths is recorded once.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::types::SyntaxNode;

/// Module path -> import specifiers (`A` or `A as B`)
pub type NodeImports = BTreeMap<String, BTreeSet<String>>;

/// Collect the imports needed by `nodes`
pub fn get_nodes_imports(nodes: &[SyntaxNode]) -> NodeImports {
    let mut imports = NodeImports::new();
    for node in nodes {
        collect_node_imports(node, &mut imports);
    }
    debug!(
        "Collected imports from {} module(s) across {} node(s)",
        imports.len(),
        nodes.len()
    );
    imports
}

fn collect_node_imports(node: &SyntaxNode, imports: &mut NodeImports) {
    node.visit_identifiers(&mut |identifier| {
        let Some(module) = &identifier.module else {
            return;
        };
        let specifier = identifier.specifier();
        trace!("import {} from {}", specifier, module);
        imports.entry(module.clone()).or_default().insert(specifier);
    });
}
