//! Type declarations grouped into modules

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::naming::is_declaration_name;
use crate::type_node::TypeNode;
use crate::types::SyntaxNode;

/// A named type alias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub node: SyntaxNode,
    pub exported: bool,
    pub description: Option<String>,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, node: SyntaxNode) -> Self {
        Self {
            name: name.into(),
            node,
            exported: true,
            description: None,
        }
    }

    /// Lower `type_node` and declare it as `name`
    pub fn from_type_node<A>(name: impl Into<String>, type_node: &TypeNode<A>) -> Self {
        Self::new(name, type_node.syntax_node())
    }

    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Names of local (not imported) types this declaration refers to
    pub fn dependencies(&self) -> BTreeSet<String> {
        let mut deps = BTreeSet::new();
        self.node.visit_identifiers(&mut |identifier| {
            if identifier.module.is_none() {
                deps.insert(identifier.name.clone());
            }
        });
        deps
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub declarations: Vec<TypeDeclaration>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
        }
    }

    pub fn with_declaration(mut self, declaration: TypeDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Check declaration names are usable and unique
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for declaration in &self.declarations {
            if !is_declaration_name(&declaration.name) {
                return Err(CoreError::InvalidIdentifier(declaration.name.clone()));
            }
            if !seen.insert(declaration.name.as_str()) {
                return Err(CoreError::DuplicateDeclaration(declaration.name.clone()));
            }
        }
        Ok(())
    }
}

/// Order declarations so each comes after the declarations it refers to
///
/// Recursive groups (a type referring to itself, or several types referring
/// to each other) are kept together in their input order. Among declarations
/// that are free to go next, the one appearing first in the input wins.
pub fn sort_declarations(
    declarations: &[TypeDeclaration],
) -> Result<Vec<TypeDeclaration>, CoreError> {
    // node index == input position
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for declaration in declarations {
        let index = graph.add_node(declaration.name.as_str());
        if indices.insert(declaration.name.as_str(), index).is_some() {
            return Err(CoreError::DuplicateDeclaration(declaration.name.clone()));
        }
    }

    for declaration in declarations {
        let from = indices[declaration.name.as_str()];
        for dependency in declaration.dependencies() {
            // references to types outside the module are left to the caller
            if let Some(&to) = indices.get(dependency.as_str()) {
                if from != to {
                    graph.add_edge(from, to, ());
                }
            }
        }
    }

    let mut components = tarjan_scc(&graph);
    let mut component_of = vec![0; declarations.len()];
    for (id, component) in components.iter_mut().enumerate() {
        component.sort();
        for index in component.iter() {
            component_of[index.index()] = id;
        }
        if component.len() > 1 {
            let names: Vec<&str> = component.iter().map(|&index| graph[index]).collect();
            debug!("Mutually recursive declarations: {}", names.join(", "));
        }
    }

    // Kahn's algorithm over the condensation, earliest input position first
    let mut pending = vec![0usize; components.len()];
    let mut dependents: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); components.len()];
    for edge in graph.edge_references() {
        let from = component_of[edge.source().index()];
        let to = component_of[edge.target().index()];
        if from != to && dependents[to].insert(from) {
            pending[from] += 1;
        }
    }

    let first_position = |id: usize| components[id][0].index();
    let mut ready: BinaryHeap<Reverse<(usize, usize)>> = (0..components.len())
        .filter(|&id| pending[id] == 0)
        .map(|id| Reverse((first_position(id), id)))
        .collect();

    let mut sorted = Vec::with_capacity(declarations.len());
    while let Some(Reverse((_, id))) = ready.pop() {
        sorted.extend(
            components[id]
                .iter()
                .map(|index| declarations[index.index()].clone()),
        );
        for &dependent in &dependents[id] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.push(Reverse((first_position(dependent), dependent)));
            }
        }
    }

    Ok(sorted)
}
