//! Combinators for describing type expressions
//!
//! A [`TypeNode`] wraps a thunk that lowers to a [`SyntaxNode`]. Nothing is
//! lowered until [`TypeNode::syntax_node`] is called, which is what makes
//! self-referential definitions possible:
//!
//! ```
//! use typenode_core::type_node::{number, object, partial, recursive, Fields};
//! use typenode_core::type_node::Unknown;
//! use typenode_core::SyntaxNode;
//!
//! let node = recursive::<(Unknown, Unknown), _>("A", |this| {
//!     object(Fields::new().field("a", number()))
//!         .intersect(partial(Fields::new().field("b", this)))
//! });
//! assert!(matches!(node.syntax_node(), SyntaxNode::Intersection(_)));
//! ```
//!
//! The type parameter `A` only guides callers; it is never inspected.

use std::cell::{Cell, OnceCell};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::types::{
    array_combinator, identifier, imported_identifier, intersection_combinator,
    partial_combinator, record_combinator, tuple_combinator, type_combinator,
    union_combinator, Literal, Property, SyntaxNode,
};

type Thunk = Rc<dyn Fn() -> SyntaxNode>;

/// Phantom result type for nodes whose shape is not tracked
pub enum Unknown {}

pub struct TypeNode<A> {
    lower: Thunk,
    name: Option<Rc<str>>,
    _result: PhantomData<fn() -> A>,
}

impl<A> Clone for TypeNode<A> {
    fn clone(&self) -> Self {
        Self {
            lower: self.lower.clone(),
            name: self.name.clone(),
            _result: PhantomData,
        }
    }
}

impl<A> fmt::Debug for TypeNode<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeNode").field("name", &self.name).finish()
    }
}

impl<A> TypeNode<A> {
    /// Wrap a lowering function
    pub fn from_fn(lower: impl Fn() -> SyntaxNode + 'static) -> Self {
        Self::from_thunk(Rc::new(lower), None)
    }

    fn from_thunk(lower: Thunk, name: Option<Rc<str>>) -> Self {
        Self {
            lower,
            name,
            _result: PhantomData,
        }
    }

    /// Lower this node (and everything it contains) to a syntax tree
    pub fn syntax_node(&self) -> SyntaxNode {
        (self.lower)()
    }

    /// Name given by `lazy`, `recursive` or `reference`
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Forget the result type, to mix nodes of different shapes
    pub fn erase(self) -> TypeNode<Unknown> {
        TypeNode::from_thunk(self.lower, self.name)
    }

    /// `self & other`
    pub fn intersect<B>(self, other: TypeNode<B>) -> TypeNode<(A, B)> {
        let (left, right) = (self.lower, other.lower);
        TypeNode::from_fn(move || intersection_combinator(vec![left(), right()]))
    }
}

pub fn string() -> TypeNode<String> {
    TypeNode::from_fn(|| SyntaxNode::String)
}

pub fn number() -> TypeNode<f64> {
    TypeNode::from_fn(|| SyntaxNode::Number)
}

pub fn boolean() -> TypeNode<bool> {
    TypeNode::from_fn(|| SyntaxNode::Boolean)
}

pub fn unknown_array() -> TypeNode<Vec<Unknown>> {
    TypeNode::from_fn(|| array_combinator(SyntaxNode::Unknown))
}

pub fn unknown_record() -> TypeNode<BTreeMap<String, Unknown>> {
    TypeNode::from_fn(|| record_combinator(SyntaxNode::String, SyntaxNode::Unknown))
}

/// Union of literal types, in the order given; no values is `never`
pub fn literal<L: Into<Literal>>(values: impl IntoIterator<Item = L>) -> TypeNode<Literal> {
    let members: Vec<SyntaxNode> = values
        .into_iter()
        .map(|v| SyntaxNode::Literal(v.into()))
        .collect();
    TypeNode::from_fn(move || union_combinator(members.clone()))
}

/// `null | node`
pub fn nullable<A>(node: TypeNode<A>) -> TypeNode<Option<A>> {
    let inner = node.lower;
    TypeNode::from_fn(move || {
        union_combinator(vec![SyntaxNode::Literal(Literal::Null), inner()])
    })
}

pub fn array<A>(node: TypeNode<A>) -> TypeNode<Vec<A>> {
    let elem = node.lower;
    TypeNode::from_fn(move || array_combinator(elem()))
}

/// String-keyed record of `node`
pub fn record<A>(node: TypeNode<A>) -> TypeNode<BTreeMap<String, A>> {
    let value = node.lower;
    TypeNode::from_fn(move || record_combinator(SyntaxNode::String, value()))
}

pub fn union<A>(nodes: impl IntoIterator<Item = TypeNode<A>>) -> TypeNode<A> {
    let members: Vec<Thunk> = nodes.into_iter().map(|n| n.lower).collect();
    TypeNode::from_fn(move || union_combinator(members.iter().map(|m| m()).collect()))
}

pub fn tuple(nodes: impl IntoIterator<Item = TypeNode<Unknown>>) -> TypeNode<Vec<Unknown>> {
    let members: Vec<Thunk> = nodes.into_iter().map(|n| n.lower).collect();
    TypeNode::from_fn(move || tuple_combinator(members.iter().map(|m| m()).collect()))
}

/// Ordered property list for [`object`] and [`partial`]
#[derive(Clone, Default)]
pub struct Fields {
    entries: Vec<FieldEntry>,
}

#[derive(Clone)]
struct FieldEntry {
    key: String,
    lower: Thunk,
    description: Option<String>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property; re-using a key replaces its type in place
    pub fn field<A>(mut self, key: impl Into<String>, node: TypeNode<A>) -> Self {
        let key = key.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => existing.lower = node.lower,
            None => self.entries.push(FieldEntry {
                key,
                lower: node.lower,
                description: None,
            }),
        }
        self
    }

    /// Document the most recently added property
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        if let Some(last) = self.entries.last_mut() {
            last.description = Some(description.into());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lower(&self) -> Vec<Property> {
        self.entries
            .iter()
            .map(|e| Property {
                key: e.key.clone(),
                node: (e.lower)(),
                optional: false,
                description: e.description.clone(),
            })
            .collect()
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| &e.key))
            .finish()
    }
}

/// Object type with one required property per field
pub fn object(fields: Fields) -> TypeNode<Unknown> {
    TypeNode::from_fn(move || type_combinator(fields.lower()))
}

/// `Partial<{...}>`: every field optional
pub fn partial(fields: Fields) -> TypeNode<Unknown> {
    TypeNode::from_fn(move || partial_combinator(fields.lower()))
}

/// Discriminated union keyed on a shared tag property
///
/// Branches are expected to be object types carrying the tag property. This is
/// not checked: a branch without it still renders, it just no longer
/// discriminates.
#[derive(Debug, Clone)]
pub struct Sum {
    tag: String,
}

pub fn sum(tag: impl Into<String>) -> Sum {
    Sum { tag: tag.into() }
}

impl Sum {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Union of `branches` in iteration order; no branches is `never`
    pub fn of<K, A>(&self, branches: impl IntoIterator<Item = (K, TypeNode<A>)>) -> TypeNode<A> {
        union(branches.into_iter().map(|(_, node)| node))
    }
}

/// Bare identifier, used to close cycles opened by [`lazy`]
pub fn reference<A>(name: impl Into<String>) -> TypeNode<A> {
    let name: String = name.into();
    let name: Rc<str> = Rc::from(name);
    let id = name.clone();
    TypeNode::from_thunk(Rc::new(move || identifier(&*id)), Some(name))
}

/// Identifier imported from another module
pub fn imported<A>(
    name: impl Into<String>,
    module: impl Into<String>,
    alias: Option<&str>,
) -> TypeNode<A> {
    let node = imported_identifier(name, module, alias);
    TypeNode::from_fn(move || node.clone())
}

/// Single-assignment cell behind `lazy` and `recursive`
struct LazyCell {
    name: Rc<str>,
    body: Box<dyn Fn() -> SyntaxNode>,
    forcing: Cell<bool>,
    forced: OnceCell<SyntaxNode>,
}

impl LazyCell {
    fn force(&self) -> SyntaxNode {
        if let Some(node) = self.forced.get() {
            return node.clone();
        }
        // re-entered from inside its own body
        if self.forcing.get() {
            return identifier(&*self.name);
        }

        trace!("forcing lazy type {}", self.name);
        self.forcing.set(true);
        let node = (self.body)();
        self.forcing.set(false);
        self.forced.get_or_init(|| node).clone()
    }
}

/// Defer `thunk` until the node is lowered
///
/// Recursion goes through [`reference`] with the same `name`.
pub fn lazy<A: 'static, F>(name: impl Into<String>, thunk: F) -> TypeNode<A>
where
    F: Fn() -> TypeNode<A> + 'static,
{
    recursive(name, move |_| thunk())
}

/// Define a type that may refer to itself
///
/// `define` receives a handle to the node being defined. Inside the body the
/// handle lowers to an identifier named `name`; outside it lowers to the full
/// definition.
pub fn recursive<A: 'static, F>(name: impl Into<String>, define: F) -> TypeNode<A>
where
    F: Fn(TypeNode<A>) -> TypeNode<A> + 'static,
{
    let name: String = name.into();
    let name: Rc<str> = Rc::from(name);
    let cell = Rc::new_cyclic(|weak: &Weak<LazyCell>| {
        let this = self_handle::<A>(weak.clone(), name.clone());
        LazyCell {
            name: name.clone(),
            body: Box::new(move || define(this.clone()).syntax_node()),
            forcing: Cell::new(false),
            forced: OnceCell::new(),
        }
    });
    TypeNode::from_thunk(Rc::new(move || cell.force()), Some(name))
}

fn self_handle<A>(cell: Weak<LazyCell>, name: Rc<str>) -> TypeNode<A> {
    let id = name.clone();
    let lower = move || match cell.upgrade() {
        Some(cell) => cell.force(),
        None => identifier(&*id),
    };
    TypeNode::from_thunk(Rc::new(lower), Some(name))
}
