//! Lowered syntax tree for type expressions
//!
//! `SyntaxNode` is the language-agnostic form every `TypeNode` lowers to. The
//! printer and the import collector both consume it, and neither knows how
//! the tree was built.

use serde::{Deserialize, Serialize};

/// A literal value usable as a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(f64::from(value))
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Number(value as f64)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}

/// Reference to a named type, optionally defined in another module
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    /// Module path the name is imported from, e.g. "./A.ts"
    pub module: Option<String>,
    /// Local name requested for the import
    pub alias: Option<String>,
}

impl Identifier {
    /// Import specifier as written between the braces of an import statement
    pub fn specifier(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {}", self.name, alias),
            None => self.name.clone(),
        }
    }

    /// Name bound in the importing module: the alias if any
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub node: SyntaxNode,
    pub optional: bool,
    pub description: Option<String>,
}

impl Property {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Lowered type expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyntaxNode {
    /// Primitive types
    String,
    Number,
    Boolean,
    Unknown,

    Literal(Literal),

    /// Compound types
    Array(Box<SyntaxNode>),
    Record {
        key: Box<SyntaxNode>,
        value: Box<SyntaxNode>,
    },
    Union(Vec<SyntaxNode>),
    Intersection(Vec<SyntaxNode>),
    Tuple(Vec<SyntaxNode>),

    /// Structural object type, properties in declaration order
    Object(Vec<Property>),
    /// `Partial<...>` around an object type
    Partial(Box<SyntaxNode>),

    Identifier(Identifier),

    /// Uninhabited type
    Never,
}

impl SyntaxNode {
    /// Call `visit` on every identifier reachable from this node
    pub fn visit_identifiers<'a>(&'a self, visit: &mut impl FnMut(&'a Identifier)) {
        match self {
            SyntaxNode::String
            | SyntaxNode::Number
            | SyntaxNode::Boolean
            | SyntaxNode::Unknown
            | SyntaxNode::Literal(_)
            | SyntaxNode::Never => {}
            SyntaxNode::Array(elem) | SyntaxNode::Partial(elem) => elem.visit_identifiers(visit),
            SyntaxNode::Record { key, value } => {
                key.visit_identifiers(visit);
                value.visit_identifiers(visit);
            }
            SyntaxNode::Union(members)
            | SyntaxNode::Intersection(members)
            | SyntaxNode::Tuple(members) => {
                for member in members {
                    member.visit_identifiers(visit);
                }
            }
            SyntaxNode::Object(properties) => {
                for property in properties {
                    property.node.visit_identifiers(visit);
                }
            }
            SyntaxNode::Identifier(identifier) => visit(identifier),
        }
    }
}

pub fn string_type() -> SyntaxNode {
    SyntaxNode::String
}

pub fn number_type() -> SyntaxNode {
    SyntaxNode::Number
}

pub fn boolean_type() -> SyntaxNode {
    SyntaxNode::Boolean
}

pub fn unknown_type() -> SyntaxNode {
    SyntaxNode::Unknown
}

pub fn literal_combinator(value: impl Into<Literal>) -> SyntaxNode {
    SyntaxNode::Literal(value.into())
}

/// Local identifier with no module provenance
pub fn identifier(name: impl Into<String>) -> SyntaxNode {
    SyntaxNode::Identifier(Identifier {
        name: name.into(),
        module: None,
        alias: None,
    })
}

/// Identifier imported from `module`, optionally renamed to `alias`
pub fn imported_identifier(
    name: impl Into<String>,
    module: impl Into<String>,
    alias: Option<&str>,
) -> SyntaxNode {
    SyntaxNode::Identifier(Identifier {
        name: name.into(),
        module: Some(module.into()),
        alias: alias.map(str::to_string),
    })
}

pub fn array_combinator(elem: SyntaxNode) -> SyntaxNode {
    SyntaxNode::Array(Box::new(elem))
}

pub fn record_combinator(key: SyntaxNode, value: SyntaxNode) -> SyntaxNode {
    SyntaxNode::Record {
        key: Box::new(key),
        value: Box::new(value),
    }
}

/// Union of `members`; an empty union is `never`
pub fn union_combinator(members: Vec<SyntaxNode>) -> SyntaxNode {
    if members.is_empty() {
        SyntaxNode::Never
    } else {
        SyntaxNode::Union(members)
    }
}

pub fn intersection_combinator(members: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::Intersection(members)
}

pub fn tuple_combinator(members: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::Tuple(members)
}

pub fn type_combinator(properties: Vec<Property>) -> SyntaxNode {
    SyntaxNode::Object(properties)
}

/// `Partial<{...}>`; the wrapper makes every property optional
pub fn partial_combinator(properties: Vec<Property>) -> SyntaxNode {
    SyntaxNode::Partial(Box::new(SyntaxNode::Object(properties)))
}

pub fn property(key: impl Into<String>, node: SyntaxNode) -> Property {
    Property {
        key: key.into(),
        node,
        optional: false,
        description: None,
    }
}

pub fn optional_property(key: impl Into<String>, node: SyntaxNode) -> Property {
    Property {
        optional: true,
        ..property(key, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(node: &SyntaxNode) -> Vec<String> {
        let mut found = Vec::new();
        node.visit_identifiers(&mut |id| found.push(id.name.clone()));
        found
    }

    #[test]
    fn test_literal_conversions() {
        assert_eq!(Literal::from(1), Literal::Number(1.0));
        assert_eq!(Literal::from("a"), Literal::String("a".to_string()));
        assert_eq!(Literal::from(true), Literal::Boolean(true));
        assert_eq!(Literal::from(None::<bool>), Literal::Null);
        assert_eq!(Literal::from(Some(2.5)), Literal::Number(2.5));
    }

    #[test]
    fn test_empty_union_is_never() {
        assert_eq!(union_combinator(vec![]), SyntaxNode::Never);
        assert_eq!(
            union_combinator(vec![string_type()]),
            SyntaxNode::Union(vec![SyntaxNode::String])
        );
    }

    #[test]
    fn test_partial_leaves_properties_required() {
        let node = partial_combinator(vec![property("a", string_type())]);
        assert_eq!(
            node,
            SyntaxNode::Partial(Box::new(SyntaxNode::Object(vec![property(
                "a",
                string_type()
            )])))
        );
    }

    #[test]
    fn test_visit_identifiers_reaches_every_container() {
        let node = type_combinator(vec![
            property("a", array_combinator(identifier("A"))),
            property(
                "b",
                record_combinator(identifier("K"), union_combinator(vec![identifier("B")])),
            ),
            property(
                "c",
                tuple_combinator(vec![intersection_combinator(vec![identifier("C")])]),
            ),
            property("d", partial_combinator(vec![property("e", identifier("D"))])),
        ]);

        assert_eq!(names(&node), vec!["A", "K", "B", "C", "D"]);
    }

    #[test]
    fn test_specifier() {
        let plain = Identifier {
            name: "A".to_string(),
            module: Some("./A.ts".to_string()),
            alias: None,
        };
        assert_eq!(plain.specifier(), "A");

        let aliased = Identifier {
            alias: Some("B".to_string()),
            ..plain
        };
        assert_eq!(aliased.specifier(), "A as B");
        assert_eq!(aliased.local_name(), "B");
    }

    #[test]
    fn test_serde_roundtrip_keeps_structure() -> Result<(), Box<dyn std::error::Error>> {
        let node = record_combinator(string_type(), imported_identifier("A", "./A.ts", Some("B")));
        let json = serde_json::to_string(&node)?;
        let back: SyntaxNode = serde_json::from_str(&json)?;
        assert_eq!(back, node);
        Ok(())
    }
}
