//! Rendering of syntax nodes as TypeScript type syntax

use typenode_core::naming::is_identifier;
use typenode_core::{Literal, NodeImports, Property, SyntaxNode, TypeDeclaration};

use crate::config::CodegenConfig;

/// Render `node` with the default configuration
pub fn print(node: &SyntaxNode) -> String {
    Printer::default().print(node)
}

#[derive(Debug, Clone)]
pub struct Printer {
    indent_size: usize,
    aliases: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(&CodegenConfig::default())
    }
}

impl Printer {
    pub fn new(config: &CodegenConfig) -> Self {
        Self {
            indent_size: config.indent_size,
            aliases: false,
        }
    }

    /// Print imported identifiers under their alias, as bound by
    /// [`Printer::print_imports`]
    pub fn with_aliases(mut self, aliases: bool) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn print(&self, node: &SyntaxNode) -> String {
        let mut out = String::new();
        self.write_node(&mut out, node, 0);
        out
    }

    /// `export type Name = ...;`, preceded by its description if any
    pub fn print_declaration(&self, declaration: &TypeDeclaration) -> String {
        let mut out = String::new();
        if let Some(description) = &declaration.description {
            out.push_str(&format_doc(description));
            out.push('\n');
        }
        if declaration.exported {
            out.push_str("export ");
        }
        out.push_str("type ");
        out.push_str(&declaration.name);
        out.push_str(" = ");
        self.write_node(&mut out, &declaration.node, 0);
        out.push(';');
        out
    }

    /// One `import { ... } from "...";` line per module, sorted
    pub fn print_imports(&self, imports: &NodeImports) -> String {
        imports
            .iter()
            .map(|(module, specifiers)| {
                let specifiers: Vec<&str> = specifiers.iter().map(String::as_str).collect();
                format!(
                    "import {{ {} }} from {};",
                    specifiers.join(", "),
                    quote(module)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_size * level)
    }

    fn write_node(&self, out: &mut String, node: &SyntaxNode, level: usize) {
        match node {
            SyntaxNode::String => out.push_str("string"),
            SyntaxNode::Number => out.push_str("number"),
            SyntaxNode::Boolean => out.push_str("boolean"),
            SyntaxNode::Unknown => out.push_str("unknown"),
            SyntaxNode::Literal(literal) => out.push_str(&format_literal(literal)),
            SyntaxNode::Array(elem) => {
                out.push_str("Array<");
                self.write_node(out, elem, level);
                out.push('>');
            }
            SyntaxNode::Record { key, value } => {
                out.push_str("Record<");
                self.write_node(out, key, level);
                out.push_str(", ");
                self.write_node(out, value, level);
                out.push('>');
            }
            SyntaxNode::Union(members) if members.is_empty() => out.push_str("never"),
            SyntaxNode::Union(members) => self.write_joined(out, members, " | ", level),
            // `unknown` is the identity of `&`
            SyntaxNode::Intersection(members) if members.is_empty() => out.push_str("unknown"),
            SyntaxNode::Intersection(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" & ");
                    }
                    if matches!(member, SyntaxNode::Union(inner) if inner.len() > 1) {
                        out.push('(');
                        self.write_node(out, member, level);
                        out.push(')');
                    } else {
                        self.write_node(out, member, level);
                    }
                }
            }
            SyntaxNode::Tuple(members) => {
                out.push('[');
                self.write_joined(out, members, ", ", level);
                out.push(']');
            }
            SyntaxNode::Object(properties) => self.write_object(out, properties, level),
            SyntaxNode::Partial(inner) => {
                out.push_str("Partial<");
                self.write_node(out, inner, level);
                out.push('>');
            }
            SyntaxNode::Identifier(identifier) if self.aliases => {
                out.push_str(identifier.local_name())
            }
            SyntaxNode::Identifier(identifier) => out.push_str(&identifier.name),
            SyntaxNode::Never => out.push_str("never"),
        }
    }

    fn write_joined(&self, out: &mut String, members: &[SyntaxNode], separator: &str, level: usize) {
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.write_node(out, member, level);
        }
    }

    fn write_object(&self, out: &mut String, properties: &[Property], level: usize) {
        if properties.is_empty() {
            out.push_str("{}");
            return;
        }

        let indent = self.indent(level + 1);
        out.push_str("{\n");
        for property in properties {
            if let Some(description) = &property.description {
                out.push_str(&indent);
                out.push_str(&format_doc(description));
                out.push('\n');
            }
            out.push_str(&indent);
            out.push_str(&format_key(&property.key));
            if property.optional {
                out.push('?');
            }
            out.push_str(": ");
            self.write_node(out, &property.node, level + 1);
            out.push_str(";\n");
        }
        out.push_str(&self.indent(level));
        out.push('}');
    }
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn format_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn format_literal(literal: &Literal) -> String {
    match literal {
        Literal::Number(n) => format_number(*n),
        Literal::String(s) => quote(s),
        Literal::Boolean(b) => b.to_string(),
        Literal::Null => "null".to_string(),
    }
}

/// NaN and the infinities have no literal type, so they widen to `number`
fn format_number(n: f64) -> String {
    if n == 0.0 {
        // also -0
        "0".to_string()
    } else if n.is_finite() {
        n.to_string()
    } else {
        "number".to_string()
    }
}

fn format_doc(doc: &str) -> String {
    format!("/** {} */", doc.trim().replace("*/", "*\\/"))
}
