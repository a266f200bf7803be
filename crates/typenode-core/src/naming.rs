//! Identifier rules for emitted TypeScript.
//!
//! Property keys that fail [`is_identifier`] are quoted by the printer.
//! Declaration names must pass [`is_declaration_name`].

/// Words that cannot name a type alias
pub const RESERVED_WORDS: &[&str] = &[
    "any", "boolean", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for",
    "function", "if", "import", "in", "instanceof", "never", "new", "null", "number", "object",
    "return", "string", "super", "switch", "symbol", "this", "throw", "true", "try", "typeof",
    "undefined", "unknown", "var", "void", "while", "with",
];

/// Whether `name` can be written unquoted as a property key
///
/// # Examples
/// ```
/// use typenode_core::naming::is_identifier;
/// assert!(is_identifier("apiVersion"));
/// assert!(is_identifier("_tag"));
/// assert!(is_identifier("$ref"));
/// assert!(!is_identifier("x-kubernetes"));
/// assert!(!is_identifier("1st"));
/// ```
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Whether `name` can name a type declaration
pub fn is_declaration_name(name: &str) -> bool {
    is_identifier(name) && !RESERVED_WORDS.contains(&name)
}
