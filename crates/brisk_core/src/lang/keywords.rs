//! Define the reserved keyword vocabulary for the Brisk language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records spellings and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Keywords are only recognized by the lexer when both ends of the match sit on a word boundary, so
//!   `classify` is an identifier and not `class` followed by `ify`.
//!
//! ## Examples
//! ```rust
//! use brisk_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("while"), Some(KeywordId::While));
//! assert_eq!(keywords::as_str(KeywordId::While), "while");
//! assert_eq!(keywords::from_str("classify"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Bindings
    Let,
    Var,
    Const,

    // Declarations
    Fn,
    Public,
    External,
    Async,
    Class,
    Struct,
    Has,
    And,
    Enum,
    Module,
    Import,

    // Control flow
    If,
    Else,
    While,
    Do,
    For,
    Switch,
    Case,
    Default,
    Try,
    Catch,
    Return,
    Throw,
    Break,
    Continue,

    // Literals
    True,
    False,
    Null,
}

/// High-level grouping for documentation and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Binding,
    Declaration,
    Modifier,
    ControlFlow,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Bindings
    info(KeywordId::Let, "let", KeywordCategory::Binding),
    info(KeywordId::Var, "var", KeywordCategory::Binding),
    info(KeywordId::Const, "const", KeywordCategory::Binding),
    // Declarations
    info(KeywordId::Fn, "fn", KeywordCategory::Declaration),
    info(KeywordId::Public, "public", KeywordCategory::Modifier),
    info(KeywordId::External, "external", KeywordCategory::Modifier),
    info(KeywordId::Async, "async", KeywordCategory::Modifier),
    info(KeywordId::Class, "class", KeywordCategory::Declaration),
    info(KeywordId::Struct, "struct", KeywordCategory::Declaration),
    info(KeywordId::Has, "has", KeywordCategory::Declaration),
    info(KeywordId::And, "and", KeywordCategory::Declaration),
    info(KeywordId::Enum, "enum", KeywordCategory::Declaration),
    info(KeywordId::Module, "module", KeywordCategory::Declaration),
    info(KeywordId::Import, "import", KeywordCategory::Declaration),
    // Control flow
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow),
    info(KeywordId::Switch, "switch", KeywordCategory::ControlFlow),
    info(KeywordId::Case, "case", KeywordCategory::ControlFlow),
    info(KeywordId::Default, "default", KeywordCategory::ControlFlow),
    info(KeywordId::Try, "try", KeywordCategory::ControlFlow),
    info(KeywordId::Catch, "catch", KeywordCategory::ControlFlow),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    info(KeywordId::Throw, "throw", KeywordCategory::ControlFlow),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow),
    info(KeywordId::Continue, "continue", KeywordCategory::ControlFlow),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Return `true` if `id` may prefix a declaration as a modifier (`public`, `external`, `async`).
pub fn is_modifier(id: KeywordId) -> bool {
    category(id) == KeywordCategory::Modifier
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers() {
        assert!(is_modifier(KeywordId::Public));
        assert!(is_modifier(KeywordId::External));
        assert!(is_modifier(KeywordId::Async));
        assert!(!is_modifier(KeywordId::Fn));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(from_str("Class"), None);
        assert_eq!(from_str("class"), Some(KeywordId::Class));
    }
}
