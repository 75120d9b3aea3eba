//! The ordered pattern → kind rule table driving the lexer.
//!
//! Every rule is an anchored regular expression tried at the current offset. Order matters:
//! - comments precede the `/` operators,
//! - literal rules precede operators and punctuation (floats before integers),
//! - symbol rules are sorted longest spelling first so `<<=` wins over `<<` and `<`,
//! - keyword rules precede the identifier rule and carry the `keyword` flag, which makes the lexer
//!   additionally require word boundaries on both ends of the match.

use brisk_core::lang::{keywords, operators, punctuation};
use regex::Regex;

use super::tokens::TokenKind;

/// Pattern source for one rule, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub kind: TokenKind,
    pub pattern: String,
    pub keyword: bool,
}

impl RuleSpec {
    /// A rule whose pattern is a regular expression.
    pub fn regex(kind: TokenKind, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
            keyword: false,
        }
    }

    /// A rule matching `spelling` literally.
    pub fn literal(kind: TokenKind, spelling: &str) -> Self {
        Self::regex(kind, regex::escape(spelling))
    }

    /// A keyword rule: matched literally, accepted only between word boundaries.
    pub fn keyword(kind: TokenKind, spelling: &str) -> Self {
        Self {
            keyword: true,
            ..Self::literal(kind, spelling)
        }
    }
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct TokenRule {
    pub kind: TokenKind,
    pub pattern: Regex,
    pub keyword: bool,
}

impl TokenRule {
    /// Length of the match at the very start of `input`, if any.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.pattern.find(input).map(|m| m.end()).filter(|len| *len > 0)
    }
}

/// Immutable, ordered rule table. Build once, share across lexers.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<TokenRule>,
}

impl RuleTable {
    /// Compile rule specs in the given order.
    ///
    /// ## Errors
    /// Returns the first [`regex::Error`] if a pattern does not compile.
    pub fn new(specs: impl IntoIterator<Item = RuleSpec>) -> Result<Self, regex::Error> {
        let rules = specs
            .into_iter()
            .map(|spec| {
                Ok(TokenRule {
                    kind: spec.kind,
                    pattern: Regex::new(&format!("^(?:{})", spec.pattern))?,
                    keyword: spec.keyword,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        tracing::debug!(rule_count = rules.len(), "compiled token rule table");
        Ok(Self { rules })
    }

    /// The standard Brisk rule table, derived from the `brisk_core` registries.
    pub fn standard() -> Self {
        Self::new(standard_specs()).expect("INVARIANT: built-in token patterns are valid regular expressions")
    }

    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Rule specs for the standard table, in matching order.
pub fn standard_specs() -> Vec<RuleSpec> {
    let mut specs = vec![
        RuleSpec::regex(TokenKind::Comment, r"//[^\n]*"),
        // An unclosed block comment runs to the end of input; the lexer rejects it.
        RuleSpec::regex(TokenKind::Comment, r"/\*(?s:.*?)(?:\*/|\z)"),
        RuleSpec::regex(TokenKind::Float, r"[0-9]+\.[0-9]+(?:[eE][+-]?[0-9]+)?"),
        RuleSpec::regex(TokenKind::Int, r"0[xX][0-9a-fA-F]+"),
        RuleSpec::regex(TokenKind::Int, r"[0-9]+"),
        RuleSpec::regex(TokenKind::String, r#""(?:[^"\\\n]|\\.)*""#),
        RuleSpec::regex(TokenKind::Char, r"'(?:[^'\\\n]|\\.)'"),
    ];

    let mut symbols: Vec<(TokenKind, &'static str)> = operators::OPERATORS
        .iter()
        .map(|o| (TokenKind::Operator(o.id), o.spelling))
        .chain(
            punctuation::PUNCTUATION
                .iter()
                .map(|p| (TokenKind::Punctuation(p.id), p.canonical)),
        )
        .collect();
    // Longest match first; the sort is stable so registry order breaks ties.
    symbols.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    specs.extend(symbols.into_iter().map(|(kind, spelling)| RuleSpec::literal(kind, spelling)));

    specs.extend(
        keywords::KEYWORDS
            .iter()
            .map(|k| RuleSpec::keyword(TokenKind::Keyword(k.id), k.canonical)),
    );

    specs.push(RuleSpec::regex(TokenKind::Ident, r"[A-Za-z_][A-Za-z0-9_]*"));
    specs
}
