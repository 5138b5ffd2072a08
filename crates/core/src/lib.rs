//! bugs-core: lexer and recursive-descent parser for the Bugs language.
//!
//! Turns Bugs source text into a concrete syntax tree, failing fast with a
//! line-numbered [`ParseError`] on the first malformed construct.
//!
//! # Public API
//!
//! - [`parse()`] -- parse a whole program into one [`Tree`]
//! - [`parse_rule()`] -- parse any single nonterminal ([`Rule`])
//! - [`Parser`] -- the rule-by-rule recognizer, for callers that need the
//!   boolean "matched here" contract of each rule
//! - [`lex()`] / [`Lexer`] -- the token stream
//! - [`Tree`], [`ParseStack`] -- the tree and the stack it is built on

pub mod error;
pub mod lexer;
pub mod parser;
pub mod tree;

// ── Convenience re-exports ───────────────────────────────────────────

pub use error::ParseError;
pub use lexer::{lex, Lexer, Spanned, Token, TokenKind, KEYWORDS};
pub use parser::{parse, parse_rule, Parser, Rule};
pub use tree::{ParseStack, Tree};
