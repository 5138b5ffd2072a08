//! Recursive-descent recognizer and tree builder for Bugs programs.
//!
//! Each grammar rule is a `parse_*` method returning `Ok(true)` when it
//! matched and left exactly one tree on the stack, `Ok(false)` when the
//! input does not start with that rule (nothing consumed, stack untouched),
//! and `Err` once the rule has committed past its leading token and the
//! remainder is malformed.
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::tree::{ParseStack, Tree};

mod commands;
mod expressions;
mod program;

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

pub struct Parser {
    lexer: Lexer,
    stack: ParseStack,
}

impl Parser {
    pub fn new(src: &str) -> Self {
        Parser {
            lexer: Lexer::new(src),
            stack: ParseStack::new(),
        }
    }

    /// The line of the token currently under the cursor.
    pub fn line(&self) -> u32 {
        self.lexer.line()
    }

    pub fn stack(&self) -> &ParseStack {
        &self.stack
    }

    pub fn next_token(&mut self) -> Token {
        self.lexer.next_token()
    }

    pub fn push_back(&mut self) {
        self.lexer.push_back();
    }

    pub fn peek(&mut self) -> Token {
        self.lexer.peek()
    }

    /// Consume the next token and push it as a leaf if it has the given
    /// kind; otherwise leave it unread.
    pub fn next_token_matches(&mut self, kind: TokenKind) -> bool {
        let token = self.lexer.next_token();
        if token.kind == kind {
            self.stack.push_leaf(token);
            true
        } else {
            self.lexer.push_back();
            false
        }
    }

    /// Like [`Parser::next_token_matches`] but the text must match too.
    pub fn next_token_matches_text(&mut self, kind: TokenKind, text: &str) -> bool {
        let token = self.lexer.next_token();
        if token.is(kind, text) {
            self.stack.push_leaf(token);
            true
        } else {
            self.lexer.push_back();
            false
        }
    }

    /// Hand back the one tree a completed parse leaves behind.
    pub fn finish(self) -> Result<Tree, ParseError> {
        let mut entries = self.stack.into_entries();
        match entries.len() {
            1 => entries
                .pop()
                .ok_or_else(|| ParseError::internal("parse stack emptied")),
            n => Err(ParseError::internal(format!(
                "expected exactly one tree on the parse stack, found {}",
                n
            ))),
        }
    }

    pub fn parse_rule(&mut self, rule: Rule) -> Result<bool, ParseError> {
        match rule {
            Rule::Program => self.parse_program(),
            Rule::AllbugsCode => self.parse_allbugs_code(),
            Rule::BugDefinition => self.parse_bug_definition(),
            Rule::VarDeclaration => self.parse_var_declaration(),
            Rule::InitializationBlock => self.parse_initialization_block(),
            Rule::FunctionDefinition => self.parse_function_definition(),
            Rule::FunctionCall => self.parse_function_call(),
            Rule::Block => self.parse_block(),
            Rule::Command => self.parse_command(),
            Rule::Action => self.parse_action(),
            Rule::Statement => self.parse_statement(),
            Rule::MoveAction => self.parse_move_action(),
            Rule::MoveToAction => self.parse_move_to_action(),
            Rule::TurnAction => self.parse_turn_action(),
            Rule::TurnToAction => self.parse_turn_to_action(),
            Rule::LineAction => self.parse_line_action(),
            Rule::AssignmentStatement => self.parse_assignment_statement(),
            Rule::LoopStatement => self.parse_loop_statement(),
            Rule::ExitIfStatement => self.parse_exit_if_statement(),
            Rule::SwitchStatement => self.parse_switch_statement(),
            Rule::ReturnStatement => self.parse_return_statement(),
            Rule::DoStatement => self.parse_do_statement(),
            Rule::ColorStatement => self.parse_color_statement(),
            Rule::Expression => self.parse_expression(),
            Rule::ArithmeticExpression => self.parse_arithmetic_expression(),
            Rule::Term => self.parse_term(),
            Rule::Factor => self.parse_factor(),
            Rule::UnsignedFactor => self.parse_unsigned_factor(),
            Rule::ParameterList => self.parse_parameter_list(),
            Rule::AddOperator => Ok(self.parse_add_operator()),
            Rule::MultiplyOperator => Ok(self.parse_multiply_operator()),
            Rule::Comparator => self.parse_comparator(),
            Rule::Variable => Ok(self.parse_variable()),
            Rule::Eol => Ok(self.parse_eol()),
        }
    }

    /// `<eol> ::= EOL { EOL }`, left on the stack as a single EOL leaf.
    pub fn parse_eol(&mut self) -> bool {
        if !self.next_token_matches(TokenKind::Eol) {
            return false;
        }
        while self.skip(TokenKind::Eol, "\n") {}
        true
    }

    // -- Token helpers ------------------------------------------

    fn name(&mut self) -> bool {
        self.next_token_matches(TokenKind::Name)
    }

    fn number(&mut self) -> bool {
        self.next_token_matches(TokenKind::Number)
    }

    fn any_keyword(&mut self) -> bool {
        self.next_token_matches(TokenKind::Keyword)
    }

    fn keyword(&mut self, expected: &str) -> bool {
        self.next_token_matches_text(TokenKind::Keyword, expected)
    }

    fn symbol(&mut self, expected: &str) -> bool {
        self.next_token_matches_text(TokenKind::Symbol, expected)
    }

    /// Consume a token that carries no meaning in the tree.
    fn skip(&mut self, kind: TokenKind, text: &str) -> bool {
        let token = self.lexer.next_token();
        if token.is(kind, text) {
            true
        } else {
            self.lexer.push_back();
            false
        }
    }

    fn skip_symbol(&mut self, expected: &str) -> bool {
        self.skip(TokenKind::Symbol, expected)
    }

    fn skip_keyword(&mut self, expected: &str) -> bool {
        self.skip(TokenKind::Keyword, expected)
    }

    fn skip_eof(&mut self) -> bool {
        self.skip(TokenKind::Eof, "EOF")
    }

    /// Required end of line after `what`; blank lines fold into it.
    fn expect_eol(&mut self, what: &str) -> Result<(), ParseError> {
        if !self.skip(TokenKind::Eol, "\n") {
            return Err(self.err(format!("expected end of line after {}", what)));
        }
        while self.skip(TokenKind::Eol, "\n") {}
        Ok(())
    }

    fn expect_symbol(&mut self, expected: &str, what: &str) -> Result<(), ParseError> {
        if self.skip_symbol(expected) {
            Ok(())
        } else {
            Err(self.err(format!("expected '{}' {}", expected, what)))
        }
    }

    fn push_node(&mut self, text: &str) {
        self.stack.push_leaf(Token::synthetic(text));
    }

    fn make_tree(&mut self, root: usize, children: &[usize]) -> Result<(), ParseError> {
        self.stack.make_tree(root, children)
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::syntax(self.lexer.line(), msg)
    }
}

// ──────────────────────────────────────────────
// Entry points
// ──────────────────────────────────────────────

/// Every nonterminal that can be parsed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Program,
    AllbugsCode,
    BugDefinition,
    VarDeclaration,
    InitializationBlock,
    FunctionDefinition,
    FunctionCall,
    Block,
    Command,
    Action,
    Statement,
    MoveAction,
    MoveToAction,
    TurnAction,
    TurnToAction,
    LineAction,
    AssignmentStatement,
    LoopStatement,
    ExitIfStatement,
    SwitchStatement,
    ReturnStatement,
    DoStatement,
    ColorStatement,
    Expression,
    ArithmeticExpression,
    Term,
    Factor,
    UnsignedFactor,
    ParameterList,
    AddOperator,
    MultiplyOperator,
    Comparator,
    Variable,
    Eol,
}

impl Rule {
    pub const ALL: &'static [Rule] = &[
        Rule::Program,
        Rule::AllbugsCode,
        Rule::BugDefinition,
        Rule::VarDeclaration,
        Rule::InitializationBlock,
        Rule::FunctionDefinition,
        Rule::FunctionCall,
        Rule::Block,
        Rule::Command,
        Rule::Action,
        Rule::Statement,
        Rule::MoveAction,
        Rule::MoveToAction,
        Rule::TurnAction,
        Rule::TurnToAction,
        Rule::LineAction,
        Rule::AssignmentStatement,
        Rule::LoopStatement,
        Rule::ExitIfStatement,
        Rule::SwitchStatement,
        Rule::ReturnStatement,
        Rule::DoStatement,
        Rule::ColorStatement,
        Rule::Expression,
        Rule::ArithmeticExpression,
        Rule::Term,
        Rule::Factor,
        Rule::UnsignedFactor,
        Rule::ParameterList,
        Rule::AddOperator,
        Rule::MultiplyOperator,
        Rule::Comparator,
        Rule::Variable,
        Rule::Eol,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::Program => "program",
            Rule::AllbugsCode => "allbugs-code",
            Rule::BugDefinition => "bug-definition",
            Rule::VarDeclaration => "var-declaration",
            Rule::InitializationBlock => "initialization-block",
            Rule::FunctionDefinition => "function-definition",
            Rule::FunctionCall => "function-call",
            Rule::Block => "block",
            Rule::Command => "command",
            Rule::Action => "action",
            Rule::Statement => "statement",
            Rule::MoveAction => "move-action",
            Rule::MoveToAction => "move-to-action",
            Rule::TurnAction => "turn-action",
            Rule::TurnToAction => "turn-to-action",
            Rule::LineAction => "line-action",
            Rule::AssignmentStatement => "assignment-statement",
            Rule::LoopStatement => "loop-statement",
            Rule::ExitIfStatement => "exit-if-statement",
            Rule::SwitchStatement => "switch-statement",
            Rule::ReturnStatement => "return-statement",
            Rule::DoStatement => "do-statement",
            Rule::ColorStatement => "color-statement",
            Rule::Expression => "expression",
            Rule::ArithmeticExpression => "arithmetic-expression",
            Rule::Term => "term",
            Rule::Factor => "factor",
            Rule::UnsignedFactor => "unsigned-factor",
            Rule::ParameterList => "parameter-list",
            Rule::AddOperator => "add-operator",
            Rule::MultiplyOperator => "multiply-operator",
            Rule::Comparator => "comparator",
            Rule::Variable => "variable",
            Rule::Eol => "eol",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .iter()
            .copied()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| format!("unknown rule '{}'", s))
    }
}

/// Parse a whole program. Blank and comment-only lines before the first
/// block are ignored.
pub fn parse(src: &str) -> Result<Tree, ParseError> {
    let mut p = Parser::new(src);
    while p.skip(TokenKind::Eol, "\n") {}
    if !p.parse_program()? {
        return Err(p.err("expected 'Allbugs' or 'Bug'"));
    }
    p.finish()
}

/// Parse a single nonterminal from the start of `src`. Returns `None` when
/// the input does not begin with that rule. Trailing input is ignored.
pub fn parse_rule(src: &str, rule: Rule) -> Result<Option<Tree>, ParseError> {
    let mut p = Parser::new(src);
    if !p.parse_rule(rule)? {
        return Ok(None);
    }
    p.finish().map(Some)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
