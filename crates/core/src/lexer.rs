use serde::Serialize;

/// Reserved words. Anything identifier-shaped that is not listed here lexes
/// as a [`TokenKind::Name`].
pub const KEYWORDS: &[&str] = &[
    "Allbugs", "Bug", "case", "color", "define", "do", "exit", "if", "initially", "line", "loop",
    "move", "moveto", "return", "switch", "turn", "turnto", "using", "var",
    // Colors
    "black", "blue", "brown", "cyan", "darkGray", "gray", "green", "lightGray", "magenta",
    "orange", "pink", "purple", "red", "white", "yellow", "none",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Name,
    Keyword,
    Number,
    Symbol,
    Eol,
    Eof,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Name => "NAME",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Number => "NUMBER",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Eol => "EOL",
            TokenKind::Eof => "EOF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn eol() -> Self {
        Token::new(TokenKind::Eol, "\n")
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, "EOF")
    }

    /// A token for a node the parser creates without a source token
    /// (`list`, `block`, `call`, merged comparators, ...). The kind is
    /// inferred from the text.
    pub fn synthetic(text: &str) -> Self {
        let kind = match text.chars().next() {
            _ if is_keyword(text) => TokenKind::Keyword,
            Some(c) if c.is_alphabetic() => TokenKind::Name,
            Some(c) if c.is_ascii_digit() => TokenKind::Number,
            Some('\n') => TokenKind::Eol,
            _ => TokenKind::Symbol,
        };
        Token::new(kind, text)
    }

    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

/// A token paired with the source line it appeared on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spanned {
    pub line: u32,
    #[serde(flatten)]
    pub token: Token,
}

/// Pull-based tokenizer with a single slot of pushback.
///
/// The line counter starts at 1 and moves forward every time an EOL is
/// handed out (including a replayed one) and back when an EOL is pushed
/// back, so `line()` always names the line the parser is looking at.
#[derive(Debug, Clone)]
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    last: Option<Token>,
    pushed_back: bool,
}

impl Lexer {
    pub fn new(src: &str) -> Self {
        Lexer {
            chars: src.chars().collect(),
            pos: 0,
            line: 1,
            last: None,
            pushed_back: false,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn next_token(&mut self) -> Token {
        if self.pushed_back {
            self.pushed_back = false;
            if let Some(token) = self.last.clone() {
                if token.kind == TokenKind::Eol {
                    self.line += 1;
                }
                return token;
            }
        }
        let token = self.scan();
        if token.kind == TokenKind::Eol {
            self.line += 1;
        }
        self.last = Some(token.clone());
        token
    }

    /// Arrange for the most recent token to be returned again. Only one
    /// token can be pushed back; a second call before the next read does
    /// nothing.
    pub fn push_back(&mut self) {
        if self.pushed_back {
            return;
        }
        if let Some(token) = &self.last {
            if token.kind == TokenKind::Eol {
                self.line -= 1;
            }
            self.pushed_back = true;
        }
    }

    pub fn peek(&mut self) -> Token {
        let token = self.next_token();
        self.push_back();
        token
    }

    fn at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn scan(&mut self) -> Token {
        loop {
            let Some(c) = self.at(0) else {
                return Token::eof();
            };

            if c == '\n' {
                self.pos += 1;
                return Token::eol();
            }
            if c == '\r' {
                self.pos += 1;
                if self.at(0) == Some('\n') {
                    self.pos += 1;
                }
                return Token::eol();
            }

            // Line comment; the newline that ends it is still significant.
            if c == '/' && self.at(1) == Some('/') {
                while matches!(self.at(0), Some(ch) if ch != '\n' && ch != '\r') {
                    self.pos += 1;
                }
                continue;
            }

            // Block comment. Unterminated ones run to end of input.
            if c == '/' && self.at(1) == Some('*') {
                self.pos += 2;
                loop {
                    match self.at(0) {
                        None => break,
                        Some('*') if self.at(1) == Some('/') => {
                            self.pos += 2;
                            break;
                        }
                        Some('\n') => {
                            self.line += 1;
                            self.pos += 1;
                        }
                        Some(_) => self.pos += 1,
                    }
                }
                continue;
            }

            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }

            if c.is_ascii_digit() {
                return self.scan_number();
            }

            if c.is_alphabetic() {
                let start = self.pos;
                while matches!(self.at(0), Some(ch) if ch.is_alphanumeric()) {
                    self.pos += 1;
                }
                let word: String = self.chars[start..self.pos].iter().collect();
                let kind = if is_keyword(&word) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Name
                };
                return Token::new(kind, word);
            }

            // Quoted text is not part of the language: swallow it whole and
            // hand the parser a lone quote symbol it will never accept.
            if c == '"' {
                self.pos += 1;
                while let Some(ch) = self.at(0) {
                    if ch == '\n' || ch == '\r' {
                        break;
                    }
                    self.pos += 1;
                    if ch == '"' {
                        break;
                    }
                }
                return Token::new(TokenKind::Symbol, "\"");
            }

            self.pos += 1;
            return Token::new(TokenKind::Symbol, c.to_string());
        }
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.at(0), Some(ch) if ch.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.at(0) == Some('.') {
            self.pos += 1;
            while matches!(self.at(0), Some(ch) if ch.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        // Digits with at most one dot always parse as f64.
        let value: f64 = literal.parse().unwrap_or_default();
        Token::new(TokenKind::Number, canonical_number(value))
    }
}

/// Decimal rendering used for NUMBER tokens: always carries a fractional
/// part, so `5` becomes `5.0`.
pub fn canonical_number(value: f64) -> String {
    format!("{:?}", value)
}

/// Run the lexer to end of input. The returned stream always ends with a
/// single EOF token; each EOL carries the line it terminates.
pub fn lex(src: &str) -> Vec<Spanned> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let line = match token.kind {
            TokenKind::Eol => lexer.line() - 1,
            _ => lexer.line(),
        };
        let done = token.kind == TokenKind::Eof;
        tokens.push(Spanned { line, token });
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(src: &str) -> Vec<(TokenKind, String)> {
        lex(src)
            .into_iter()
            .map(|s| (s.token.kind, s.token.text))
            .collect()
    }

    #[test]
    fn classifies_each_token_kind() {
        let mut lexer = Lexer::new("abc move 25 *\n");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Name, "abc"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Keyword, "move"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Number, "25.0"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Symbol, "*"));
        assert_eq!(lexer.next_token(), Token::eol());
        assert_eq!(lexer.next_token(), Token::eof());
    }

    #[test]
    fn dot_between_names_is_a_symbol_but_inside_numbers_it_is_not() {
        let mut lexer = Lexer::new("foo.bar 123.456");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Name, "foo"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Symbol, "."));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Name, "bar"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Number, "123.456"));
    }

    #[test]
    fn keywords_are_case_sensitive() {
        let toks = kinds_and_texts("Bug bug BUG");
        assert_eq!(toks[0], (TokenKind::Keyword, "Bug".to_owned()));
        assert_eq!(toks[1], (TokenKind::Name, "bug".to_owned()));
        assert_eq!(toks[2], (TokenKind::Name, "BUG".to_owned()));
    }

    #[test]
    fn color_names_are_keywords() {
        let toks = kinds_and_texts("cyan darkGray burgandy");
        assert_eq!(toks[0].0, TokenKind::Keyword);
        assert_eq!(toks[1].0, TokenKind::Keyword);
        assert_eq!(toks[2].0, TokenKind::Name);
    }

    #[test]
    fn comparison_operators_are_separate_symbols() {
        let toks = kinds_and_texts("<= != >=");
        let texts: Vec<&str> = toks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["<", "=", "!", "=", ">", "=", "EOF"]);
    }

    #[test]
    fn minus_is_never_part_of_a_number() {
        let toks = kinds_and_texts("-5");
        assert_eq!(toks[0], (TokenKind::Symbol, "-".to_owned()));
        assert_eq!(toks[1], (TokenKind::Number, "5.0".to_owned()));
    }

    #[test]
    fn comments_are_skipped() {
        let toks = kinds_and_texts("a // trailing words\nb /* inner\nlines */ c");
        let texts: Vec<&str> = toks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["a", "\n", "b", "c", "EOF"]);
    }

    #[test]
    fn block_comment_newlines_advance_the_line_counter() {
        let mut lexer = Lexer::new("/* one\ntwo\n*/ x");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Name, "x"));
        assert_eq!(lexer.line(), 3);
    }

    #[test]
    fn each_blank_line_is_its_own_eol() {
        let toks = kinds_and_texts("a\n\n\r\n\rb");
        let eols = toks.iter().filter(|(k, _)| *k == TokenKind::Eol).count();
        assert_eq!(eols, 4);
    }

    #[test]
    fn eof_repeats() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token(), Token::eof());
        assert_eq!(lexer.next_token(), Token::eof());
    }

    #[test]
    fn push_back_replays_one_token() {
        let mut lexer = Lexer::new("abc 25");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Name, "abc"));
        lexer.push_back();
        lexer.push_back();
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Name, "abc"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Number, "25.0"));
    }

    #[test]
    fn pushing_back_an_eol_restores_the_line() {
        let mut lexer = Lexer::new("a\nb");
        lexer.next_token();
        assert_eq!(lexer.next_token(), Token::eol());
        assert_eq!(lexer.line(), 2);
        lexer.push_back();
        assert_eq!(lexer.line(), 1);
        assert_eq!(lexer.next_token(), Token::eol());
        assert_eq!(lexer.line(), 2);
    }

    #[test]
    fn quoted_text_collapses_to_one_symbol() {
        let toks = kinds_and_texts("\"hello world\" x");
        assert_eq!(toks[0], (TokenKind::Symbol, "\"".to_owned()));
        assert_eq!(toks[1], (TokenKind::Name, "x".to_owned()));
    }

    #[test]
    fn synthetic_tokens_infer_their_kind() {
        assert_eq!(Token::synthetic("var").kind, TokenKind::Keyword);
        assert_eq!(Token::synthetic("block").kind, TokenKind::Name);
        assert_eq!(Token::synthetic("<=").kind, TokenKind::Symbol);
        assert_eq!(Token::synthetic("7.0").kind, TokenKind::Number);
    }

    #[test]
    fn lex_reports_lines() {
        let toks = lex("a\nb");
        let lines: Vec<u32> = toks.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![1, 1, 2, 2]);
    }
}
