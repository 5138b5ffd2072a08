use super::Parser;
use crate::error::ParseError;

impl Parser {
    // -- Expression parsing --------------------------------------

    /// `<expression> ::= <arithmetic expression> { <comparator> <arithmetic expression> }`
    pub fn parse_expression(&mut self) -> Result<bool, ParseError> {
        if !self.parse_arithmetic_expression()? {
            return Ok(false);
        }
        while self.parse_comparator()? {
            if !self.parse_arithmetic_expression()? {
                return Err(self.err("expected an expression after comparator"));
            }
            self.make_tree(2, &[3, 1])?;
        }
        Ok(true)
    }

    /// `<arithmetic expression> ::= <term> { <add operator> <term> }`
    pub fn parse_arithmetic_expression(&mut self) -> Result<bool, ParseError> {
        if !self.parse_term()? {
            return Ok(false);
        }
        while self.parse_add_operator() {
            if !self.parse_term()? {
                return Err(self.err("expected a term after '+' or '-'"));
            }
            self.make_tree(2, &[3, 1])?;
        }
        Ok(true)
    }

    /// `<term> ::= <factor> { <multiply operator> <factor> }`
    pub fn parse_term(&mut self) -> Result<bool, ParseError> {
        if !self.parse_factor()? {
            return Ok(false);
        }
        while self.parse_multiply_operator() {
            if !self.parse_factor()? {
                return Err(self.err("expected a factor after '*' or '/'"));
            }
            self.make_tree(2, &[3, 1])?;
        }
        Ok(true)
    }

    /// `<factor> ::= [ "+" | "-" ] <unsigned factor>`
    pub fn parse_factor(&mut self) -> Result<bool, ParseError> {
        if self.symbol("+") || self.symbol("-") {
            if !self.parse_unsigned_factor()? {
                return Err(self.err("expected a factor after unary '+' or '-'"));
            }
            self.make_tree(2, &[1])?;
            return Ok(true);
        }
        self.parse_unsigned_factor()
    }

    /// ```text
    /// <unsigned factor> ::= <NAME> "." <NAME>
    ///                     | <NAME> <parameter list>
    ///                     | <NAME>
    ///                     | <NUMBER>
    ///                     | "(" <expression> ")"
    /// ```
    pub fn parse_unsigned_factor(&mut self) -> Result<bool, ParseError> {
        if self.name() {
            if self.symbol(".") {
                if !self.name() {
                    return Err(self.err("expected a name after '.'"));
                }
                self.make_tree(2, &[3, 1])?;
            } else if self.parse_parameter_list()? {
                self.push_node("call");
                self.make_tree(1, &[3, 2])?;
            }
            return Ok(true);
        }
        if self.number() {
            return Ok(true);
        }
        if self.skip_symbol("(") {
            if !self.parse_expression()? {
                return Err(self.err("expected an expression after '('"));
            }
            if !self.skip_symbol(")") {
                return Err(self.err("unclosed parenthesized expression"));
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// `<parameter list> ::= "(" [ <expression> { "," <expression> } ] ")"`
    ///
    /// Builds a `var` node holding the argument expressions.
    pub fn parse_parameter_list(&mut self) -> Result<bool, ParseError> {
        if !self.skip_symbol("(") {
            return Ok(false);
        }
        self.push_node("var");
        if self.parse_expression()? {
            self.make_tree(2, &[1])?;
            while self.skip_symbol(",") {
                if !self.parse_expression()? {
                    return Err(self.err("expected an expression after ','"));
                }
                self.make_tree(2, &[1])?;
            }
        }
        self.expect_symbol(")", "to close the parameter list")?;
        Ok(true)
    }

    pub fn parse_add_operator(&mut self) -> bool {
        self.symbol("+") || self.symbol("-")
    }

    pub fn parse_multiply_operator(&mut self) -> bool {
        self.symbol("*") || self.symbol("/")
    }

    pub fn parse_variable(&mut self) -> bool {
        self.name()
    }

    /// `<comparator> ::= "<" | "<=" | "=" | "!=" | ">=" | ">"`
    ///
    /// The lexer hands out `<=`, `>=` and `!=` as two symbols; they are
    /// merged here into one node.
    pub fn parse_comparator(&mut self) -> Result<bool, ParseError> {
        let Some(first) = ["<", ">", "!"].into_iter().find(|s| self.symbol(s)) else {
            return Ok(self.symbol("="));
        };
        if self.skip_symbol("=") {
            self.stack.pop()?;
            self.push_node(&format!("{}=", first));
        } else if first == "!" {
            return Err(self.err("expected '=' after '!'"));
        }
        Ok(true)
    }
}
