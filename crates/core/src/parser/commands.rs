use super::Parser;
use crate::error::ParseError;

impl Parser {
    /// `<block> ::= "{" <eol> { <command> } "}" <eol>`
    pub fn parse_block(&mut self) -> Result<bool, ParseError> {
        if !self.skip_symbol("{") {
            return Ok(false);
        }
        self.push_node("block");
        self.expect_eol("'{'")?;
        loop {
            if self.parse_command()? {
                self.make_tree(2, &[1])?;
            } else if self.skip_symbol("}") {
                break;
            } else {
                return Err(self.err("expected a command or '}' in block"));
            }
        }
        self.expect_eol("'}'")?;
        Ok(true)
    }

    pub fn parse_command(&mut self) -> Result<bool, ParseError> {
        Ok(self.parse_action()? || self.parse_statement()?)
    }

    pub fn parse_action(&mut self) -> Result<bool, ParseError> {
        Ok(self.parse_move_action()?
            || self.parse_move_to_action()?
            || self.parse_turn_action()?
            || self.parse_turn_to_action()?
            || self.parse_line_action()?)
    }

    pub fn parse_statement(&mut self) -> Result<bool, ParseError> {
        Ok(self.parse_assignment_statement()?
            || self.parse_loop_statement()?
            || self.parse_exit_if_statement()?
            || self.parse_switch_statement()?
            || self.parse_return_statement()?
            || self.parse_do_statement()?
            || self.parse_color_statement()?)
    }

    // -- Actions -------------------------------------------------

    /// Shared shape of `move`, `turn`, `turnto` and `return`:
    /// keyword, one expression, end of line.
    fn parse_keyword_with_expression(&mut self, keyword: &str) -> Result<bool, ParseError> {
        if !self.keyword(keyword) {
            return Ok(false);
        }
        if !self.parse_expression()? {
            return Err(self.err(format!("expected an expression after '{}'", keyword)));
        }
        self.make_tree(2, &[1])?;
        self.expect_eol(&format!("'{}' statement", keyword))?;
        Ok(true)
    }

    /// `<move action> ::= "move" <expression> <eol>`
    pub fn parse_move_action(&mut self) -> Result<bool, ParseError> {
        self.parse_keyword_with_expression("move")
    }

    /// `<moveto action> ::= "moveto" <expression> "," <expression> <eol>`
    pub fn parse_move_to_action(&mut self) -> Result<bool, ParseError> {
        if !self.keyword("moveto") {
            return Ok(false);
        }
        self.expression_operand("moveto")?;
        self.expect_symbol(",", "between 'moveto' coordinates")?;
        self.expression_operand("moveto")?;
        self.expect_eol("'moveto' action")?;
        Ok(true)
    }

    /// `<turn action> ::= "turn" <expression> <eol>`
    pub fn parse_turn_action(&mut self) -> Result<bool, ParseError> {
        self.parse_keyword_with_expression("turn")
    }

    /// `<turnto action> ::= "turnto" <expression> <eol>`
    pub fn parse_turn_to_action(&mut self) -> Result<bool, ParseError> {
        self.parse_keyword_with_expression("turnto")
    }

    /// `<line action> ::= "line" <expression> "," <expression> "," <expression> "," <expression> <eol>`
    pub fn parse_line_action(&mut self) -> Result<bool, ParseError> {
        if !self.keyword("line") {
            return Ok(false);
        }
        self.expression_operand("line")?;
        for _ in 0..3 {
            self.expect_symbol(",", "between 'line' coordinates")?;
            self.expression_operand("line")?;
        }
        self.expect_eol("'line' action")?;
        Ok(true)
    }

    /// Parse a required expression and attach it to the keyword node below.
    fn expression_operand(&mut self, keyword: &str) -> Result<(), ParseError> {
        if !self.parse_expression()? {
            return Err(self.err(format!("expected an expression in '{}'", keyword)));
        }
        self.make_tree(2, &[1])
    }

    // -- Statements ----------------------------------------------

    /// `<assignment statement> ::= <variable> "=" <expression> <eol>`
    pub fn parse_assignment_statement(&mut self) -> Result<bool, ParseError> {
        if !self.parse_variable() {
            return Ok(false);
        }
        self.push_node("assign");
        self.make_tree(1, &[2])?;
        self.expect_symbol("=", "after the assigned variable")?;
        if !self.parse_expression()? {
            return Err(self.err("expected an expression after '='"));
        }
        self.make_tree(2, &[1])?;
        self.expect_eol("assignment")?;
        Ok(true)
    }

    /// `<loop statement> ::= "loop" <block>`
    pub fn parse_loop_statement(&mut self) -> Result<bool, ParseError> {
        if !self.keyword("loop") {
            return Ok(false);
        }
        if !self.parse_block()? {
            return Err(self.err("expected a block after 'loop'"));
        }
        self.make_tree(2, &[1])?;
        Ok(true)
    }

    /// `<exit if statement> ::= "exit" "if" <expression> <eol>`
    pub fn parse_exit_if_statement(&mut self) -> Result<bool, ParseError> {
        if !self.keyword("exit") {
            return Ok(false);
        }
        if !self.skip_keyword("if") {
            return Err(self.err("expected 'if' after 'exit'"));
        }
        if !self.parse_expression()? {
            return Err(self.err("expected an expression after 'exit if'"));
        }
        self.make_tree(2, &[1])?;
        self.expect_eol("'exit if' statement")?;
        Ok(true)
    }

    /// ```text
    /// <switch statement> ::= "switch" "{" <eol>
    ///                        { "case" <expression> <eol> { <command> } }
    ///                        "}" <eol>
    /// ```
    ///
    /// Each case becomes `case(expression, block(commands...))`.
    pub fn parse_switch_statement(&mut self) -> Result<bool, ParseError> {
        if !self.keyword("switch") {
            return Ok(false);
        }
        self.expect_symbol("{", "after 'switch'")?;
        self.expect_eol("'switch {'")?;
        while self.keyword("case") {
            if !self.parse_expression()? {
                return Err(self.err("expected an expression after 'case'"));
            }
            self.make_tree(2, &[1])?;
            self.expect_eol("case expression")?;
            self.push_node("block");
            while self.parse_command()? {
                self.make_tree(2, &[1])?;
            }
            self.make_tree(2, &[1])?;
            self.make_tree(2, &[1])?;
        }
        self.expect_symbol("}", "to close 'switch'")?;
        self.expect_eol("'switch' statement")?;
        Ok(true)
    }

    /// `<return statement> ::= "return" <expression> <eol>`
    pub fn parse_return_statement(&mut self) -> Result<bool, ParseError> {
        self.parse_keyword_with_expression("return")
    }

    /// `<do statement> ::= "do" <variable> [ <parameter list> ] <eol>`
    ///
    /// Produces the same `call` node a function call in an expression does.
    pub fn parse_do_statement(&mut self) -> Result<bool, ParseError> {
        if !self.skip_keyword("do") {
            return Ok(false);
        }
        self.push_node("call");
        if !self.parse_variable() {
            return Err(self.err("expected a function name after 'do'"));
        }
        self.make_tree(2, &[1])?;
        if self.parse_parameter_list()? {
            self.make_tree(2, &[1])?;
        }
        self.expect_eol("'do' statement")?;
        Ok(true)
    }

    /// `<color statement> ::= "color" <KEYWORD> <eol>`
    pub fn parse_color_statement(&mut self) -> Result<bool, ParseError> {
        if !self.keyword("color") {
            return Ok(false);
        }
        if !self.any_keyword() {
            return Err(self.err("expected a color name after 'color'"));
        }
        self.make_tree(2, &[1])?;
        self.expect_eol("'color' statement")?;
        Ok(true)
    }
}
