use super::Parser;
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    // -- Top-level structure ------------------------------------

    /// `<program> ::= [ <allbugs code> ] <bug definition> { <bug definition> } EOF`
    ///
    /// Builds `program(Allbugs, list(Bug...))`. Without an Allbugs block the
    /// first child is an empty `Allbugs` node.
    pub fn parse_program(&mut self) -> Result<bool, ParseError> {
        if self.parse_allbugs_code()? {
            if !self.parse_bug_definition()? {
                return Err(self.err("expected a 'Bug' definition after 'Allbugs'"));
            }
        } else {
            if !self.peek().is(TokenKind::Keyword, "Bug") {
                return Ok(false);
            }
            self.push_node("Allbugs");
            if !self.parse_bug_definition()? {
                return Err(ParseError::internal("'Bug' lookahead did not start a bug"));
            }
        }
        self.push_node("list");
        self.make_tree(1, &[2])?;
        while self.parse_bug_definition()? {
            self.make_tree(2, &[1])?;
        }
        if !self.skip_eof() {
            return Err(self.err("expected end of input after the last bug definition"));
        }
        self.push_node("program");
        self.make_tree(1, &[3, 2])?;
        Ok(true)
    }

    /// `<allbugs code> ::= "Allbugs" "{" <eol> { <var declaration> } { <function definition> } "}" <eol>`
    pub fn parse_allbugs_code(&mut self) -> Result<bool, ParseError> {
        if !self.keyword("Allbugs") {
            return Ok(false);
        }
        self.expect_symbol("{", "after 'Allbugs'")?;
        self.expect_eol("'Allbugs {'")?;
        self.push_node("list");
        while self.parse_var_declaration()? {
            self.make_tree(2, &[1])?;
        }
        self.push_node("list");
        while self.parse_function_definition()? {
            self.make_tree(2, &[1])?;
        }
        self.expect_symbol("}", "to close 'Allbugs'")?;
        self.expect_eol("'Allbugs' block")?;
        self.make_tree(3, &[2, 1])?;
        Ok(true)
    }

    /// ```text
    /// <bug definition> ::= "Bug" <NAME> "{" <eol>
    ///                      { <var declaration> }
    ///                      [ <initialization block> ]
    ///                      <command> { <command> }
    ///                      { <function definition> }
    ///                      "}" <eol>
    /// ```
    ///
    /// Builds `Bug(name, list(var...), initially(block), block(command...),
    /// list(function...))`. A missing initialization block is filled in with
    /// an empty one.
    pub fn parse_bug_definition(&mut self) -> Result<bool, ParseError> {
        if !self.keyword("Bug") {
            return Ok(false);
        }
        if !self.name() {
            return Err(self.err("expected a bug name after 'Bug'"));
        }
        self.expect_symbol("{", "after the bug name")?;
        self.expect_eol("'{'")?;
        self.make_tree(2, &[1])?;

        self.push_node("list");
        while self.parse_var_declaration()? {
            self.make_tree(2, &[1])?;
        }
        self.make_tree(2, &[1])?;

        if !self.parse_initialization_block()? {
            self.push_node("initially");
            self.push_node("block");
            self.make_tree(2, &[1])?;
        }
        self.make_tree(2, &[1])?;

        if !self.parse_command()? {
            return Err(self.err("expected at least one command in bug definition"));
        }
        self.push_node("block");
        self.make_tree(1, &[2])?;
        while self.parse_command()? {
            self.make_tree(2, &[1])?;
        }
        self.make_tree(2, &[1])?;

        self.push_node("list");
        while self.parse_function_definition()? {
            self.make_tree(2, &[1])?;
        }
        self.expect_symbol("}", "to close the bug definition")?;
        self.expect_eol("bug definition")?;
        self.make_tree(2, &[1])?;
        Ok(true)
    }

    /// `<var declaration> ::= "var" <NAME> { "," <NAME> } <eol>`
    pub fn parse_var_declaration(&mut self) -> Result<bool, ParseError> {
        if !self.keyword("var") {
            return Ok(false);
        }
        if !self.name() {
            return Err(self.err("expected a variable name after 'var'"));
        }
        self.make_tree(2, &[1])?;
        while self.skip_symbol(",") {
            if !self.name() {
                return Err(self.err("expected a variable name after ','"));
            }
            self.make_tree(2, &[1])?;
        }
        self.expect_eol("variable declaration")?;
        Ok(true)
    }

    /// `<initialization block> ::= "initially" <block>`
    pub fn parse_initialization_block(&mut self) -> Result<bool, ParseError> {
        if !self.keyword("initially") {
            return Ok(false);
        }
        if !self.parse_block()? {
            return Err(self.err("expected a block after 'initially'"));
        }
        self.make_tree(2, &[1])?;
        Ok(true)
    }

    /// `<function definition> ::= "define" <NAME> [ "using" <variable> { "," <variable> } ] <block>`
    ///
    /// Builds `function(name, var(params...), block)`.
    pub fn parse_function_definition(&mut self) -> Result<bool, ParseError> {
        if !self.skip_keyword("define") {
            return Ok(false);
        }
        self.push_node("function");
        if !self.name() {
            return Err(self.err("expected a function name after 'define'"));
        }
        self.make_tree(2, &[1])?;
        self.push_node("var");
        if self.skip_keyword("using") {
            if !self.parse_variable() {
                return Err(self.err("expected a parameter name after 'using'"));
            }
            self.make_tree(2, &[1])?;
            while self.skip_symbol(",") {
                if !self.parse_variable() {
                    return Err(self.err("expected a parameter name after ','"));
                }
                self.make_tree(2, &[1])?;
            }
        }
        if !self.parse_block()? {
            return Err(self.err("expected a block for the function body"));
        }
        self.make_tree(3, &[2, 1])?;
        Ok(true)
    }

    /// `<function call> ::= <NAME> <parameter list>`
    pub fn parse_function_call(&mut self) -> Result<bool, ParseError> {
        if !self.name() {
            return Ok(false);
        }
        self.push_node("call");
        self.make_tree(1, &[2])?;
        if !self.parse_parameter_list()? {
            return Err(self.err("expected '(' after the function name"));
        }
        self.make_tree(2, &[1])?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{fails, parsed};
    use super::super::{Parser, Rule};
    use crate::lexer::{Token, TokenKind};

    const ALLBUGS: &str =
        "Allbugs { \n var beebui, beebuku, beebudu \n define foo using a,b,c { \n } \n } \n";
    const BEEBU: &str =
        "Bug beebu { \n var beebui, beebuku, beebudu \n initially { \n }\n moveto 8,7 \n } \n";

    #[test]
    fn var_declaration() {
        assert_eq!(parsed("var a,b,b \n", Rule::VarDeclaration), "var(a b b)");
        let mut p = Parser::new("variable a,b,b, b + n \n");
        assert!(!p.parse_var_declaration().unwrap());
        assert!(fails("var a,b, 8+9 \n", Rule::VarDeclaration).is_syntax());
        assert!(fails("var a b\n", Rule::VarDeclaration).is_syntax());
    }

    #[test]
    fn initialization_block() {
        assert_eq!(
            parsed("initially { \n } \n", Rule::InitializationBlock),
            "initially(block)"
        );
        let mut p = Parser::new("init { \n move 1 \n } \n \n");
        assert!(!p.parse_initialization_block().unwrap());
        assert!(fails(
            "initially \n { a = b } a= b \n \n",
            Rule::InitializationBlock
        )
        .is_syntax());
    }

    #[test]
    fn function_definition() {
        assert_eq!(
            parsed("define foo using a,b,c { \n } \n ", Rule::FunctionDefinition),
            "function(foo var(a b c) block)"
        );
        assert_eq!(
            parsed("define spin {\n turn 10\n return 1\n}\n", Rule::FunctionDefinition),
            "function(spin var block(turn(10.0) return(1.0)))"
        );
    }

    #[test]
    fn function_definition_commits_at_define() {
        assert!(fails("define 5 { \n } \n", Rule::FunctionDefinition).is_syntax());
        assert!(fails("define foo using { \n } \n", Rule::FunctionDefinition).is_syntax());
        assert!(fails("define foo using a, { \n } \n", Rule::FunctionDefinition).is_syntax());
        assert!(fails("define foo \n", Rule::FunctionDefinition).is_syntax());
    }

    #[test]
    fn function_call() {
        assert_eq!(parsed("foo(a,b,c)", Rule::FunctionCall), "call(foo var(a b c))");
        assert!(fails("foo + 1", Rule::FunctionCall).is_syntax());
        let mut p = Parser::new("(a)");
        assert!(!p.parse_function_call().unwrap());
    }

    #[test]
    fn allbugs_code() {
        assert_eq!(
            parsed(ALLBUGS, Rule::AllbugsCode),
            "Allbugs(list(var(beebui beebuku beebudu)) list(function(foo var(a b c) block)))"
        );
        let mut p = Parser::new("Bugs bunny { \n move 1 \n } \n \n");
        assert!(!p.parse_allbugs_code().unwrap());
        assert!(fails(
            "Allbugs { \n var beebui, beebuku, beebudu \n define foo using a,b,c { \n } \n  \n",
            Rule::AllbugsCode
        )
        .is_syntax());
    }

    #[test]
    fn bug_definition_shape() {
        assert_eq!(
            parsed(BEEBU, Rule::BugDefinition),
            "Bug(beebu list(var(beebui beebuku beebudu)) initially(block) block(moveto(8.0 7.0)) list)"
        );
    }

    #[test]
    fn missing_initialization_block_is_synthesized() {
        assert_eq!(
            parsed("Bug b {\n move 1\n define f {\n }\n}\n", Rule::BugDefinition),
            "Bug(b list initially(block) block(move(1.0)) list(function(f var block)))"
        );
    }

    #[test]
    fn bug_definition_failures() {
        let mut p = Parser::new("Bugs bunny { \n move 1 \n } \n \n");
        assert!(!p.parse_bug_definition().unwrap());
        assert!(fails(
            "Bug beebu { \n var beebui, beebuku, beebudu initially { \n } moveto 8 } \n",
            Rule::BugDefinition
        )
        .is_syntax());
        assert!(fails("Bug b {\n initially {\n }\n}\n", Rule::BugDefinition).is_syntax());
        assert!(fails("Bug b {\n move 1\n", Rule::BugDefinition).is_syntax());
        assert!(fails("Bug {\n move 1\n}\n", Rule::BugDefinition).is_syntax());
    }

    #[test]
    fn program_with_allbugs() {
        let src = format!("{}{}", ALLBUGS, BEEBU);
        assert_eq!(
            parsed(&src, Rule::Program),
            "program(Allbugs(list(var(beebui beebuku beebudu)) list(function(foo var(a b c) block))) \
             list(Bug(beebu list(var(beebui beebuku beebudu)) initially(block) block(moveto(8.0 7.0)) list)))"
        );
    }

    #[test]
    fn program_without_allbugs() {
        assert_eq!(
            parsed("Bug a {\n move 1\n}\nBug b {\n turn 2\n}\n", Rule::Program),
            "program(Allbugs list(Bug(a list initially(block) block(move(1.0)) list) \
             Bug(b list initially(block) block(turn(2.0)) list)))"
        );
    }

    #[test]
    fn program_no_match_consumes_nothing() {
        let mut p = Parser::new("Bugs bunny { \n move 1 \n } \n \n");
        assert!(!p.parse_program().unwrap());
        assert!(p.stack().is_empty());
        assert_eq!(p.next_token(), Token::new(TokenKind::Name, "Bugs"));

        let mut p = Parser::new("");
        assert!(!p.parse_program().unwrap());
        assert!(p.stack().is_empty());
    }

    #[test]
    fn trailing_content_is_fatal() {
        assert!(fails("Bug bunny { \n move 1 \n } \n \n x,y", Rule::Program).is_syntax());
        assert!(fails(ALLBUGS, Rule::Program).is_syntax());
    }
}
