use std::rc::Rc;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
        value::core::{Class, Method},
    },
};

impl Parser<'_> {
    /// Parses a single statement, dispatching on its leading token.
    pub(in crate::interpreter::parser) fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.lexer.current() {
            Token::Class => self.parse_class_definition(),
            Token::If => self.parse_if_else(),
            Token::Print => self.parse_print(),
            Token::Return => self.parse_return(),
            Token::Def => Err(ParseError::MethodOutsideClass {
                line: self.lexer.line(),
            }),
            _ => self.parse_simple_statement(),
        }
    }

    /// Parses an assignment, a field assignment or an expression
    /// statement.
    ///
    /// The expression is parsed first; an `=` after it turns a dotted name
    /// into an assignment target. `x = e` binds in the current scope,
    /// `a.b.c = e` stores into a field of the instance `a.b`.
    fn parse_simple_statement(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        let expr = self.parse_expression()?;

        let statement = if *self.lexer.current() == Token::Char('=') {
            self.lexer.advance();
            let value = self.parse_expression()?;
            match expr {
                Expr::Variable { mut path, .. } if path.len() == 1 => Statement::Assignment {
                    name: path.remove(0),
                    value,
                    line,
                },
                Expr::Variable { mut path, .. } => {
                    let field = path.pop().expect("dotted paths are never empty");
                    Statement::FieldAssignment {
                        receiver: Expr::Variable { path, line },
                        field,
                        value,
                        line,
                    }
                }
                _ => return Err(ParseError::InvalidAssignmentTarget { line }),
            }
        } else {
            Statement::Expression { expr, line }
        };

        self.end_of_line()?;
        Ok(statement)
    }

    /// Grammar: `print_stmt := "print" [expression ("," expression)*]`
    fn parse_print(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        self.lexer.advance();
        let mut arguments = Vec::new();
        if *self.lexer.current() != Token::Newline {
            loop {
                arguments.push(self.parse_expression()?);
                if *self.lexer.current() != Token::Char(',') {
                    break;
                }
                self.lexer.advance();
            }
        }
        self.end_of_line()?;
        Ok(Statement::Print { arguments, line })
    }

    /// Grammar: `return_stmt := "return" [expression]`
    ///
    /// A bare `return` returns the `None` value.
    fn parse_return(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        self.lexer.advance();
        let expr = if *self.lexer.current() == Token::Newline {
            Expr::None { line }
        } else {
            self.parse_expression()?
        };
        self.end_of_line()?;
        Ok(Statement::Return { expr, line })
    }

    /// Grammar: `if_stmt := "if" expression ":" suite ["else" ":" suite]`
    fn parse_if_else(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        self.lexer.advance();
        let condition = self.parse_expression()?;
        let then_branch = self.parse_suite()?;
        let else_branch = if *self.lexer.current() == Token::Else {
            self.lexer.advance();
            Some(Box::new(self.parse_suite()?))
        } else {
            None
        };
        Ok(Statement::IfElse {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
            line,
        })
    }

    /// Grammar: `class_def := "class" ID ["(" ID ")"] ":" NEWLINE INDENT
    /// method_def+ DEDENT`
    ///
    /// The parent class must already be declared; its methods become
    /// reachable through the new class's lookup chain. The finished class
    /// is recorded in the parser's table so later code can instantiate it.
    fn parse_class_definition(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        self.lexer.advance();
        let name = self.lexer.expect_id()?.to_owned();
        self.lexer.advance();

        let parent = if *self.lexer.current() == Token::Char('(') {
            self.lexer.advance();
            let parent_name = self.lexer.expect_id()?.to_owned();
            let parent = match self.classes.get(&parent_name) {
                Some(parent) => Rc::clone(parent),
                None => {
                    return Err(ParseError::UnknownClass {
                        name: parent_name,
                        line,
                    })
                }
            };
            self.lexer.expect_next(&Token::Char(')'))?;
            self.lexer.advance();
            Some(parent)
        } else {
            None
        };

        if self.classes.contains_key(&name) {
            return Err(ParseError::ClassAlreadyDefined { name, line });
        }

        self.lexer.expect(&Token::Char(':'))?;
        self.lexer.expect_next(&Token::Newline)?;
        self.lexer.expect_next(&Token::Indent)?;
        self.lexer.advance();

        let mut methods: Vec<Method> = Vec::new();
        while *self.lexer.current() != Token::Dedent {
            let method = self.parse_method()?;
            if methods.iter().any(|known| known.name == method.name) {
                return Err(ParseError::MethodAlreadyDefined {
                    name: method.name,
                    line: self.lexer.line(),
                });
            }
            methods.push(method);
        }
        self.lexer.advance();

        let class = Rc::new(Class::new(name.clone(), methods, parent));
        self.classes.insert(name, Rc::clone(&class));
        Ok(Statement::ClassDefinition { class, line })
    }

    /// Grammar: `method_def := "def" ID "(" "self" ("," ID)* ")" ":" suite`
    ///
    /// The receiver parameter is not part of the method's arity: callers
    /// never pass it, so it is stripped here and bound separately at call
    /// time.
    fn parse_method(&mut self) -> ParseResult<Method> {
        if *self.lexer.current() != Token::Def {
            return Err(ParseError::UnexpectedToken {
                token: format!("{:?}", self.lexer.current()),
                line: self.lexer.line(),
            });
        }
        let line = self.lexer.line();
        self.lexer.advance();
        let name = self.lexer.expect_id()?.to_owned();
        self.lexer.expect_next(&Token::Char('('))?;
        self.lexer.advance();

        let mut params = Vec::new();
        if *self.lexer.current() != Token::Char(')') {
            loop {
                params.push(self.lexer.expect_id()?.to_owned());
                self.lexer.advance();
                if *self.lexer.current() == Token::Char(',') {
                    self.lexer.advance();
                } else if *self.lexer.current() == Token::Char(')') {
                    break;
                } else {
                    return Err(ParseError::UnexpectedToken {
                        token: format!("{:?}", self.lexer.current()),
                        line: self.lexer.line(),
                    });
                }
            }
        }
        self.lexer.advance();

        if params.first().map(String::as_str) != Some("self") {
            return Err(ParseError::MethodWithoutSelf { name, line });
        }
        let formal_params = params.split_off(1);

        let body = self.parse_suite()?;
        Ok(Method {
            name,
            formal_params,
            body: Rc::new(body),
        })
    }

    /// Grammar: `suite := ":" NEWLINE INDENT statement+ DEDENT`
    ///
    /// The statements of the suite become one compound statement.
    fn parse_suite(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        self.lexer.expect(&Token::Char(':'))?;
        self.lexer.expect_next(&Token::Newline)?;
        self.lexer.expect_next(&Token::Indent)?;
        self.lexer.advance();

        let mut statements = Vec::new();
        while *self.lexer.current() != Token::Dedent {
            if *self.lexer.current() == Token::Eof {
                return Err(ParseError::UnexpectedEndOfInput {
                    line: self.lexer.line(),
                });
            }
            statements.push(self.parse_statement()?);
        }
        self.lexer.advance();
        Ok(Statement::Compound { statements, line })
    }

    /// Consumes the newline terminating a simple statement.
    fn end_of_line(&mut self) -> ParseResult<()> {
        self.lexer.expect(&Token::Newline)?;
        self.lexer.advance();
        Ok(())
    }
}
