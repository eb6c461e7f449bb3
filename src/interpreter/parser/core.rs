use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{BinaryOperator, Comparator, Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Token},
        value::core::Class,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program into its top-level statements.
///
/// # Errors
/// Returns the first `ParseError` encountered. Token-level assertion
/// failures from the lexer are wrapped into `ParseError::Lexer`.
pub fn parse_program(lexer: &mut Lexer) -> ParseResult<Vec<Statement>> {
    let mut parser = Parser::new(lexer);
    let mut program = Vec::new();
    while *parser.lexer.current() != Token::Eof {
        program.push(parser.parse_statement()?);
    }
    Ok(program)
}

/// A recursive-descent parser over the lexer's pull interface.
///
/// The parser consumes tokens through `current` and `advance` and asserts
/// punctuation through the `expect` family. It resolves class names as it
/// goes: instantiations and parent references are looked up in the table
/// of classes declared so far, so a class must be declared textually
/// before it is used.
pub struct Parser<'a> {
    pub(in crate::interpreter::parser) lexer: &'a mut Lexer,
    pub(in crate::interpreter::parser) classes: HashMap<String, Rc<Class>>,
}

impl<'a> Parser<'a> {
    pub(in crate::interpreter::parser) fn new(lexer: &'a mut Lexer) -> Self {
        Self {
            lexer,
            classes: HashMap::new(),
        }
    }

    /// Parses a full expression.
    ///
    /// Grammar: `expression := or_term`
    pub(in crate::interpreter::parser) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_or()
    }

    /// Grammar: `or_term := and_term ("or" and_term)*`
    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_and()?;
        while *self.lexer.current() == Token::Or {
            let line = self.lexer.line();
            self.lexer.advance();
            let right = self.parse_and()?;
            expr = Expr::BinaryOp {
                op: BinaryOperator::Or,
                left: Box::new(expr),
                right: Box::new(right),
                line,
            };
        }
        Ok(expr)
    }

    /// Grammar: `and_term := not_term ("and" not_term)*`
    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_not()?;
        while *self.lexer.current() == Token::And {
            let line = self.lexer.line();
            self.lexer.advance();
            let right = self.parse_not()?;
            expr = Expr::BinaryOp {
                op: BinaryOperator::And,
                left: Box::new(expr),
                right: Box::new(right),
                line,
            };
        }
        Ok(expr)
    }

    /// Grammar: `not_term := "not" not_term | comparison`
    fn parse_not(&mut self) -> ParseResult<Expr> {
        if *self.lexer.current() == Token::Not {
            let line = self.lexer.line();
            self.lexer.advance();
            let expr = self.parse_not()?;
            return Ok(Expr::Not {
                expr: Box::new(expr),
                line,
            });
        }
        self.parse_comparison()
    }

    /// Grammar: `comparison := additive [compare_op additive]`
    ///
    /// Comparisons do not chain; `a < b < c` is a syntax error at the
    /// second operator.
    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_additive()?;
        let op = match self.lexer.current() {
            Token::Eq => Comparator::Equal,
            Token::NotEq => Comparator::NotEqual,
            Token::Char('<') => Comparator::Less,
            Token::Char('>') => Comparator::Greater,
            Token::LessOrEq => Comparator::LessOrEqual,
            Token::GreaterOrEq => Comparator::GreaterOrEqual,
            _ => return Ok(expr),
        };
        let line = self.lexer.line();
        self.lexer.advance();
        let right = self.parse_additive()?;
        Ok(Expr::Comparison {
            op,
            left: Box::new(expr),
            right: Box::new(right),
            line,
        })
    }

    /// Grammar: `additive := term (("+" | "-") term)*`
    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_term()?;
        loop {
            let op = match self.lexer.current() {
                Token::Char('+') => BinaryOperator::Add,
                Token::Char('-') => BinaryOperator::Sub,
                _ => return Ok(expr),
            };
            let line = self.lexer.line();
            self.lexer.advance();
            let right = self.parse_term()?;
            expr = Expr::BinaryOp {
                op,
                left: Box::new(expr),
                right: Box::new(right),
                line,
            };
        }
    }

    /// Grammar: `term := primary (("*" | "/") primary)*`
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            let op = match self.lexer.current() {
                Token::Char('*') => BinaryOperator::Mul,
                Token::Char('/') => BinaryOperator::Div,
                _ => return Ok(expr),
            };
            let line = self.lexer.line();
            self.lexer.advance();
            let right = self.parse_primary()?;
            expr = Expr::BinaryOp {
                op,
                left: Box::new(expr),
                right: Box::new(right),
                line,
            };
        }
    }

    /// Parses a primary expression, then any chain of method calls hanging
    /// off it.
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let line = self.lexer.line();
        let expr = match self.lexer.current().clone() {
            Token::Number(value) => {
                self.lexer.advance();
                Expr::Number { value, line }
            }
            Token::String(value) => {
                self.lexer.advance();
                Expr::Str { value, line }
            }
            Token::True => {
                self.lexer.advance();
                Expr::Bool { value: true, line }
            }
            Token::False => {
                self.lexer.advance();
                Expr::Bool { value: false, line }
            }
            Token::None => {
                self.lexer.advance();
                Expr::None { line }
            }
            Token::Char('(') => {
                self.lexer.advance();
                let expr = self.parse_expression()?;
                self.lexer.expect(&Token::Char(')'))?;
                self.lexer.advance();
                expr
            }
            Token::Id(name) => {
                self.lexer.advance();
                self.parse_name_expr(name, line)?
            }
            token => {
                return Err(ParseError::UnexpectedToken {
                    token: format!("{token:?}"),
                    line,
                })
            }
        };
        self.parse_postfix(expr)
    }

    /// Parses the remainder of an expression that starts with a name:
    /// a dotted variable, a method call on one, `str(...)`, or a class
    /// instantiation.
    fn parse_name_expr(&mut self, first: String, line: usize) -> ParseResult<Expr> {
        let mut path = vec![first];
        while *self.lexer.current() == Token::Char('.') {
            self.lexer.advance();
            let segment = self.lexer.expect_id()?.to_owned();
            self.lexer.advance();
            if *self.lexer.current() == Token::Char('(') {
                let arguments = self.parse_arguments()?;
                let receiver = Expr::Variable { path, line };
                return Ok(Expr::MethodCall {
                    receiver: Box::new(receiver),
                    method: segment,
                    arguments,
                    line,
                });
            }
            path.push(segment);
        }

        if path.len() == 1 && *self.lexer.current() == Token::Char('(') {
            let name = path.remove(0);
            let arguments = self.parse_arguments()?;
            if let Some(class) = self.classes.get(&name) {
                return Ok(Expr::NewInstance {
                    class: Rc::clone(class),
                    arguments,
                    line,
                });
            }
            if name == "str" {
                if arguments.len() != 1 {
                    return Err(ParseError::StringifyArity {
                        found: arguments.len(),
                        line,
                    });
                }
                let inner = arguments
                    .into_iter()
                    .next()
                    .expect("argument count was checked above");
                return Ok(Expr::Stringify {
                    expr: Box::new(inner),
                    line,
                });
            }
            return Err(ParseError::UnknownCallable { name, line });
        }

        Ok(Expr::Variable { path, line })
    }

    /// Parses a chain of `.name(args)` method calls on an already parsed
    /// expression. Field reads are only available on dotted names, so a
    /// dot here must introduce a call.
    fn parse_postfix(&mut self, mut expr: Expr) -> ParseResult<Expr> {
        while *self.lexer.current() == Token::Char('.') {
            let line = self.lexer.line();
            self.lexer.advance();
            let method = self.lexer.expect_id()?.to_owned();
            self.lexer.advance();
            self.lexer.expect(&Token::Char('('))?;
            let arguments = self.parse_arguments()?;
            expr = Expr::MethodCall {
                receiver: Box::new(expr),
                method,
                arguments,
                line,
            };
        }
        Ok(expr)
    }

    /// Parses a parenthesized, comma-separated argument list. The current
    /// token must be the opening parenthesis.
    pub(in crate::interpreter::parser) fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        self.lexer.expect(&Token::Char('('))?;
        self.lexer.advance();
        let mut arguments = Vec::new();
        if *self.lexer.current() != Token::Char(')') {
            loop {
                arguments.push(self.parse_expression()?);
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
        Ok(arguments)
    }
}
