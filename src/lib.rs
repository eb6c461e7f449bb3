//! # snakelet
//!
//! snakelet is a tree-walking interpreter for a small, dynamically-typed,
//! class-based scripting language with indentation-delimited blocks. It
//! supports integers, booleans, strings, classes with single inheritance,
//! operator overloading through double-underscore methods, and a `print`
//! statement wired to a caller-supplied output stream.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::interpreter::{evaluator::core::Context, lexer::Lexer, parser::core::parse_program};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums that represent
/// the syntactic structure of source code as a tree. The AST is built by
/// the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source locations to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running a
/// program. It standardizes error reporting and carries detailed
/// information about failures, including source lines for debugging and
/// user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and error handling to provide a complete runtime for
/// program execution. It exposes the public API for interpreting programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator and value
///   types.
/// - Provides entry points for tokenizing and executing user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Executes a program, writing everything it prints to `output`.
///
/// The source is tokenized and parsed as a whole, then executed statement
/// by statement in a fresh global scope.
///
/// # Errors
/// Returns an error if tokenization, parsing or execution fails. The
/// concrete type behind the box is one of [`error::LexerError`],
/// [`error::ParseError`] or [`error::RuntimeError`].
///
/// # Examples
/// ```
/// use snakelet::run_program;
///
/// let mut output: Vec<u8> = Vec::new();
/// run_program("print 1 + 2 * 3\n", &mut output).unwrap();
/// assert_eq!(output, b"7\n");
///
/// // Unknown variables are runtime errors.
/// let mut sink: Vec<u8> = Vec::new();
/// assert!(run_program("print y\n", &mut sink).is_err());
/// ```
pub fn run_program(source: &str, output: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let mut lexer = Lexer::new(source)?;
    let program = parse_program(&mut lexer)?;
    let mut context = Context::new(output);
    context.run(&program)?;
    Ok(())
}
