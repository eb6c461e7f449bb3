/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, executes statements and evaluates
/// expressions, dispatches methods along class chains, and writes program
/// output. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Executes AST nodes, performing all supported operations.
/// - Manages scopes, instances and the `return` control flow.
/// - Reports runtime errors such as division by zero or unknown names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// including the synthetic indentation and newline tokens that carry the
/// language's block structure. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input text into tokens with source line information.
/// - Handles numeric and string literals, identifiers, keywords and
///   operators.
/// - Synthesizes `Indent`/`Dedent`/`Newline`/`Eof` from layout.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of statements
/// and expressions, resolving class names as it goes.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar and block structure, reporting errors with location
///   info.
/// - Builds class objects from class bodies and resolves instantiations.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value types used during execution: numbers,
/// booleans, strings, class objects and class instances, all reached
/// through shared, reference-counted holders. It also defines the closures
/// that serve as scopes and field tables, and the truthiness rule.
///
/// # Responsibilities
/// - Defines `ObjectHolder`, `Object` and the class/instance types.
/// - Implements method resolution along the inheritance chain.
/// - Provides the sharing semantics that assignments and `self` rely on.
pub mod value;
