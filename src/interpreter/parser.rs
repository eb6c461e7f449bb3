/// Expression parsing.
///
/// Contains the parser type, the program entry point and the
/// precedence-climbing expression chain, from logical `or` down to primary
/// expressions, dotted names, instantiations and method calls.
pub mod core;

/// Statement parsing.
///
/// Implements statement forms and block structure: assignments, `print`,
/// `return`, `if`/`else` suites, and class bodies with their method
/// definitions.
pub mod statement;
