/// Core evaluation logic.
///
/// Contains the evaluation context, the statement and expression
/// dispatchers, and the control-flow result type that models `return`.
pub mod core;

/// Arithmetic evaluation.
///
/// Implements the polymorphic `+ - * /` table over numbers, strings and
/// instances with an `__add__` method.
pub mod arithmetic;

/// Comparison evaluation.
///
/// Implements equality and ordering over the value domain, the four
/// derived comparators, and dispatch to `__eq__` and `__lt__`.
pub mod comparison;

/// Method calls, instantiation and value rendering.
///
/// Handles method resolution and invocation, construction of instances
/// with optional `__init__`, and the printed form of every value including
/// `__str__` dispatch.
pub mod call;
